use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::badges::{Trend, score_badge, sparkline};
use crate::models::{ApplicationCard, Metric};

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

pub fn kpi_tile(title: &str, metric: &Metric) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        metric.value.to_string(),
        bold().fg(Color::Cyan),
    ))];

    if let Some(change) = metric.trend {
        lines.push(Line::from(vec![
            Trend::from_percent(change).span(),
            Span::styled(" vs last month", dim()),
        ]));
    }

    let spark = sparkline(&metric.history);
    if !spark.is_empty() {
        lines.push(Line::from(Span::styled(spark, Style::default().fg(Color::Blue))));
    }

    Paragraph::new(lines).block(panel(title))
}

/// Lay tiles out side by side in equal columns.
pub fn kpi_row(frame: &mut Frame, area: Rect, tiles: &[(&str, &Metric)]) {
    if tiles.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = tiles
        .iter()
        .map(|_| Constraint::Ratio(1, tiles.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for ((title, metric), column) in tiles.iter().zip(columns.iter()) {
        frame.render_widget(kpi_tile(title, metric), *column);
    }
}

pub fn pipeline_card_lines(card: &ApplicationCard, width: usize) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(truncate(&card.job_title, width), bold())),
        Line::from(truncate(&card.company, width)),
        Line::from(vec![
            Span::styled("Resume: ", dim()),
            Span::styled(
                truncate(&card.resume_version, width.saturating_sub(8)),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(vec![Span::styled("ATS: ", dim()), score_badge(card.ats_score)]),
        Line::from(Span::styled(card.applied_date.clone(), dim())),
        Line::from(""),
    ]
}

pub fn render_loading(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .style(dim())
        .block(Block::default());
    frame.render_widget(text, centered_line(area));
}

pub fn render_error_screen(frame: &mut Frame, area: Rect, title: &str, error: &str) {
    let lines = vec![
        Line::from(Span::styled(title.to_string(), bold().fg(Color::Red))),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press r to retry.", dim())),
    ];
    let screen = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel("Error").border_style(Style::default().fg(Color::Red)));
    frame.render_widget(screen, area);
}

pub fn offline_banner(error: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(" Offline ", Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::styled(
            format!(" Showing placeholder data ({})", error),
            Style::default().fg(Color::Yellow),
        ),
    ]))
}

pub fn empty_state(message: &str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(message.to_string(), dim())).alignment(Alignment::Center)
}

/// A single-line rect in the vertical middle of `area`.
fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, area.height.min(1))
}

/// A rect of `width` x `height` centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Senior Software Engineer", 10), "Senior ...");
        assert_eq!(truncate("Café Résumé Builder", 8), "Café ...");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }

    #[test]
    fn test_pipeline_card_shows_score_badge() {
        let card = ApplicationCard {
            job_title: "Lead Developer".to_string(),
            company: "Finance Inc".to_string(),
            ats_score: 97,
            applied_date: "Feb 8, 2026".to_string(),
            ..Default::default()
        };
        let lines = pipeline_card_lines(&card, 24);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], "Lead Developer");
        assert_eq!(text[3], "ATS: ● 97");
        assert_eq!(text[4], "Feb 8, 2026");
    }
}
