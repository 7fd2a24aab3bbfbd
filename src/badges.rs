//! Fixed lookup tables for badges, trend indicators and sparklines.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::models::{ApplicationStatus, Plan, SlaStatus, format_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Top,
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn for_score(score: u32) -> ScoreTier {
        if score >= 93 {
            ScoreTier::Top
        } else if score >= 80 {
            ScoreTier::High
        } else if score >= 70 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ScoreTier::Top => Color::Rgb(16, 185, 129),  // emerald
            ScoreTier::High => Color::Green,
            ScoreTier::Medium => Color::Yellow,
            ScoreTier::Low => Color::Rgb(249, 115, 22), // orange
        }
    }
}

pub fn score_badge(score: u32) -> Span<'static> {
    Span::styled(
        format!("● {}", score),
        Style::default()
            .fg(ScoreTier::for_score(score).color())
            .add_modifier(Modifier::BOLD),
    )
}

pub fn status_color(status: ApplicationStatus) -> Color {
    match status {
        ApplicationStatus::Applied => Color::Blue,
        ApplicationStatus::Viewed => Color::Magenta,
        ApplicationStatus::Interview => Color::Green,
        ApplicationStatus::Offer => Color::Rgb(16, 185, 129),
        ApplicationStatus::Rejected => Color::DarkGray,
    }
}

pub fn status_badge(status: ApplicationStatus) -> Span<'static> {
    Span::styled(
        format!("[{}]", status.label()),
        Style::default().fg(status_color(status)),
    )
}

pub fn sla_badge(sla: SlaStatus) -> Span<'static> {
    let color = match sla {
        SlaStatus::OnTrack => Color::Green,
        SlaStatus::Behind => Color::Yellow,
        SlaStatus::Urgent => Color::Red,
    };
    Span::styled(format!("[{}]", sla.label()), Style::default().fg(color))
}

pub fn plan_badge(plan: Plan) -> Span<'static> {
    let style = match plan {
        Plan::Silver => Style::default().fg(Color::Black).bg(Color::Gray),
        Plan::Gold => Style::default().fg(Color::Black).bg(Color::Yellow),
        Plan::Launchpad => Style::default().fg(Color::White).bg(Color::Blue),
    };
    Span::styled(
        format!(" {} ", plan.label()),
        style.add_modifier(Modifier::BOLD),
    )
}

/// Color for free-form rating strings ("excellent", "warning", ...).
pub fn rating_color(rating: &str) -> Color {
    match rating.to_lowercase().as_str() {
        "excellent" | "ready" => Color::Green,
        "good" | "in progress" => Color::Blue,
        "average" | "warning" | "pending" => Color::Yellow,
        "poor" | "critical" => Color::Red,
        _ => Color::Gray,
    }
}

// --- Trends ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    pub magnitude: f64,
}

impl Trend {
    pub fn from_percent(change: f64) -> Trend {
        let direction = if change < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Up
        };
        Trend {
            direction,
            magnitude: change.abs(),
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self.direction {
            TrendDirection::Up => "▲",
            TrendDirection::Down => "▼",
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}%", self.arrow(), format_number(self.magnitude))
    }

    pub fn span(&self) -> Span<'static> {
        let color = match self.direction {
            TrendDirection::Up => Color::Green,
            TrendDirection::Down => Color::Red,
        };
        Span::styled(self.label(), Style::default().fg(color))
    }
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One character per point, scaled between the series minimum and maximum.
pub fn sparkline(points: &[f64]) -> String {
    let finite: Vec<f64> = points.iter().copied().filter(|p| p.is_finite()).collect();
    let Some(min) = finite.iter().copied().reduce(f64::min) else {
        return String::new();
    };
    let max = finite.iter().copied().fold(min, f64::max);
    let span = max - min;
    finite
        .iter()
        .map(|p| {
            if span == 0.0 {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                let idx = ((p - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tier_boundaries() {
        assert_eq!(ScoreTier::for_score(100), ScoreTier::Top);
        assert_eq!(ScoreTier::for_score(93), ScoreTier::Top);
        assert_eq!(ScoreTier::for_score(92), ScoreTier::High);
        assert_eq!(ScoreTier::for_score(80), ScoreTier::High);
        assert_eq!(ScoreTier::for_score(79), ScoreTier::Medium);
        assert_eq!(ScoreTier::for_score(70), ScoreTier::Medium);
        assert_eq!(ScoreTier::for_score(69), ScoreTier::Low);
        assert_eq!(ScoreTier::for_score(0), ScoreTier::Low);
    }

    #[test]
    fn test_score_badge_uses_tier_color() {
        let badge = score_badge(93);
        assert_eq!(badge.content, "● 93");
        assert_eq!(badge.style.fg, Some(ScoreTier::Top.color()));
        assert_eq!(score_badge(85).style.fg, Some(Color::Green));
    }

    #[test]
    fn test_negative_trend_is_down_with_absolute_value() {
        let trend = Trend::from_percent(-15.0);
        assert_eq!(trend.direction, TrendDirection::Down);
        assert_eq!(trend.magnitude, 15.0);
        assert_eq!(trend.label(), "▼ 15%");
        assert_eq!(trend.span().style.fg, Some(Color::Red));
    }

    #[test]
    fn test_non_negative_trend_is_up() {
        assert_eq!(Trend::from_percent(0.0).direction, TrendDirection::Up);
        let trend = Trend::from_percent(12.5);
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.label(), "▲ 12.5%");
    }

    #[test]
    fn test_labels() {
        assert_eq!(status_badge(ApplicationStatus::Offer).content, "[Offer]");
        assert_eq!(sla_badge(SlaStatus::OnTrack).content, "[On Track]");
        assert_eq!(plan_badge(Plan::Launchpad).content, " Career LaunchPad ");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[5.0, 5.0]), "▅▅");
        assert_eq!(sparkline(&[0.0, 7.0]), "▁█");
        assert_eq!(sparkline(&[32.0, 35.0, 38.0, 42.0, 45.0, 47.0]).chars().count(), 6);
    }
}
