use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::widgets::{bold, centered_rect, dim, panel};
use super::{App, InputMode, views};
use crate::content::{ASSISTANT_OFFLINE, ASSISTANT_ONLINE};
use crate::models::Role;
use crate::routes::{BOTTOM_NAV, MAIN_NAV, NavItem, Route, is_active};

/// Below this width the sidebar turns into a drawer.
const NARROW_WIDTH: u16 = 90;

const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 6;
const ASSISTANT_WIDTH: u16 = 36;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    draw_top_bar(frame, rows[0], app);

    let narrow = area.width < NARROW_WIDTH;
    let sidebar_width = match (narrow, app.ui.sidebar_collapsed) {
        (true, _) => 0,
        (false, true) => SIDEBAR_COLLAPSED_WIDTH,
        (false, false) => SIDEBAR_WIDTH,
    };
    let assistant_width = if app.ui.assistant_open { ASSISTANT_WIDTH } else { 0 };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(sidebar_width),
            Constraint::Min(0),
            Constraint::Length(assistant_width),
        ])
        .split(rows[1]);

    if sidebar_width > 0 {
        draw_sidebar(frame, body[0], app, app.ui.sidebar_collapsed);
    }

    let main = panel(app.ui.route.title());
    let inner = main.inner(body[1]);
    frame.render_widget(main, body[1]);
    views::render_page(frame, inner, app);

    if app.ui.assistant_open {
        draw_assistant(frame, body[2], app);
    }

    if narrow && app.ui.drawer_open {
        let drawer = Rect::new(rows[1].x, rows[1].y, SIDEBAR_WIDTH.min(rows[1].width), rows[1].height);
        frame.render_widget(Clear, drawer);
        draw_sidebar(frame, drawer, app, false);
    }

    draw_status_line(frame, rows[2], app);
    draw_prompt(frame, area, app);
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Customer => "Customer",
        Role::Staff => "Staff",
        Role::Admin => "Admin",
    }
}

fn draw_top_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" JobConcierge ", bold().fg(Color::White).bg(Color::Blue)),
        Span::styled(format!("  {} View", role_label(app.ui.role)), dim()),
        Span::raw("   "),
        Span::styled(app.user.name.clone(), bold()),
    ];
    if app.user.offline {
        spans.push(Span::styled("  (offline)", Style::default().fg(Color::Yellow)));
    }
    if app.busy {
        spans.push(Span::styled("  working...", Style::default().fg(Color::Cyan)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn nav_item(number: usize, item: &NavItem, app: &App, collapsed: bool) -> ListItem<'static> {
    let active = is_active(item.route, app.ui.route);
    let style = if active {
        bold().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default()
    };
    let text = if collapsed {
        format!(" {} {}", number, item.label.chars().next().unwrap_or(' '))
    } else {
        format!(" {} {}", number, item.label)
    };
    ListItem::new(Span::styled(text, style))
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App, collapsed: bool) {
    let block = Block::default().borders(Borders::RIGHT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(BOTTOM_NAV.len() as u16 + 1),
        ])
        .split(inner);

    let main: Vec<ListItem> = MAIN_NAV
        .iter()
        .enumerate()
        .map(|(i, item)| nav_item(i + 1, item, app, collapsed))
        .collect();
    frame.render_widget(List::new(main), split[0]);

    let mut bottom = vec![ListItem::new(Span::styled(
        if collapsed { " ──" } else { " ─────────" },
        dim(),
    ))];
    bottom.extend(
        BOTTOM_NAV
            .iter()
            .enumerate()
            .map(|(i, item)| nav_item(MAIN_NAV.len() + i + 1, item, app, collapsed)),
    );
    frame.render_widget(List::new(bottom), split[1]);
}

fn draw_assistant(frame: &mut Frame, area: Rect, app: &App) {
    let message = if app.user.offline {
        ASSISTANT_OFFLINE
    } else {
        ASSISTANT_ONLINE
    };
    let accent = if app.user.offline { Color::Yellow } else { Color::Cyan };
    let assistant = Paragraph::new(vec![
        Line::from(Span::styled("Career Assistant", bold().fg(accent))),
        Line::from(""),
        Line::from(message),
    ])
    .wrap(Wrap { trim: true })
    .block(panel("AI Assistant").border_style(Style::default().fg(accent)));
    frame.render_widget(assistant, area);
}

fn help_text(app: &App) -> &'static str {
    match app.ui.route {
        Route::Applications => {
            "/ search  f status  x clear  j/k move  1-7 pages  R role  r reload  q quit"
        }
        Route::Resumes => {
            "g generate  e edit  d download  p preview  j/k move  1-7 pages  q quit"
        }
        _ => "1-7 pages  R role  b sidebar  m menu  a assistant  r reload  q quit",
    }
}

fn draw_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.input {
        InputMode::Search => Line::from(vec![
            Span::styled("Search: ", bold()),
            Span::raw(app.filter.query.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled("   Enter to finish", dim()),
        ]),
        _ => match &app.status {
            Some(status) => Line::from(Span::styled(status.clone(), Style::default().fg(Color::Yellow))),
            None => Line::from(Span::styled(help_text(app), dim())),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_prompt(frame: &mut Frame, area: Rect, app: &App) {
    let (title, label, text, height) = match &app.input {
        InputMode::GenerateRole(role) => ("Create Tailored Resume", "Target role", role, 6),
        InputMode::EditSummary { text, .. } => ("Edit Resume Summary", "Summary", text, 12),
        _ => return,
    };
    let popup = centered_rect(70, height, area);
    let lines = vec![
        Line::from(Span::styled(format!("{}:", label), bold())),
        Line::from(format!("{}_", text)),
        Line::from(""),
        Line::from(Span::styled("Enter to save • Esc to cancel", dim())),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(title).border_style(Style::default().fg(Color::Cyan))),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::StubApi;
    use crate::config::ResumeBackend;
    use crate::pages::{PageData, ShellUser};
    use crate::routes::ROUTES;
    use crate::ui_state::UiState;
    use ratatui::backend::TestBackend;

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app_at(route: Route) -> App {
        let (mut app, _) = App::start(UiState::new(Role::Customer, Some(route)), ResumeBackend::Dashboard);
        app.page = PageData::fetch(&StubApi::default(), route, "client-1");
        app
    }

    #[test]
    fn test_every_page_renders_while_api_is_down() {
        for (_, route) in ROUTES {
            let app = app_at(route);
            let screen = render(&app, 140, 48);
            assert!(screen.contains("JobConcierge"), "{:?}", route);
            assert!(screen.contains(route.title()), "{:?} missing title", route);
        }
    }

    #[test]
    fn test_degraded_page_shows_offline_banner() {
        let screen = render(&app_at(Route::Analytics), 140, 48);
        assert!(screen.contains("Offline"));
        assert!(screen.contains("Interview Rate"));
    }

    #[test]
    fn test_blocked_customer_dashboard_shows_retry() {
        let screen = render(&app_at(Route::CustomerDashboard), 140, 48);
        assert!(screen.contains("Press r to retry."));
    }

    #[test]
    fn test_loading_page() {
        let (app, _) = App::start(UiState::new(Role::Admin, None), ResumeBackend::Dashboard);
        let screen = render(&app, 120, 30);
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("Admin View"));
    }

    #[test]
    fn test_narrow_layout_hides_sidebar_until_drawer_opens() {
        let mut app = app_at(Route::Support);
        let screen = render(&app, 80, 30);
        assert!(!screen.contains("6 Support"));

        app.ui.drawer_open = true;
        let screen = render(&app, 80, 30);
        assert!(screen.contains("6 Support"));
    }

    #[test]
    fn test_assistant_reflects_connectivity() {
        let mut app = app_at(Route::Support);
        app.ui.assistant_open = true;
        app.user = ShellUser { name: "...".to_string(), offline: true };
        let screen = render(&app, 140, 40);
        assert!(screen.contains("Offline Mode"));
    }

    #[test]
    fn test_generate_prompt_is_drawn() {
        let mut app = app_at(Route::Resumes);
        app.input = InputMode::GenerateRole("Data Analyst".to_string());
        let screen = render(&app, 120, 40);
        assert!(screen.contains("Create Tailored Resume"));
        assert!(screen.contains("Data Analyst_"));
    }
}
