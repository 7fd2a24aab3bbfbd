use ratatui::{
    prelude::*,
    widgets::{BarChart, Gauge, List, ListItem, Paragraph, Row, Table, TableState, Wrap},
};

use super::App;
use super::widgets::{
    bold, dim, empty_state, kpi_row, offline_banner, panel, pipeline_card_lines, render_error_screen,
    render_loading, truncate,
};
use crate::badges::{plan_badge, rating_color, score_badge, sla_badge, status_badge};
use crate::content::{CONTACT_METHODS, FAQS, NOTIFICATION_PREFERENCES};
use crate::filter::{ApplicationStats, EMPTY_MESSAGE};
use crate::loader::Loadable;
use crate::models::{
    AdminDashboard, AnalyticsView, ApplicationsView, CustomerDashboard, InterviewSchedule, Metric,
    ResumesView, SettingsView, StaffDashboard, format_number,
};
use crate::pages::PageData;

pub fn render_page(frame: &mut Frame, area: Rect, app: &App) {
    match &app.page {
        PageData::Customer(state) => {
            with_loadable(frame, area, state, "Unable to load your dashboard", customer)
        }
        PageData::Staff(state) => with_loadable(frame, area, state, "Unable to load page", staff),
        PageData::Admin(state) => with_loadable(frame, area, state, "Unable to load page", admin),
        PageData::Applications(state) => {
            with_loadable(frame, area, state, "Unable to load page", |f, a, view| applications(f, a, view, app))
        }
        PageData::Resumes(state) => {
            with_loadable(frame, area, state, "Unable to load page", |f, a, view| resumes(f, a, view, app))
        }
        PageData::Interviews(state) => with_loadable(frame, area, state, "Unable to load page", interviews),
        PageData::Analytics(state) => with_loadable(frame, area, state, "Unable to load page", analytics),
        PageData::Settings(state) => with_loadable(frame, area, state, "Unable to load page", settings),
        PageData::Support => support(frame, area),
    }
}

/// Loading indicator, error screen, or the page with an offline banner.
fn with_loadable<T>(
    frame: &mut Frame,
    area: Rect,
    state: &Loadable<T>,
    blocked_title: &str,
    render: impl FnOnce(&mut Frame, Rect, &T),
) {
    match state {
        Loadable::Loading => render_loading(frame, area),
        Loadable::Ready(data) => render(frame, area, data),
        Loadable::Degraded { placeholder, error } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(area);
            frame.render_widget(offline_banner(error), rows[0]);
            render(frame, rows[1], placeholder);
        }
        Loadable::Blocked { error } => render_error_screen(frame, area, blocked_title, error),
    }
}

fn split_vertical<const N: usize>(area: Rect, constraints: [Constraint; N]) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
}

fn split_horizontal<const N: usize>(area: Rect, constraints: [Constraint; N]) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
}

fn header_row(cells: &[&'static str]) -> Row<'static> {
    Row::new(cells.to_vec()).style(bold().fg(Color::Cyan))
}

// --- Customer dashboard ---

fn customer(frame: &mut Frame, area: Rect, data: &CustomerDashboard) {
    let rows = split_vertical(
        area,
        [
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(9),
        ],
    );

    let greeting = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("Welcome back, {}! ", data.user.name), bold()),
            plan_badge(data.user.plan_name),
        ]),
        Line::from(Span::styled("Your job pipeline is actively growing.", dim())),
    ]);
    frame.render_widget(greeting, rows[0]);

    kpi_row(frame, rows[1], &data.metrics.tiles());

    // Pipeline columns
    let columns = split_horizontal(
        rows[2],
        [
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ],
    );
    for (stage, column) in data.pipeline.stages().zip(columns.iter()) {
        let width = column.width.saturating_sub(2) as usize;
        let lines: Vec<Line> = stage
            .cards
            .iter()
            .flat_map(|card| pipeline_card_lines(card, width))
            .collect();
        let title = format!("{} ({})", stage.key.label(), stage.cards.len());
        frame.render_widget(Paragraph::new(lines).block(panel(&title)), *column);
    }

    let bottom = split_horizontal(
        rows[3],
        [
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ],
    );

    let library: Vec<Row> = data
        .resume_versions
        .iter()
        .map(|r| {
            Row::new(vec![
                Line::from(r.id.clone()),
                Line::from(truncate(&r.target_role, 26)),
                Line::from(score_badge(r.ats_score)),
                Line::from(format!("{} apps", r.used_in_apps)),
            ])
        })
        .collect();
    let library = Table::new(
        library,
        [
            Constraint::Length(8),
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(9),
        ],
    )
    .block(panel("Resume Version Library"));
    frame.render_widget(library, bottom[0]);

    let activity: Vec<ListItem> = data
        .activity
        .iter()
        .map(|event| {
            ListItem::new(vec![
                Line::from(event.message.clone()),
                Line::from(Span::styled(event.timestamp.clone(), dim())),
            ])
        })
        .collect();
    frame.render_widget(List::new(activity).block(panel("Recent Activity")), bottom[1]);

    plan_usage(frame, bottom[2], data);
}

fn plan_usage(frame: &mut Frame, area: Rect, data: &CustomerDashboard) {
    let limit = if data.user.total_quota > 0 {
        data.user.total_quota
    } else {
        data.user.plan_name.monthly_limit()
    };
    let used = metric_count(&data.metrics.applications_submitted);
    let remaining = metric_count(&data.metrics.remaining_quota);

    let rows = split_vertical(area, [Constraint::Length(3), Constraint::Min(0)]);
    let ratio = match used {
        Some(used) if limit > 0 => (used / limit as f64).clamp(0.0, 1.0),
        _ => 0.0,
    };
    let label = match (used, remaining) {
        (Some(u), Some(r)) => format!("{} used • {} remaining", format_number(u), format_number(r)),
        _ => "... used".to_string(),
    };
    let gauge = Gauge::default()
        .block(panel("Your Plan"))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, rows[0]);

    let features: Vec<ListItem> = data
        .user
        .plan_name
        .features()
        .iter()
        .map(|f| ListItem::new(format!("✓ {}", f)))
        .collect();
    frame.render_widget(
        List::new(features).block(panel(&format!("{} / month", limit))),
        rows[1],
    );
}

fn metric_count(metric: &Metric) -> Option<f64> {
    match &metric.value {
        crate::models::MetricValue::Number(n) => Some(*n),
        crate::models::MetricValue::Text(_) => None,
    }
}

// --- Staff dashboard ---

fn staff(frame: &mut Frame, area: Rect, data: &StaffDashboard) {
    let rows = split_vertical(
        area,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
        ],
    );

    let work: Vec<Row> = data
        .work_queue
        .iter()
        .map(|w| {
            Row::new(vec![
                Line::from(w.client.clone()),
                Line::from(plan_badge(w.plan)),
                Line::from(w.apps_due_today.to_string()),
                Line::from(w.pending_resumes.to_string()),
                Line::from(sla_badge(w.sla)),
            ])
        })
        .collect();
    let work = Table::new(
        work,
        [
            Constraint::Min(16),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header_row(&["CLIENT", "PLAN", "APPS DUE", "RESUMES", "SLA"]))
    .block(panel("Work Queue"));
    frame.render_widget(work, rows[0]);

    let resumes: Vec<Row> = data
        .resume_queue
        .iter()
        .map(|r| {
            Row::new(vec![
                Line::from(r.client.clone()),
                Line::from(r.job_title.clone()),
                Line::from(score_badge(r.fit_score)),
                Line::from(r.keywords.join(", ")),
            ])
        })
        .collect();
    let resumes = Table::new(
        resumes,
        [
            Constraint::Length(16),
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["CLIENT", "JOB", "FIT", "KEYWORDS"]))
    .block(panel("Resume Optimization Queue"));
    frame.render_widget(resumes, rows[1]);

    let ats: Vec<Row> = data
        .ats_queue
        .iter()
        .map(|a| {
            let missing = if a.missing_keywords.is_empty() {
                Span::styled("none", Style::default().fg(Color::Green))
            } else {
                Span::styled(a.missing_keywords.join(", "), Style::default().fg(Color::Red))
            };
            Row::new(vec![
                Line::from(a.client.clone()),
                Line::from(a.role.clone()),
                Line::from(score_badge(a.ats_score)),
                Line::from(missing),
                Line::from(a.suggestions.clone()),
            ])
        })
        .collect();
    let ats = Table::new(
        ats,
        [
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Length(6),
            Constraint::Length(20),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["CLIENT", "ROLE", "ATS", "MISSING", "SUGGESTIONS"]))
    .block(panel("ATS Review Queue"));
    frame.render_widget(ats, rows[2]);

    let check = |ok: bool| {
        if ok {
            Span::styled("✓", Style::default().fg(Color::Green))
        } else {
            Span::styled("✗", Style::default().fg(Color::Red))
        }
    };
    let apps: Vec<Row> = data
        .application_queue
        .iter()
        .map(|a| {
            Row::new(vec![
                Line::from(a.client.clone()),
                Line::from(a.role.clone()),
                Line::from(check(a.resume_ready)),
                Line::from(check(a.cover_letter)),
                Line::from(a.vpn_state.clone()),
            ])
        })
        .collect();
    let apps = Table::new(
        apps,
        [
            Constraint::Length(16),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["CLIENT", "ROLE", "RESUME", "COVER", "VPN"]))
    .block(panel("Application Queue"));
    frame.render_widget(apps, rows[3]);
}

// --- Admin dashboard ---

fn admin(frame: &mut Frame, area: Rect, data: &AdminDashboard) {
    let rows = split_vertical(area, [Constraint::Length(5), Constraint::Min(8), Constraint::Length(8)]);

    let tiles: Vec<(&str, &Metric)> = data
        .kpis
        .iter()
        .map(|k| (k.title.as_str(), &k.metric))
        .collect();
    kpi_row(frame, rows[0], &tiles);

    let specialists: Vec<Row> = data
        .specialists
        .iter()
        .map(|s| {
            Row::new(vec![
                Line::from(s.name.clone()),
                Line::from(s.clients.to_string()),
                Line::from(s.applications.to_string()),
                Line::from(score_badge(s.avg_ats)),
                Line::from(format!("{}%", format_number(s.interview_rate))),
                Line::from(Span::styled(
                    s.performance.clone(),
                    Style::default().fg(rating_color(&s.performance)),
                )),
            ])
        })
        .collect();
    let specialists = Table::new(
        specialists,
        [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["SPECIALIST", "CLIENTS", "APPS", "ATS", "INTERVIEW", "RATING"]))
    .block(panel("Specialist Performance"));
    frame.render_widget(specialists, rows[1]);

    let bottom = split_horizontal(rows[2], [Constraint::Percentage(50), Constraint::Percentage(50)]);

    let bars: Vec<(&str, u64)> = data
        .plan_distribution
        .iter()
        .map(|share| (share.plan.label(), share.clients as u64))
        .collect();
    let chart = BarChart::default()
        .block(panel("Plan Distribution"))
        .data(bars.as_slice())
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(bold().fg(Color::White).bg(Color::Blue));
    frame.render_widget(chart, bottom[0]);

    let health: Vec<ListItem> = data
        .system_health
        .iter()
        .map(|h| {
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(rating_color(&h.status))),
                Span::raw(format!("{}: ", h.metric)),
                Span::styled(h.value.clone(), bold()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(health).block(panel("System Health")), bottom[1]);
}

// --- Applications ---

fn applications(frame: &mut Frame, area: Rect, view: &ApplicationsView, app: &App) {
    let rows = split_vertical(area, [Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)]);

    let stats = ApplicationStats::from_cards(&view.applications);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("Total {}", stats.total), Style::default().fg(Color::Blue)),
            Span::raw("   "),
            Span::styled(format!("Interviews {}", stats.interviews), Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled(format!("Offers {}", stats.offers), Style::default().fg(Color::Rgb(16, 185, 129))),
            Span::raw("   "),
            Span::styled(format!("Pending {}", stats.pending), Style::default().fg(Color::Cyan)),
        ])),
        rows[0],
    );

    let query = if app.filter.query.is_empty() {
        Span::styled("Search by job title or company...", dim())
    } else {
        Span::raw(app.filter.query.clone())
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Search: ", bold()),
            query,
            Span::raw("   "),
            Span::styled("Status: ", bold()),
            Span::raw(app.filter.status.label()),
        ])),
        rows[1],
    );

    let filtered = app.filter.apply(&view.applications);
    if filtered.is_empty() {
        frame.render_widget(empty_state(EMPTY_MESSAGE).block(panel("Applications")), rows[2]);
        return;
    }

    let table_rows: Vec<Row> = filtered
        .iter()
        .map(|a| {
            Row::new(vec![
                Line::from(a.job_title.clone()),
                Line::from(a.company.clone()),
                Line::from(a.location.clone()),
                Line::from(a.applied_date.clone()),
                Line::from(status_badge(a.status)),
                Line::from(score_badge(a.ats_score)),
                Line::from(a.resume_version.clone()),
                Line::from(a.salary.clone()),
            ])
        })
        .collect();
    let title = format!("Applications ({} of {})", filtered.len(), view.applications.len());
    let table = Table::new(
        table_rows,
        [
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(20),
            Constraint::Length(14),
        ],
    )
    .header(header_row(&[
        "JOB", "COMPANY", "LOCATION", "APPLIED", "STATUS", "ATS", "RESUME", "SALARY",
    ]))
    .block(panel(&title))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected.min(filtered.len() - 1)));
    frame.render_stateful_widget(table, rows[2], &mut state);
}

// --- Resumes ---

fn resumes(frame: &mut Frame, area: Rect, view: &ResumesView, app: &App) {
    let preview_height = if app.preview.is_some() { 4 } else { 0 };
    let rows = split_vertical(
        area,
        [
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(7),
            Constraint::Length(preview_height),
        ],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Total Resume Versions ", dim()),
            Span::styled(view.versions.len().to_string(), bold()),
            Span::raw("   "),
            Span::styled("Avg ATS Score ", dim()),
            Span::styled(view.average_ats_score().to_string(), bold()),
            Span::raw("   "),
            Span::styled("Total Applications ", dim()),
            Span::styled(view.total_applications().to_string(), bold()),
            Span::raw("   "),
            Span::styled(format!("backend: {}", app.backend.as_str()), dim()),
        ])),
        rows[0],
    );

    if view.versions.is_empty() {
        frame.render_widget(
            empty_state("No resume versions yet. Press g to create one.").block(panel("Resume Versions")),
            rows[1],
        );
    } else {
        let table_rows: Vec<Row> = view
            .versions
            .iter()
            .map(|r| {
                Row::new(vec![
                    Line::from(r.display_name().to_string()),
                    Line::from(r.target_role.clone()),
                    Line::from(score_badge(r.ats_score)),
                    Line::from(r.used_in_apps.to_string()),
                    Line::from(format!("{}%", format_number(r.success_rate))),
                    Line::from(r.last_updated.clone()),
                ])
            })
            .collect();
        let table = Table::new(
            table_rows,
            [
                Constraint::Length(22),
                Constraint::Min(20),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(14),
            ],
        )
        .header(header_row(&["NAME", "TARGET ROLE", "ATS", "APPS", "SUCCESS", "UPDATED"]))
        .block(panel("Resume Versions"))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
        let mut state =
            TableState::default().with_selected(Some(app.selected.min(view.versions.len() - 1)));
        frame.render_stateful_widget(table, rows[1], &mut state);
    }

    let detail = match view.versions.get(app.selected) {
        Some(resume) => {
            let mut lines = vec![Line::from(vec![
                Span::styled("Keywords: ", bold()),
                Span::raw(resume.keywords.join(", ")),
            ])];
            lines.push(Line::from(Span::styled("Summary", bold())));
            let summary = if resume.summary().is_empty() { "(no summary)" } else { resume.summary() };
            for line in textwrap::fill(summary, rows[2].width.saturating_sub(4).max(20) as usize).lines() {
                lines.push(Line::from(format!("  {}", line)));
            }
            lines
        }
        None => vec![Line::from(Span::styled("Nothing selected", dim()))],
    };
    frame.render_widget(
        Paragraph::new(detail).wrap(Wrap { trim: false }).block(panel("Detail")),
        rows[2],
    );

    if let Some(preview) = &app.preview {
        let lines = vec![
            Line::from(vec![Span::styled("Resume ", dim()), Span::styled(preview.resume_id.clone(), bold())]),
            Line::from(Span::styled(preview.url.to_string(), Style::default().fg(Color::Blue))),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel("Preview")), rows[3]);
    }
}

// --- Interviews ---

fn interviews(frame: &mut Frame, area: Rect, schedule: &InterviewSchedule) {
    let rows = split_vertical(area, [Constraint::Length(1), Constraint::Min(8), Constraint::Length(8)]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Upcoming ", dim()),
            Span::styled(schedule.upcoming.len().to_string(), bold().fg(Color::Blue)),
            Span::raw("   "),
            Span::styled("Total Completed ", dim()),
            Span::styled(schedule.past.len().to_string(), bold()),
        ])),
        rows[0],
    );

    let upcoming: Vec<ListItem> = schedule
        .upcoming
        .iter()
        .map(|i| {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(format!("{} ", i.job_title), bold()),
                    Span::raw(format!("at {}", i.company)),
                    Span::styled(format!("  [{}]", i.stage), Style::default().fg(Color::Cyan)),
                ]),
                Line::from(format!("  {} · {} · {}", i.date, i.time, i.kind.label())),
            ];
            let place = i
                .meeting_link
                .as_deref()
                .or(i.location.as_deref())
                .or(i.platform.as_deref());
            if let Some(place) = place {
                lines.push(Line::from(Span::styled(format!("  {}", place), dim())));
            }
            if !i.interviewers.is_empty() {
                lines.push(Line::from(format!("  With: {}", i.interviewers.join(", "))));
            }
            if !i.notes.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {}", i.notes), dim())));
            }
            lines.push(Line::from(vec![
                Span::raw("  Preparation: "),
                Span::styled(
                    i.preparation_status.clone(),
                    Style::default().fg(rating_color(&i.preparation_status)),
                ),
            ]));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();
    let upcoming = if upcoming.is_empty() {
        vec![ListItem::new(Span::styled("No upcoming interviews.", dim()))]
    } else {
        upcoming
    };
    frame.render_widget(List::new(upcoming).block(panel("Upcoming Interviews")), rows[1]);

    let past: Vec<Row> = schedule
        .past
        .iter()
        .map(|p| {
            Row::new(vec![
                Line::from(p.date.clone()),
                Line::from(format!("{} · {}", p.job_title, p.company)),
                Line::from(p.stage.clone()),
                Line::from(p.outcome.clone()),
                Line::from(Span::styled(p.feedback.clone(), dim())),
            ])
        })
        .collect();
    let past = Table::new(
        past,
        [
            Constraint::Length(13),
            Constraint::Min(24),
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["DATE", "ROLE", "STAGE", "OUTCOME", "FEEDBACK"]))
    .block(panel("Past Interviews"));
    frame.render_widget(past, rows[2]);
}

// --- Analytics ---

fn analytics(frame: &mut Frame, area: Rect, data: &AnalyticsView) {
    let rows = split_vertical(area, [Constraint::Length(5), Constraint::Min(8), Constraint::Length(8)]);

    let tiles: Vec<(&str, &Metric)> = data
        .kpis
        .iter()
        .map(|k| (k.title.as_str(), &k.metric))
        .collect();
    kpi_row(frame, rows[0], &tiles);

    let middle = split_horizontal(rows[1], [Constraint::Percentage(60), Constraint::Percentage(40)]);
    let bars: Vec<(&str, u64)> = data
        .application_trend
        .iter()
        .map(|m| (m.month.as_str(), m.applications as u64))
        .collect();
    let chart = BarChart::default()
        .block(panel("Applications per Month"))
        .data(bars.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(bold().fg(Color::White).bg(Color::Blue));
    frame.render_widget(chart, middle[0]);

    let total: u32 = data.status_distribution.iter().map(|s| s.count).sum();
    let distribution: Vec<ListItem> = data
        .status_distribution
        .iter()
        .map(|s| {
            let pct = if total > 0 { s.count as f64 * 100.0 / total as f64 } else { 0.0 };
            ListItem::new(format!("{:<10} {:>4}  {:>5.1}%", s.status, s.count, pct))
        })
        .collect();
    frame.render_widget(List::new(distribution).block(panel("Status Distribution")), middle[1]);

    let bottom = split_horizontal(rows[2], [Constraint::Percentage(55), Constraint::Percentage(45)]);
    let roles: Vec<Row> = data
        .role_performance
        .iter()
        .map(|r| {
            Row::new(vec![
                r.role.clone(),
                r.apps.to_string(),
                r.interviews.to_string(),
                r.offers.to_string(),
            ])
        })
        .collect();
    let roles = Table::new(
        roles,
        [
            Constraint::Min(14),
            Constraint::Length(6),
            Constraint::Length(11),
            Constraint::Length(7),
        ],
    )
    .header(header_row(&["ROLE", "APPS", "INTERVIEWS", "OFFERS"]))
    .block(panel("Performance by Role"));
    frame.render_widget(roles, bottom[0]);

    let companies: Vec<Row> = data
        .top_companies
        .iter()
        .map(|c| Row::new(vec![c.name.clone(), c.applications.to_string(), c.status.clone()]))
        .collect();
    let companies = Table::new(
        companies,
        [Constraint::Min(16), Constraint::Length(6), Constraint::Length(14)],
    )
    .header(header_row(&["COMPANY", "APPS", "STATUS"]))
    .block(panel("Top Companies"));
    frame.render_widget(companies, bottom[1]);
}

// --- Settings & support ---

fn settings(frame: &mut Frame, area: Rect, view: &SettingsView) {
    let rows = split_vertical(area, [Constraint::Length(6), Constraint::Length(6), Constraint::Min(0)]);

    let profile = Paragraph::new(vec![
        Line::from(vec![Span::styled("Name: ", dim()), Span::raw(view.user.name.clone())]),
        Line::from(vec![Span::styled("Plan: ", dim()), plan_badge(view.user.plan_name)]),
        Line::from(vec![
            Span::styled("Monthly quota: ", dim()),
            Span::raw(if view.user.total_quota > 0 {
                view.user.total_quota.to_string()
            } else {
                view.user.plan_name.monthly_limit().to_string()
            }),
        ]),
    ])
    .block(panel("Profile Information"));
    frame.render_widget(profile, rows[0]);

    let features: Vec<ListItem> = view
        .user
        .plan_name
        .features()
        .iter()
        .map(|f| ListItem::new(format!("✓ {}", f)))
        .collect();
    frame.render_widget(List::new(features).block(panel("Billing & Plan")), rows[1]);

    let prefs: Vec<ListItem> = NOTIFICATION_PREFERENCES
        .iter()
        .map(|p| {
            let toggle = if p.enabled {
                Span::styled("[on] ", Style::default().fg(Color::Green))
            } else {
                Span::styled("[off]", dim())
            };
            ListItem::new(Line::from(vec![
                toggle,
                Span::styled(format!(" {}", p.label), bold()),
                Span::styled(format!("  {}", p.description), dim()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(prefs).block(panel("Notifications")), rows[2]);
}

fn support(frame: &mut Frame, area: Rect) {
    let rows = split_vertical(area, [Constraint::Length(6), Constraint::Min(0)]);

    let contacts: Vec<ListItem> = CONTACT_METHODS
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<14}", c.title), bold()),
                Span::raw(format!("{:<28}", c.detail)),
                Span::styled(format!("{:<28}", c.availability), dim()),
                Span::styled(format!("[{}]", c.action), Style::default().fg(Color::Blue)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(contacts).block(panel("Contact Support")), rows[0]);

    let mut lines = Vec::new();
    for faq in FAQS.iter() {
        lines.push(Line::from(Span::styled(faq.question, bold())));
        lines.push(Line::from(faq.answer));
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Frequently Asked Questions")),
        rows[1],
    );
}
