mod api;
mod badges;
mod config;
mod content;
mod error;
mod fallback;
mod filter;
mod loader;
mod logging;
mod models;
mod pages;
mod resumes;
mod routes;
mod tui;
mod ui_state;

use anyhow::{Context, Result, anyhow, bail};
use api::{DashboardApi, HttpDashboardApi, HttpPdfService};
use clap::{Parser, Subcommand};
use config::Config;
use filter::{ApplicationFilter, ApplicationStats, EMPTY_MESSAGE, StatusFilter};
use loader::{FailurePolicy, Loadable, resolve};
use models::{CustomerDashboard, Metric, ResumeVersion, ResumesView, Role, SettingsView, format_number};
use resumes::{GenerateOutcome, ResumeWorkflow};
use routes::{ROUTES, Route};
use std::path::PathBuf;
use std::sync::Arc;
use tui::truncate;
use ui_state::UiState;

#[derive(Parser)]
#[command(name = "concierge")]
#[command(about = "Job-application concierge dashboard - pipeline, resumes, interviews and analytics")]
struct Cli {
    /// Client whose dashboard to load (overrides CONCIERGE_CLIENT_ID)
    #[arg(long, global = true)]
    client_id: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Tui {
        /// Role to view as (customer, staff, admin)
        #[arg(short, long, default_value = "customer")]
        role: Role,

        /// Start on this page instead of the role's dashboard (e.g. /resumes)
        #[arg(long)]
        route: Option<Route>,
    },

    /// Show the customer dashboard
    Dashboard,

    /// Show the staff work queues
    Staff,

    /// Show the admin overview
    Admin,

    /// List applications
    Applications {
        /// Match job title or company (case-insensitive)
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Filter by status (all, applied, viewed, interview, offer, rejected)
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },

    /// List resume versions
    Resumes,

    /// Manage one resume
    Resume {
        #[command(subcommand)]
        command: ResumeCommands,
    },

    /// Show upcoming and past interviews
    Interviews,

    /// Show application analytics
    Analytics,

    /// Show account settings
    Settings,

    /// Show support contacts and FAQs
    Support,

    /// List the dashboard's pages
    Routes,
}

#[derive(Subcommand)]
enum ResumeCommands {
    /// Create a resume tailored to a role
    Generate {
        /// Target role, e.g. "Senior Software Engineer"
        role: String,
    },

    /// Replace a resume's summary
    Edit {
        /// Resume ID
        id: String,

        /// New summary text
        #[arg(long, conflicts_with = "file")]
        summary: Option<String>,

        /// Read the new summary from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Save a resume's PDF
    Download {
        /// Resume ID
        id: String,

        /// Directory to write into (defaults to CONCIERGE_DOWNLOAD_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a fresh preview URL for a resume
    Preview {
        /// Resume ID
        id: String,
    },
}

/// Unwrap page state for one-shot output; placeholders are flagged on stderr.
fn settle<T>(what: &str, state: Loadable<T>) -> Result<T> {
    match state {
        Loadable::Ready(data) => Ok(data),
        Loadable::Degraded { placeholder, error } => {
            eprintln!("Warning: could not load {} ({}); showing placeholders.", what, error);
            Ok(placeholder)
        }
        Loadable::Blocked { error } => Err(anyhow!("Unable to load {}: {}", what, error)),
        Loadable::Loading => bail!("{} is still loading", what),
    }
}

fn customer_dashboard(api: &dyn DashboardApi, client_id: &str) -> Result<CustomerDashboard> {
    settle(
        "dashboard",
        resolve("customer dashboard", api.customer_dashboard(client_id), FailurePolicy::Blocking),
    )
}

fn find_resume(api: &dyn DashboardApi, client_id: &str, id: &str) -> Result<ResumeVersion> {
    let dashboard = customer_dashboard(api, client_id)?;
    dashboard
        .resume_versions
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow!("Resume {} not found.", id))
}

fn print_metric(title: &str, metric: &Metric) {
    let trend = match metric.trend {
        Some(change) => format!("  {} vs last month", badges::Trend::from_percent(change).label()),
        None => String::new(),
    };
    println!("  {:<26} {:>10}{}", title, metric.value.to_string(), trend);
}

fn print_resumes(versions: &[ResumeVersion]) {
    if versions.is_empty() {
        println!("No resume versions yet.");
        return;
    }
    println!("{:<8} {:<24} {:<28} {:>4} {:>5} {:>8}", "ID", "NAME", "TARGET ROLE", "ATS", "APPS", "SUCCESS");
    println!("{}", "-".repeat(82));
    for r in versions {
        println!(
            "{:<8} {:<24} {:<28} {:>4} {:>5} {:>7}%",
            r.id,
            truncate(r.display_name(), 22),
            truncate(&r.target_role, 26),
            r.ats_score,
            r.used_in_apps,
            format_number(r.success_rate)
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client_id = cli.client_id.clone().unwrap_or_else(|| config.client_id.clone());

    let level = if cli.verbose { "debug" } else { config.rust_log.as_str() };
    match &cli.command {
        Commands::Tui { .. } => logging::init(level, Some(&config.log_path()))?,
        _ => logging::init(if cli.verbose { "debug" } else { "warn" }, None)?,
    }

    let api: Arc<dyn DashboardApi> = Arc::new(HttpDashboardApi::new(&config)?);

    match cli.command {
        Commands::Tui { role, route } => {
            let config = Config { client_id, ..config };
            tui::run(&config, UiState::new(role, route))?;
        }

        Commands::Dashboard => {
            let dashboard = customer_dashboard(api.as_ref(), &client_id)?;
            println!("Welcome back, {}! ({})", dashboard.user.name, dashboard.user.plan_name.label());
            println!();
            for (title, metric) in dashboard.metrics.tiles() {
                print_metric(title, metric);
            }
            println!();
            println!("Pipeline");
            for stage in dashboard.pipeline.stages() {
                println!("  {:<12} {:>3}", stage.key.label(), stage.cards.len());
            }
            println!();
            print_resumes(&dashboard.resume_versions);
            if !dashboard.activity.is_empty() {
                println!();
                println!("Recent Activity");
                for event in &dashboard.activity {
                    println!("  {:<14} {}", event.timestamp, event.message);
                }
            }
        }

        Commands::Staff => {
            let staff = settle(
                "staff dashboard",
                resolve("staff dashboard", api.staff_dashboard(), FailurePolicy::Placeholder),
            )?;
            println!("Work Queue");
            println!("{:<20} {:<20} {:>9} {:>8} {:<10}", "CLIENT", "PLAN", "APPS DUE", "RESUMES", "SLA");
            println!("{}", "-".repeat(71));
            for w in &staff.work_queue {
                println!(
                    "{:<20} {:<20} {:>9} {:>8} {:<10}",
                    truncate(&w.client, 18),
                    w.plan.label(),
                    w.apps_due_today,
                    w.pending_resumes,
                    w.sla.label()
                );
            }
            println!();
            println!("Resume Optimization Queue");
            for r in &staff.resume_queue {
                println!("  {:<18} {:<30} fit {:>3}  {}", r.client, truncate(&r.job_title, 28), r.fit_score, r.keywords.join(", "));
            }
            println!();
            println!("ATS Review Queue");
            for a in &staff.ats_queue {
                let missing = if a.missing_keywords.is_empty() {
                    "none".to_string()
                } else {
                    a.missing_keywords.join(", ")
                };
                println!("  {:<18} {:<24} ats {:>3}  missing: {}", a.client, truncate(&a.role, 22), a.ats_score, missing);
            }
            println!();
            println!("Application Queue");
            for a in &staff.application_queue {
                let mark = |ok: bool| if ok { "yes" } else { "no" };
                println!(
                    "  {:<18} {:<24} resume {:<3}  cover {:<3}  vpn {}",
                    a.client,
                    truncate(&a.role, 22),
                    mark(a.resume_ready),
                    mark(a.cover_letter),
                    a.vpn_state
                );
            }
        }

        Commands::Admin => {
            let admin = settle(
                "admin dashboard",
                resolve("admin dashboard", api.admin_dashboard(), FailurePolicy::Placeholder),
            )?;
            for kpi in &admin.kpis {
                print_metric(&kpi.title, &kpi.metric);
            }
            println!();
            println!("{:<22} {:>7} {:>6} {:>5} {:>10} {:<10}", "SPECIALIST", "CLIENTS", "APPS", "ATS", "INTERVIEW", "RATING");
            println!("{}", "-".repeat(65));
            for s in &admin.specialists {
                println!(
                    "{:<22} {:>7} {:>6} {:>5} {:>9}% {:<10}",
                    truncate(&s.name, 20),
                    s.clients,
                    s.applications,
                    s.avg_ats,
                    format_number(s.interview_rate),
                    s.performance
                );
            }
            println!();
            println!("Plan Distribution");
            for share in &admin.plan_distribution {
                println!("  {:<20} {:>5}", share.plan.label(), share.clients);
            }
            println!();
            println!("System Health");
            for h in &admin.system_health {
                println!("  {:<24} {:<12} {}", h.metric, h.value, h.status);
            }
        }

        Commands::Applications { search, status } => {
            let view = settle(
                "applications",
                resolve("applications", api.applications(), FailurePolicy::Placeholder),
            )?;
            let stats = ApplicationStats::from_cards(&view.applications);
            println!(
                "Total {}  Interviews {}  Offers {}  Pending {}",
                stats.total, stats.interviews, stats.offers, stats.pending
            );
            let filter = ApplicationFilter::new(search.unwrap_or_default(), status);
            let matching = filter.apply(&view.applications);
            if matching.is_empty() {
                println!("{}", EMPTY_MESSAGE);
            } else {
                println!("{:<8} {:<30} {:<20} {:<10} {:>4} {:<14}", "ID", "JOB", "COMPANY", "STATUS", "ATS", "APPLIED");
                println!("{}", "-".repeat(91));
                for a in matching {
                    println!(
                        "{:<8} {:<30} {:<20} {:<10} {:>4} {:<14}",
                        a.id,
                        truncate(&a.job_title, 28),
                        truncate(&a.company, 18),
                        a.status.label(),
                        a.ats_score,
                        a.applied_date
                    );
                }
            }
        }

        Commands::Resumes => {
            let view = settle(
                "resumes",
                resolve(
                    "resumes",
                    api.customer_dashboard(&client_id).map(ResumesView::from),
                    FailurePolicy::Placeholder,
                ),
            )?;
            println!(
                "{} versions, avg ATS score {}, used in {} applications",
                view.versions.len(),
                view.average_ats_score(),
                view.total_applications()
            );
            println!();
            print_resumes(&view.versions);
        }

        Commands::Resume { command } => {
            let workflow = |download_dir: PathBuf| -> Result<ResumeWorkflow> {
                Ok(ResumeWorkflow::new(
                    Arc::clone(&api),
                    Arc::new(HttpPdfService::new(&config)?),
                    config.resume_backend,
                    download_dir,
                ))
            };

            match command {
                ResumeCommands::Generate { role } => {
                    match workflow(config.download_dir.clone())?.generate(&role)? {
                        GenerateOutcome::Saved { resume, preview } => {
                            println!("Created resume {} for {}", resume.id, resume.target_role);
                            println!("Preview: {}", preview.url);
                        }
                        GenerateOutcome::Downloaded(path) => {
                            println!("Saved {}", path.display());
                        }
                    }
                }

                ResumeCommands::Edit { id, summary, file } => {
                    let summary = match (summary, file) {
                        (Some(text), _) => text,
                        (None, Some(path)) => std::fs::read_to_string(&path)
                            .with_context(|| format!("Failed to read {}", path.display()))?,
                        (None, None) => bail!("Provide --summary or --file"),
                    };
                    let resume = find_resume(api.as_ref(), &client_id, &id)?;
                    let outcome = workflow(config.download_dir.clone())?
                        .edit(&resume, summary.trim())
                        .context("Failed to save resume")?;
                    println!("Updated resume {}", outcome.resume.id);
                    println!("Preview: {}", outcome.preview.url);
                }

                ResumeCommands::Download { id, output } => {
                    let resume = find_resume(api.as_ref(), &client_id, &id)?;
                    let dir = output.unwrap_or_else(|| config.download_dir.clone());
                    let path = workflow(dir)?
                        .download(&resume)
                        .context("Failed to download PDF")?;
                    println!("Saved {}", path.display());
                }

                ResumeCommands::Preview { id } => {
                    let preview = workflow(config.download_dir.clone())?.preview(&id)?;
                    println!("{}", preview.url);
                }
            }
        }

        Commands::Interviews => {
            let schedule = settle(
                "interviews",
                resolve(
                    "interviews",
                    api.customer_dashboard(&client_id).map(|d| d.interviews),
                    FailurePolicy::Placeholder,
                ),
            )?;
            println!("Upcoming Interviews ({})", schedule.upcoming.len());
            for i in &schedule.upcoming {
                println!("  {} at {}  [{}]", i.job_title, i.company, i.stage);
                println!("    {} {} · {} · prep: {}", i.date, i.time, i.kind.label(), i.preparation_status);
                if let Some(place) = i.meeting_link.as_deref().or(i.location.as_deref()) {
                    println!("    {}", place);
                }
            }
            println!();
            println!("Past Interviews ({})", schedule.past.len());
            for p in &schedule.past {
                println!("  {:<14} {} · {}  {}", p.date, p.job_title, p.company, p.outcome);
            }
        }

        Commands::Analytics => {
            let analytics = settle(
                "analytics",
                resolve("analytics", api.analytics(), FailurePolicy::Placeholder),
            )?;
            for kpi in &analytics.kpis {
                print_metric(&kpi.title, &kpi.metric);
            }
            println!();
            println!("{:<8} {:>6} {:>11}", "MONTH", "APPS", "INTERVIEWS");
            for m in &analytics.application_trend {
                println!("{:<8} {:>6} {:>11}", m.month, m.applications, m.interviews);
            }
            println!();
            println!("{:<22} {:>6} {:>11} {:>7}", "ROLE", "APPS", "INTERVIEWS", "OFFERS");
            for r in &analytics.role_performance {
                println!("{:<22} {:>6} {:>11} {:>7}", truncate(&r.role, 20), r.apps, r.interviews, r.offers);
            }
            println!();
            println!("Top Companies");
            for c in &analytics.top_companies {
                println!("  {:<20} {:>4}  {}", c.name, c.applications, c.status);
            }
        }

        Commands::Settings => {
            let view = settle(
                "settings",
                resolve(
                    "settings",
                    api.customer_dashboard(&client_id).map(SettingsView::from),
                    FailurePolicy::Placeholder,
                ),
            )?;
            println!("Name: {}", view.user.name);
            println!("Plan: {}", view.user.plan_name.label());
            println!("Monthly limit: {}", view.user.plan_name.monthly_limit());
            for feature in view.user.plan_name.features() {
                println!("  - {}", feature);
            }
            println!();
            println!("Notifications");
            for pref in content::NOTIFICATION_PREFERENCES.iter() {
                println!("  [{}] {}", if pref.enabled { "x" } else { " " }, pref.label);
            }
        }

        Commands::Support => {
            for method in content::CONTACT_METHODS.iter() {
                println!("{:<14} {:<28} {}", method.title, method.detail, method.availability);
            }
            println!();
            for faq in content::FAQS.iter() {
                println!("Q: {}", faq.question);
                println!("{}", textwrap::indent(&textwrap::fill(faq.answer, 76), "   "));
            }
        }

        Commands::Routes => {
            println!("{:<16} {}", "PATH", "PAGE");
            println!("{}", "-".repeat(36));
            for (path, route) in ROUTES {
                println!("{:<16} {}", path, route.title());
            }
        }
    }

    Ok(())
}
