mod render;
mod views;
mod widgets;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::api::{DashboardApi, HttpDashboardApi, HttpPdfService, LegacyPdfService};
use crate::config::{Config, ResumeBackend};
use crate::error::ApiResult;
use crate::filter::ApplicationFilter;
use crate::models::ResumeVersion;
use crate::pages::{PageData, ShellUser};
use crate::resumes::{EditOutcome, GenerateOutcome, Preview, ResumeWorkflow};
use crate::routes::{BOTTOM_NAV, MAIN_NAV, Route};
use crate::ui_state::UiState;

pub use render::draw;
pub use widgets::truncate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    GenerateRole(String),
    EditSummary { resume_id: String, text: String },
}

/// Work the UI hands to a background thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadPage { route: Route, generation: u64 },
    LoadUser,
    Generate(String),
    Edit { resume: ResumeVersion, summary: String },
    Download(ResumeVersion),
    Preview(String),
    Quit,
}

/// Results coming back from background threads.
#[derive(Debug)]
pub enum Message {
    Page { generation: u64, data: PageData },
    User(ShellUser),
    Generated(ApiResult<GenerateOutcome>),
    Edited(ApiResult<EditOutcome>),
    Downloaded(ApiResult<PathBuf>),
    Previewed(ApiResult<Preview>),
}

pub struct App {
    pub ui: UiState,
    pub user: ShellUser,
    pub page: PageData,
    /// Bumped on every navigation; page results from older generations are dropped.
    pub generation: u64,
    pub filter: ApplicationFilter,
    pub input: InputMode,
    pub selected: usize,
    pub preview: Option<Preview>,
    pub status: Option<String>,
    pub busy: bool,
    pub backend: ResumeBackend,
}

impl App {
    /// A fresh app plus the fetches it needs before the first useful frame.
    pub fn start(ui: UiState, backend: ResumeBackend) -> (App, Vec<Command>) {
        let route = ui.route;
        let app = App {
            ui,
            user: ShellUser::default(),
            page: PageData::loading(route),
            generation: 1,
            filter: ApplicationFilter::default(),
            input: InputMode::Normal,
            selected: 0,
            preview: None,
            status: None,
            busy: false,
            backend,
        };
        let commands = vec![
            Command::LoadUser,
            Command::LoadPage { route, generation: 1 },
        ];
        (app, commands)
    }

    pub fn navigate(&mut self, route: Route) -> Command {
        self.ui.navigate(route);
        self.reload()
    }

    fn reload(&mut self) -> Command {
        self.generation += 1;
        self.page = PageData::loading(self.ui.route);
        self.selected = 0;
        self.preview = None;
        Command::LoadPage {
            route: self.ui.route,
            generation: self.generation,
        }
    }

    /// Rows the selection cursor can move over on the current page.
    fn list_len(&self) -> usize {
        match &self.page {
            PageData::Applications(state) => state
                .data()
                .map(|view| self.filter.apply(&view.applications).len())
                .unwrap_or(0),
            PageData::Resumes(state) => state.data().map(|view| view.versions.len()).unwrap_or(0),
            _ => 0,
        }
    }

    pub fn selected_resume(&self) -> Option<&ResumeVersion> {
        match &self.page {
            PageData::Resumes(state) => state.data()?.versions.get(self.selected),
            _ => None,
        }
    }

    fn resume_by_id(&self, id: &str) -> Option<&ResumeVersion> {
        match &self.page {
            PageData::Resumes(state) => state.data()?.versions.iter().find(|r| r.id == id),
            _ => None,
        }
    }

    /// Swap the server's copy of a resume into the visible list.
    fn store_resume(&mut self, resume: ResumeVersion) {
        if let PageData::Resumes(state) = &mut self.page {
            if let Some(view) = state.data_mut() {
                view.replace(resume);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<Command> {
        match self.input.clone() {
            InputMode::Normal => self.handle_normal_key(code),
            InputMode::Search => {
                match code {
                    KeyCode::Enter | KeyCode::Esc => self.input = InputMode::Normal,
                    KeyCode::Backspace => {
                        self.filter.query.pop();
                        self.selected = 0;
                    }
                    KeyCode::Char(c) => {
                        self.filter.query.push(c);
                        self.selected = 0;
                    }
                    _ => {}
                }
                None
            }
            InputMode::GenerateRole(mut role) => match code {
                KeyCode::Esc => {
                    self.input = InputMode::Normal;
                    None
                }
                KeyCode::Enter => {
                    if role.trim().is_empty() {
                        self.status = Some("Target role is required".to_string());
                        return None;
                    }
                    self.input = InputMode::Normal;
                    self.busy = true;
                    self.status = Some(format!("Generating resume for {}...", role.trim()));
                    Some(Command::Generate(role.trim().to_string()))
                }
                KeyCode::Backspace => {
                    role.pop();
                    self.input = InputMode::GenerateRole(role);
                    None
                }
                KeyCode::Char(c) => {
                    role.push(c);
                    self.input = InputMode::GenerateRole(role);
                    None
                }
                _ => None,
            },
            InputMode::EditSummary { resume_id, mut text } => match code {
                KeyCode::Esc => {
                    self.input = InputMode::Normal;
                    None
                }
                KeyCode::Enter => {
                    self.input = InputMode::Normal;
                    let resume = self.resume_by_id(&resume_id)?.clone();
                    self.busy = true;
                    self.status = Some("Saving...".to_string());
                    Some(Command::Edit { resume, summary: text })
                }
                KeyCode::Backspace => {
                    text.pop();
                    self.input = InputMode::EditSummary { resume_id, text };
                    None
                }
                KeyCode::Char(c) => {
                    text.push(c);
                    self.input = InputMode::EditSummary { resume_id, text };
                    None
                }
                _ => None,
            },
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char('q') => return Some(Command::Quit),
            KeyCode::Esc => {
                if self.ui.drawer_open {
                    self.ui.toggle_drawer();
                } else if self.ui.assistant_open {
                    self.ui.toggle_assistant();
                } else {
                    self.preview = None;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                let item = MAIN_NAV.iter().chain(BOTTOM_NAV.iter()).nth(index)?;
                return Some(self.navigate(item.route));
            }
            KeyCode::Char('R') => {
                self.ui.switch_role(self.ui.role.next());
                return Some(self.reload());
            }
            KeyCode::Char('r') => return Some(self.reload()),
            KeyCode::Char('b') => self.ui.toggle_sidebar(),
            KeyCode::Char('m') => self.ui.toggle_drawer(),
            KeyCode::Char('a') => self.ui.toggle_assistant(),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.list_len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            _ => return self.handle_page_key(code),
        }
        None
    }

    fn handle_page_key(&mut self, code: KeyCode) -> Option<Command> {
        match (self.ui.route, code) {
            (Route::Applications, KeyCode::Char('/')) => self.input = InputMode::Search,
            (Route::Applications, KeyCode::Char('f')) => {
                self.filter.status = self.filter.status.next();
                self.selected = 0;
            }
            (Route::Applications, KeyCode::Char('x')) => {
                self.filter = ApplicationFilter::default();
                self.selected = 0;
            }
            (Route::Resumes, _) if self.busy => {
                self.status = Some("Still working on the last request...".to_string());
            }
            (Route::Resumes, KeyCode::Char('g')) => {
                self.input = InputMode::GenerateRole(String::new());
            }
            (Route::Resumes, KeyCode::Char('e')) => {
                let resume = self.selected_resume()?;
                self.input = InputMode::EditSummary {
                    resume_id: resume.id.clone(),
                    text: resume.summary().to_string(),
                };
            }
            (Route::Resumes, KeyCode::Char('d')) => {
                let resume = self.selected_resume()?.clone();
                self.busy = true;
                self.status = Some(format!("Downloading {}...", resume.display_name()));
                return Some(Command::Download(resume));
            }
            (Route::Resumes, KeyCode::Char('p')) => {
                let id = self.selected_resume()?.id.clone();
                return Some(Command::Preview(id));
            }
            _ => {}
        }
        None
    }

    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Page { generation, data } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "dropping stale page result");
                    return;
                }
                self.page = data;
                self.selected = self.selected.min(self.list_len().saturating_sub(1));
            }
            Message::User(user) => self.user = user,
            Message::Generated(result) => {
                self.busy = false;
                match result {
                    Ok(GenerateOutcome::Saved { resume, preview }) => {
                        self.status = Some(format!("Created {}", resume.display_name()));
                        self.store_resume(resume);
                        self.selected = 0;
                        self.preview = Some(preview);
                    }
                    Ok(GenerateOutcome::Downloaded(path)) => {
                        self.status = Some(format!("Saved {}", path.display()));
                    }
                    Err(err) => {
                        error!(error = %err, "resume generation failed");
                        self.status = Some(format!("Failed to generate resume: {}", err.summary()));
                    }
                }
            }
            Message::Edited(result) => {
                self.busy = false;
                match result {
                    Ok(EditOutcome { resume, preview }) => {
                        self.status = Some("Resume updated".to_string());
                        self.store_resume(resume);
                        self.preview = Some(preview);
                    }
                    Err(err) => {
                        error!(error = %err, "resume update failed");
                        self.status = Some(format!("Failed to save resume: {}", err.summary()));
                    }
                }
            }
            Message::Downloaded(result) => {
                self.busy = false;
                self.status = Some(match result {
                    Ok(path) => format!("Saved {}", path.display()),
                    Err(err) => {
                        error!(error = %err, "PDF download failed");
                        format!("Failed to download PDF: {}", err.summary())
                    }
                });
            }
            Message::Previewed(result) => match result {
                Ok(preview) => self.preview = Some(preview),
                Err(err) => {
                    error!(error = %err, "preview failed");
                    self.status = Some(format!("Preview unavailable: {}", err.summary()));
                }
            },
        }
    }
}

/// Runs commands on worker threads and posts results back over a channel.
struct Runtime {
    api: Arc<dyn DashboardApi>,
    workflow: ResumeWorkflow,
    client_id: String,
    tx: Sender<Message>,
}

impl Runtime {
    fn dispatch(&self, command: Command) {
        if command == Command::Quit {
            return;
        }
        debug!(?command, "dispatching");
        let api = Arc::clone(&self.api);
        let workflow = self.workflow.clone();
        let client_id = self.client_id.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let message = match command {
                Command::LoadPage { route, generation } => Message::Page {
                    generation,
                    data: PageData::fetch(api.as_ref(), route, &client_id),
                },
                Command::LoadUser => Message::User(ShellUser::fetch(api.as_ref(), &client_id)),
                Command::Generate(role) => Message::Generated(workflow.generate(&role)),
                Command::Edit { resume, summary } => Message::Edited(workflow.edit(&resume, &summary)),
                Command::Download(resume) => Message::Downloaded(workflow.download(&resume)),
                Command::Preview(id) => Message::Previewed(workflow.preview(&id)),
                Command::Quit => return,
            };
            // The receiver is gone once the UI has exited.
            let _ = tx.send(message);
        });
    }
}

pub fn run(config: &Config, ui: UiState) -> Result<()> {
    let api: Arc<dyn DashboardApi> = Arc::new(HttpDashboardApi::new(config)?);
    let legacy: Arc<dyn LegacyPdfService> = Arc::new(HttpPdfService::new(config)?);
    let workflow = ResumeWorkflow::new(
        Arc::clone(&api),
        legacy,
        config.resume_backend,
        config.download_dir.clone(),
    );
    let (tx, rx) = mpsc::channel();
    let runtime = Runtime {
        api,
        workflow,
        client_id: config.client_id.clone(),
        tx,
    };

    let (mut app, commands) = App::start(ui, config.resume_backend);
    for command in commands {
        runtime.dispatch(command);
    }
    info!(route = app.ui.route.path(), role = app.ui.role.as_str(), "starting dashboard");

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app, &runtime, &rx);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    runtime: &Runtime,
    rx: &Receiver<Message>,
) -> Result<()> {
    loop {
        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        terminal.draw(|frame| draw(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key.code) {
                Some(Command::Quit) => break,
                Some(command) => runtime.dispatch(command),
                None => {}
            }
        }
    }
    Ok(())
}
