use anyhow::{Context, Result, bail};
use reqwest::Url;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_PDF_SERVICE_URL: &str = "http://localhost:3001";
const DEFAULT_CLIENT_ID: &str = "test-client-123";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which service `resume generate` talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumeBackend {
    /// `POST /api/v1/resumes/generate` on the dashboard API, then preview.
    #[default]
    Dashboard,
    /// `POST /generate-pdf` on the standalone PDF service, saved to disk.
    Legacy,
}

impl ResumeBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeBackend::Dashboard => "dashboard",
            ResumeBackend::Legacy => "legacy",
        }
    }
}

impl FromStr for ResumeBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "api" => Ok(ResumeBackend::Dashboard),
            "legacy" | "pdf-service" => Ok(ResumeBackend::Legacy),
            _ => Err(format!(
                "Unknown resume backend '{}'. Expected 'dashboard' or 'legacy'",
                s
            )),
        }
    }
}

/// Client configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub pdf_service_url: Url,
    pub client_id: String,
    pub resume_backend: ResumeBackend,
    pub timeout: Duration,
    pub rust_log: String,
    pub data_dir: PathBuf,
    pub download_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = parse_url(
            "CONCIERGE_API_URL",
            &get("CONCIERGE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;
        let pdf_service_url = parse_url(
            "CONCIERGE_PDF_SERVICE_URL",
            &get("CONCIERGE_PDF_SERVICE_URL").unwrap_or_else(|| DEFAULT_PDF_SERVICE_URL.to_string()),
        )?;

        let resume_backend = match get("CONCIERGE_RESUME_BACKEND") {
            Some(raw) => raw
                .parse::<ResumeBackend>()
                .map_err(anyhow::Error::msg)
                .context("CONCIERGE_RESUME_BACKEND is invalid")?,
            None => ResumeBackend::default(),
        };

        let timeout_secs = match get("CONCIERGE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("CONCIERGE_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("CONCIERGE_TIMEOUT_SECS must be greater than zero");
        }

        let data_dir = get("CONCIERGE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let download_dir = get("CONCIERGE_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("downloads"));

        Ok(Config {
            api_url,
            pdf_service_url,
            client_id: get("CONCIERGE_CLIENT_ID").unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            resume_backend,
            timeout: Duration::from_secs(timeout_secs),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            data_dir,
            download_dir,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("concierge.log")
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("{} is not a valid URL: '{}'", key, raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{} must be an http(s) URL, got '{}'", key, raw);
    }
    Ok(url)
}

fn default_data_dir() -> PathBuf {
    // Use XDG data directory or fallback
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "concierge") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        PathBuf::from(".concierge")
    }
}
