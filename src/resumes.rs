use chrono::Utc;
use regex::Regex;
use reqwest::Url;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, LazyLock};
use tracing::info;

use crate::api::{DashboardApi, LegacyPdfService};
use crate::config::ResumeBackend;
use crate::error::{ApiError, ApiResult};
use crate::models::ResumeVersion;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("file name pattern is valid"));

/// Hands out strictly increasing values for the preview's `v` parameter.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicI64,
}

impl CacheBuster {
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(now.max(prev + 1)))
            .unwrap_or_else(|prev| prev);
        now.max(prev + 1)
    }
}

/// A rendered-PDF URL for one resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub resume_id: String,
    pub url: Url,
}

impl Preview {
    pub fn version(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Debug)]
pub enum GenerateOutcome {
    /// Dashboard backend: the saved record and a preview of it.
    Saved { resume: ResumeVersion, preview: Preview },
    /// Legacy backend: the PDF was written to disk.
    Downloaded(PathBuf),
}

#[derive(Debug)]
pub struct EditOutcome {
    pub resume: ResumeVersion,
    pub preview: Preview,
}

/// `Senior Software Engineer` -> `Senior_Software_Engineer_Resume.pdf`
///
/// Anything outside `[A-Za-z0-9_-]` becomes `_`, so the name can never leave
/// the download directory.
pub fn pdf_file_name(target_role: &str) -> String {
    let role = WHITESPACE.replace_all(target_role.trim(), "_");
    let role = UNSAFE_FILE_CHARS.replace_all(&role, "_");
    let role = if role.is_empty() { "Untitled".into() } else { role };
    format!("{}_Resume.pdf", role)
}

/// Generate, edit and download resumes against whichever backend is configured.
#[derive(Clone)]
pub struct ResumeWorkflow {
    api: Arc<dyn DashboardApi>,
    legacy: Arc<dyn LegacyPdfService>,
    backend: ResumeBackend,
    download_dir: PathBuf,
    cache: Arc<CacheBuster>,
}

impl ResumeWorkflow {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        legacy: Arc<dyn LegacyPdfService>,
        backend: ResumeBackend,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            legacy,
            backend,
            download_dir,
            cache: Arc::new(CacheBuster::default()),
        }
    }

    /// A fresh preview URL; each call carries a new `v` so viewers re-render.
    pub fn preview(&self, resume_id: &str) -> ApiResult<Preview> {
        let mut url = self.api.resume_pdf_url(resume_id)?;
        url.query_pairs_mut()
            .append_pair("v", &self.cache.next().to_string());
        Ok(Preview {
            resume_id: resume_id.to_string(),
            url,
        })
    }

    pub fn generate(&self, target_role: &str) -> ApiResult<GenerateOutcome> {
        let target_role = target_role.trim();
        if target_role.is_empty() {
            return Err(ApiError::InvalidInput("Target role is required".to_string()));
        }

        match self.backend {
            ResumeBackend::Dashboard => {
                let resume = self.api.generate_resume(target_role)?;
                info!(id = %resume.id, role = target_role, "resume generated");
                let preview = self.preview(&resume.id)?;
                Ok(GenerateOutcome::Saved { resume, preview })
            }
            ResumeBackend::Legacy => {
                let bytes = self.legacy.generate_pdf(target_role)?;
                let file_name = format!("Tailored_{}", pdf_file_name(target_role));
                let path = self.write_pdf(&file_name, &bytes)?;
                info!(path = %path.display(), role = target_role, "resume generated by PDF service");
                Ok(GenerateOutcome::Downloaded(path))
            }
        }
    }

    /// Send the new summary back; the server's copy replaces ours.
    pub fn edit(&self, resume: &ResumeVersion, summary: &str) -> ApiResult<EditOutcome> {
        let content = resume.content_with_summary(summary);
        let updated = self.api.update_resume(&resume.id, &content)?;
        info!(id = %updated.id, "resume updated");
        let preview = self.preview(&updated.id)?;
        Ok(EditOutcome {
            resume: updated,
            preview,
        })
    }

    pub fn download(&self, resume: &ResumeVersion) -> ApiResult<PathBuf> {
        let bytes = self.api.resume_pdf(&resume.id)?;
        let role = if resume.target_role.is_empty() {
            resume.display_name()
        } else {
            resume.target_role.as_str()
        };
        let path = self.write_pdf(&pdf_file_name(role), &bytes)?;
        info!(id = %resume.id, path = %path.display(), "resume downloaded");
        Ok(path)
    }

    fn write_pdf(&self, file_name: &str, bytes: &[u8]) -> ApiResult<PathBuf> {
        std::fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{StubApi, StubPdfService};
    use serde_json::json;
    use std::path::Path;

    fn workflow(api: StubApi, backend: ResumeBackend, dir: &Path) -> ResumeWorkflow {
        ResumeWorkflow::new(
            Arc::new(api),
            Arc::new(StubPdfService { pdf: Some(b"%PDF-legacy".to_vec()) }),
            backend,
            dir.to_path_buf(),
        )
    }

    fn resume() -> ResumeVersion {
        ResumeVersion {
            id: "RES001".to_string(),
            name: "SWE_TechStack_v3".to_string(),
            target_role: "Senior Software Engineer".to_string(),
            content: json!({ "summary": "Ships things.", "skills": ["Rust"] }),
            ..Default::default()
        }
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("Senior Software Engineer"), "Senior_Software_Engineer_Resume.pdf");
        assert_eq!(pdf_file_name("  Data\t  Analyst "), "Data_Analyst_Resume.pdf");
        assert_eq!(pdf_file_name(""), "Untitled_Resume.pdf");
    }

    #[test]
    fn test_pdf_file_name_strips_path_separators() {
        assert_eq!(pdf_file_name("Frontend/Backend Engineer"), "Frontend_Backend_Engineer_Resume.pdf");
        assert_eq!(pdf_file_name("../escaped"), "___escaped_Resume.pdf");
        assert_eq!(pdf_file_name(r"C:\temp\x"), "C__temp_x_Resume.pdf");
        assert_eq!(pdf_file_name("C++ Dev (Sr.)"), "C___Dev__Sr___Resume.pdf");
    }

    #[test]
    fn test_download_stays_inside_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = dir.path().join("downloads");
        let api = StubApi { pdf: Some(b"%PDF-1.7".to_vec()), ..Default::default() };
        let flow = workflow(api, ResumeBackend::Dashboard, &downloads);

        for role in ["Frontend/Backend Engineer", "../escaped"] {
            let resume = ResumeVersion { target_role: role.to_string(), ..resume() };
            let path = flow.download(&resume).unwrap();
            assert_eq!(path.parent(), Some(downloads.as_path()));
            assert!(path.exists());
        }
        assert!(!dir.path().join("escaped_Resume.pdf").exists());
    }

    #[test]
    fn test_cache_buster_strictly_increases() {
        let cache = CacheBuster::default();
        let mut last = cache.next();
        for _ in 0..100 {
            let next = cache.next();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_edit_refreshes_preview_for_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let flow = workflow(StubApi::default(), ResumeBackend::Dashboard, dir.path());
        let original = resume();

        let before = flow.preview(&original.id).unwrap();
        let outcome = flow.edit(&original, "Leads teams.").unwrap();

        assert_eq!(outcome.resume.id, "RES001");
        assert_eq!(outcome.preview.resume_id, before.resume_id);
        assert_eq!(outcome.preview.url.path(), before.url.path());
        assert!(outcome.preview.url.path().ends_with("/api/v1/resumes/RES001/pdf"));
        assert_ne!(outcome.preview.version(), before.version());
        assert!(outcome.preview.version().is_some());
    }

    #[test]
    fn test_edit_sends_full_content_and_takes_server_copy() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(StubApi::default());
        let flow = ResumeWorkflow::new(
            api.clone(),
            Arc::new(StubPdfService::default()),
            ResumeBackend::Dashboard,
            dir.path().to_path_buf(),
        );

        let outcome = flow.edit(&resume(), "Leads teams.").unwrap();

        let updates = api.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "RES001");
        assert_eq!(updates[0].1, json!({ "summary": "Leads teams.", "skills": ["Rust"] }));
        // Server response wins wholesale: fields it omitted are gone locally.
        assert_eq!(outcome.resume.last_updated, "just now");
        assert!(outcome.resume.target_role.is_empty());
        assert_eq!(outcome.resume.summary(), "Leads teams.");
    }

    #[test]
    fn test_failed_edit_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let api = StubApi { fail_writes: true, ..Default::default() };
        let flow = workflow(api, ResumeBackend::Dashboard, dir.path());
        assert!(matches!(flow.edit(&resume(), "x"), Err(ApiError::Status { .. })));
    }

    #[test]
    fn test_generate_rejects_blank_role() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(StubApi::default());
        let flow = ResumeWorkflow::new(
            api.clone(),
            Arc::new(StubPdfService::default()),
            ResumeBackend::Dashboard,
            dir.path().to_path_buf(),
        );
        assert!(matches!(flow.generate("   "), Err(ApiError::InvalidInput(_))));
        assert!(api.generated.lock().unwrap().is_empty());
    }

    #[test]
    fn test_generate_with_dashboard_backend_opens_preview() {
        let dir = tempfile::tempdir().unwrap();
        let flow = workflow(StubApi::default(), ResumeBackend::Dashboard, dir.path());
        match flow.generate(" Platform Engineer ").unwrap() {
            GenerateOutcome::Saved { resume, preview } => {
                assert_eq!(resume.target_role, "Platform Engineer");
                assert_eq!(preview.resume_id, resume.id);
            }
            other => panic!("expected saved resume, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_with_legacy_backend_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let flow = workflow(StubApi::default(), ResumeBackend::Legacy, dir.path());
        match flow.generate("Data Analyst").unwrap() {
            GenerateOutcome::Downloaded(path) => {
                assert_eq!(path, dir.path().join("Tailored_Data_Analyst_Resume.pdf"));
                assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-legacy");
            }
            other => panic!("expected download, got {:?}", other),
        }
    }

    #[test]
    fn test_download_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let api = StubApi { pdf: Some(b"%PDF-1.7".to_vec()), ..Default::default() };
        let flow = workflow(api, ResumeBackend::Dashboard, &dir.path().join("nested"));
        let path = flow.download(&resume()).unwrap();
        assert_eq!(path.file_name().unwrap(), "Senior_Software_Engineer_Resume.pdf");
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_download_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let flow = workflow(StubApi::default(), ResumeBackend::Dashboard, dir.path());
        assert!(flow.download(&resume()).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
