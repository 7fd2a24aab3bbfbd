use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AdminDashboard, AnalyticsView, ApplicationsView, CustomerDashboard, GenerateResumeRequest,
    ResumeEnvelope, ResumeVersion, StaffDashboard, UpdateResumeRequest,
};

// --- Dashboard API ---

pub trait DashboardApi: Send + Sync {
    fn customer_dashboard(&self, client_id: &str) -> ApiResult<CustomerDashboard>;
    fn staff_dashboard(&self) -> ApiResult<StaffDashboard>;
    fn admin_dashboard(&self) -> ApiResult<AdminDashboard>;
    fn analytics(&self) -> ApiResult<AnalyticsView>;
    fn applications(&self) -> ApiResult<ApplicationsView>;
    fn generate_resume(&self, target_role: &str) -> ApiResult<ResumeVersion>;
    fn update_resume(&self, id: &str, content: &Value) -> ApiResult<ResumeVersion>;
    fn resume_pdf(&self, id: &str) -> ApiResult<Vec<u8>>;
    /// Where the rendered PDF for `id` lives; also used as the preview source.
    fn resume_pdf_url(&self, id: &str) -> ApiResult<Url>;
}

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    base_url: Url,
    client: Client,
}

impl HttpDashboardApi {
    pub fn new(config: &Config) -> ApiResult<Self> {
        Ok(Self {
            base_url: config.api_url.clone(),
            client: build_client(config)?,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = endpoint(&self.base_url, segments)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| network_error(&url, source))?;
        decode(check_status(response, &url)?, &url)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: &B,
    ) -> ApiResult<T> {
        let url = endpoint(&self.base_url, segments)?;
        debug!(%url, %method, "sending");
        let response = self
            .client
            .request(method, url.clone())
            .json(body)
            .send()
            .map_err(|source| network_error(&url, source))?;
        decode(check_status(response, &url)?, &url)
    }
}

impl DashboardApi for HttpDashboardApi {
    fn customer_dashboard(&self, client_id: &str) -> ApiResult<CustomerDashboard> {
        self.get_json(&["api", "v1", "dashboard", client_id])
    }

    fn staff_dashboard(&self) -> ApiResult<StaffDashboard> {
        self.get_json(&["api", "v1", "dashboard", "staff"])
    }

    fn admin_dashboard(&self) -> ApiResult<AdminDashboard> {
        self.get_json(&["api", "v1", "dashboard", "admin"])
    }

    fn analytics(&self) -> ApiResult<AnalyticsView> {
        self.get_json(&["api", "v1", "dashboard", "analytics"])
    }

    fn applications(&self) -> ApiResult<ApplicationsView> {
        self.get_json(&["api", "v1", "dashboard", "applications"])
    }

    fn generate_resume(&self, target_role: &str) -> ApiResult<ResumeVersion> {
        let envelope: ResumeEnvelope = self.send_json(
            reqwest::Method::POST,
            &["api", "v1", "resumes", "generate"],
            &GenerateResumeRequest { target_role },
        )?;
        Ok(envelope.resume)
    }

    fn update_resume(&self, id: &str, content: &Value) -> ApiResult<ResumeVersion> {
        let envelope: ResumeEnvelope = self.send_json(
            reqwest::Method::PUT,
            &["api", "v1", "resumes", id],
            &UpdateResumeRequest { content },
        )?;
        Ok(envelope.resume)
    }

    fn resume_pdf(&self, id: &str) -> ApiResult<Vec<u8>> {
        let url = self.resume_pdf_url(id)?;
        debug!(%url, "GET pdf");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| network_error(&url, source))?;
        read_bytes(check_status(response, &url)?, &url)
    }

    fn resume_pdf_url(&self, id: &str) -> ApiResult<Url> {
        endpoint(&self.base_url, &["api", "v1", "resumes", id, "pdf"])
    }
}

// --- Legacy PDF service ---

/// The standalone PDF generator that predates the dashboard API.
pub trait LegacyPdfService: Send + Sync {
    fn generate_pdf(&self, target_role: &str) -> ApiResult<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpPdfService {
    base_url: Url,
    client: Client,
}

impl HttpPdfService {
    pub fn new(config: &Config) -> ApiResult<Self> {
        Ok(Self {
            base_url: config.pdf_service_url.clone(),
            client: build_client(config)?,
        })
    }
}

impl LegacyPdfService for HttpPdfService {
    fn generate_pdf(&self, target_role: &str) -> ApiResult<Vec<u8>> {
        let url = endpoint(&self.base_url, &["generate-pdf"])?;
        debug!(%url, "POST generate-pdf");
        let response = self
            .client
            .post(url.clone())
            .json(&GenerateResumeRequest { target_role })
            .send()
            .map_err(|source| network_error(&url, source))?;
        read_bytes(check_status(response, &url)?, &url)
    }
}

// --- Helpers ---

fn build_client(config: &Config) -> ApiResult<Client> {
    Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(ApiError::Client)
}

/// Append percent-encoded path segments to `base`, keeping any base path.
pub fn endpoint(base: &Url, segments: &[&str]) -> ApiResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidInput(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn network_error(url: &Url, source: reqwest::Error) -> ApiError {
    ApiError::Network {
        url: url.to_string(),
        source,
    }
}

fn check_status(response: Response, url: &Url) -> ApiResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().unwrap_or_default();
    Err(ApiError::Status {
        url: url.to_string(),
        status,
        body,
    })
}

fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> ApiResult<T> {
    response.json::<T>().map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

fn read_bytes(response: Response, url: &Url) -> ApiResult<Vec<u8>> {
    response
        .bytes()
        .map(|bytes| bytes.to_vec())
        .map_err(|source| network_error(url, source))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn local_config(api_url: &str) -> Config {
        let url = api_url.to_string();
        let mut config = Config::from_lookup(move |key| {
            (key == "CONCIERGE_API_URL").then(|| url.clone())
        })
        .unwrap();
        config.timeout = Duration::from_secs(2);
        config
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let base = Url::parse("http://127.0.0.1:8000").unwrap();
        let url = endpoint(&base, &["api", "v1", "dashboard", "admin"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/dashboard/admin");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("https://example.com/concierge/").unwrap();
        let url = endpoint(&base, &["api", "v1", "resumes", "RES001", "pdf"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/concierge/api/v1/resumes/RES001/pdf");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let base = Url::parse("http://api").unwrap();
        let url = endpoint(&base, &["api", "v1", "dashboard", "client/../admin"]).unwrap();
        assert_eq!(url.as_str(), "http://api/api/v1/dashboard/client%2F..%2Fadmin");
    }

    #[test]
    fn test_pdf_url_for_resume() {
        let api = HttpDashboardApi::new(&local_config("http://localhost:8000")).unwrap();
        let url = api.resume_pdf_url("RES003").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/resumes/RES003/pdf");
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on any sane test host.
        let api = HttpDashboardApi::new(&local_config("http://127.0.0.1:9")).unwrap();
        let err = api.admin_dashboard().unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
        assert!(err.to_string().contains("/api/v1/dashboard/admin"));
    }
}
