use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Counts and scores sometimes arrive as floats (91.5); round them.
fn rounded_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    Ok(value.round().clamp(0.0, u32::MAX as f64) as u32)
}

// --- Enums shared across pages ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Viewed,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// Pipeline order.
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Viewed,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Viewed => "viewed",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Viewed => "Viewed",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "Unknown status '{}'. Expected one of: applied, viewed, interview, offer, rejected",
                    s
                )
            })
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlaStatus {
    #[default]
    OnTrack,
    Behind,
    Urgent,
}

impl SlaStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SlaStatus::OnTrack => "On Track",
            SlaStatus::Behind => "Behind",
            SlaStatus::Urgent => "Urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[serde(alias = "Silver")]
    Silver,
    #[serde(alias = "Gold")]
    Gold,
    #[default]
    #[serde(alias = "LaunchPad", alias = "Career LaunchPad", alias = "career-launchpad")]
    Launchpad,
}

impl Plan {
    pub fn label(&self) -> &'static str {
        match self {
            Plan::Silver => "Silver",
            Plan::Gold => "Gold",
            Plan::Launchpad => "Career LaunchPad",
        }
    }

    /// Applications per month included in the plan.
    pub fn monthly_limit(&self) -> u32 {
        match self {
            Plan::Silver => 60,
            Plan::Gold => 100,
            Plan::Launchpad => 200,
        }
    }

    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Plan::Silver => &["60 Applications/Month", "Basic Analytics"],
            Plan::Gold => &[
                "100 Applications/Month",
                "Full Analytics",
                "Recruiter Outreach",
            ],
            Plan::Launchpad => &[
                "200 Applications/Month",
                "Advanced Analytics",
                "Recruiter Outreach",
                "Interview Coaching",
                "Dedicated Strategist",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Staff,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Customer, Role::Staff, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }

    pub fn next(&self) -> Role {
        match self {
            Role::Customer => Role::Staff,
            Role::Staff => Role::Admin,
            Role::Admin => Role::Customer,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            _ => Err(format!(
                "Unknown role '{}'. Expected one of: customer, staff, admin",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Video,
    Phone,
    #[default]
    #[serde(alias = "in-person", alias = "in_person")]
    Onsite,
}

impl InterviewType {
    pub fn label(&self) -> &'static str {
        match self {
            InterviewType::Video => "Video",
            InterviewType::Phone => "Phone",
            InterviewType::Onsite => "Onsite",
        }
    }
}

// --- Metrics ---

/// KPI values arrive either as numbers (47) or preformatted text ("18%").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::Text("...".to_string())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => f.write_str(&format_number(*n)),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Integral values print without a decimal point; others keep one place.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{:.1}", n)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metric {
    #[serde(deserialize_with = "null_as_default")]
    pub value: MetricValue,
    pub trend: Option<f64>, // percent change vs last month
    #[serde(alias = "trendData", alias = "trend_data", deserialize_with = "null_as_default")]
    pub history: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kpi {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(flatten)]
    pub metric: Metric,
}

// --- Customer dashboard ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardUser {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "plan_name", alias = "plan", deserialize_with = "null_as_default")]
    pub plan_name: Plan,
    #[serde(alias = "total_quota", deserialize_with = "rounded_count")]
    pub total_quota: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerMetrics {
    #[serde(alias = "applications_submitted", deserialize_with = "null_as_default")]
    pub applications_submitted: Metric,
    #[serde(alias = "remaining_quota", deserialize_with = "null_as_default")]
    pub remaining_quota: Metric,
    #[serde(alias = "interview_conversion", deserialize_with = "null_as_default")]
    pub interview_conversion: Metric,
    #[serde(alias = "avg_ats_score", alias = "avgATSScore", deserialize_with = "null_as_default")]
    pub avg_ats_score: Metric,
}

impl CustomerMetrics {
    pub fn tiles(&self) -> [(&'static str, &Metric); 4] {
        [
            ("Applications Submitted", &self.applications_submitted),
            ("Remaining Quota", &self.remaining_quota),
            ("Interview Conversion", &self.interview_conversion),
            ("Avg ATS Score", &self.avg_ats_score),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationCard {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(alias = "job_title", deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(alias = "dateApplied", alias = "applied_date", alias = "date_applied", deserialize_with = "null_as_default")]
    pub applied_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: ApplicationStatus,
    #[serde(alias = "ats_score", deserialize_with = "rounded_count")]
    pub ats_score: u32,
    #[serde(alias = "resume_version", deserialize_with = "null_as_default")]
    pub resume_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub salary: String,
}

/// Cards grouped by stage; the grouping keys are fixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    #[serde(deserialize_with = "null_as_default")]
    pub applied: Vec<ApplicationCard>,
    #[serde(deserialize_with = "null_as_default")]
    pub viewed: Vec<ApplicationCard>,
    #[serde(deserialize_with = "null_as_default")]
    pub interview: Vec<ApplicationCard>,
    #[serde(deserialize_with = "null_as_default")]
    pub offer: Vec<ApplicationCard>,
    #[serde(deserialize_with = "null_as_default")]
    pub rejected: Vec<ApplicationCard>,
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineStage<'a> {
    pub key: ApplicationStatus,
    pub cards: &'a [ApplicationCard],
}

impl Pipeline {
    pub fn stage(&self, key: ApplicationStatus) -> &[ApplicationCard] {
        match key {
            ApplicationStatus::Applied => &self.applied,
            ApplicationStatus::Viewed => &self.viewed,
            ApplicationStatus::Interview => &self.interview,
            ApplicationStatus::Offer => &self.offer,
            ApplicationStatus::Rejected => &self.rejected,
        }
    }

    pub fn stages(&self) -> impl Iterator<Item = PipelineStage<'_>> {
        ApplicationStatus::ALL.into_iter().map(|key| PipelineStage {
            key,
            cards: self.stage(key),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeVersion {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "target_role", deserialize_with = "null_as_default")]
    pub target_role: String,
    #[serde(alias = "ats_score", deserialize_with = "rounded_count")]
    pub ats_score: u32,
    #[serde(alias = "usedIn", alias = "used_in", alias = "used_in_apps", deserialize_with = "rounded_count")]
    pub used_in_apps: u32,
    #[serde(alias = "success_rate", deserialize_with = "null_as_default")]
    pub success_rate: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(alias = "last_updated", deserialize_with = "null_as_default")]
    pub last_updated: String,
    pub content: Value, // opaque; only `summary` is edited here
}

impl ResumeVersion {
    pub fn summary(&self) -> &str {
        self.content
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The stored content with `summary` replaced and every other key kept.
    pub fn content_with_summary(&self, summary: &str) -> Value {
        let mut content = match &self.content {
            Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        content.insert("summary".to_string(), Value::String(summary.to_string()));
        Value::Object(content)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Interview {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(alias = "job_title", deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: InterviewType,
    pub platform: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "meeting_link")]
    pub meeting_link: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub interviewers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(alias = "preparation_status", deserialize_with = "null_as_default")]
    pub preparation_status: String, // "Ready", "In Progress", "Pending"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PastInterview {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(alias = "job_title", deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub outcome: String,
    #[serde(deserialize_with = "null_as_default")]
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewSchedule {
    #[serde(deserialize_with = "null_as_default")]
    pub upcoming: Vec<Interview>,
    #[serde(deserialize_with = "null_as_default")]
    pub past: Vec<PastInterview>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityEvent {
    #[serde(alias = "text", deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(alias = "time", deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String, // "application", "resume", "interview", "response"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDashboard {
    #[serde(deserialize_with = "null_as_default")]
    pub user: DashboardUser,
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: CustomerMetrics,
    #[serde(deserialize_with = "null_as_default")]
    pub pipeline: Pipeline,
    #[serde(alias = "resume_versions", deserialize_with = "null_as_default")]
    pub resume_versions: Vec<ResumeVersion>,
    #[serde(alias = "activityFeed", alias = "activity_feed", deserialize_with = "null_as_default")]
    pub activity: Vec<ActivityEvent>,
    #[serde(deserialize_with = "null_as_default")]
    pub interviews: InterviewSchedule,
}

// --- Staff dashboard ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkItem {
    #[serde(deserialize_with = "null_as_default")]
    pub client: String,
    #[serde(deserialize_with = "null_as_default")]
    pub plan: Plan,
    #[serde(alias = "apps_due_today", deserialize_with = "rounded_count")]
    pub apps_due_today: u32,
    #[serde(alias = "pending_resumes", deserialize_with = "rounded_count")]
    pub pending_resumes: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub sla: SlaStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeTask {
    #[serde(deserialize_with = "null_as_default")]
    pub client: String,
    #[serde(alias = "job_title", deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(alias = "fit_score", deserialize_with = "rounded_count")]
    pub fit_score: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtsReview {
    #[serde(deserialize_with = "null_as_default")]
    pub client: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(alias = "ats_score", deserialize_with = "rounded_count")]
    pub ats_score: u32,
    #[serde(alias = "missing_keywords", deserialize_with = "null_as_default")]
    pub missing_keywords: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub suggestions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationTask {
    #[serde(deserialize_with = "null_as_default")]
    pub client: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(alias = "resume_ready", deserialize_with = "null_as_default")]
    pub resume_ready: bool,
    #[serde(alias = "cover_letter", deserialize_with = "null_as_default")]
    pub cover_letter: bool,
    #[serde(alias = "vpn_state", deserialize_with = "null_as_default")]
    pub vpn_state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffDashboard {
    #[serde(alias = "work_queue", deserialize_with = "null_as_default")]
    pub work_queue: Vec<WorkItem>,
    #[serde(alias = "resume_queue", deserialize_with = "null_as_default")]
    pub resume_queue: Vec<ResumeTask>,
    #[serde(alias = "ats_queue", deserialize_with = "null_as_default")]
    pub ats_queue: Vec<AtsReview>,
    #[serde(alias = "application_queue", deserialize_with = "null_as_default")]
    pub application_queue: Vec<ApplicationTask>,
}

// --- Admin dashboard ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecialistPerformance {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "rounded_count")]
    pub clients: u32,
    #[serde(deserialize_with = "rounded_count")]
    pub applications: u32,
    #[serde(alias = "avgATS", alias = "avg_ats", deserialize_with = "rounded_count")]
    pub avg_ats: u32,
    #[serde(alias = "interview_rate", deserialize_with = "null_as_default")]
    pub interview_rate: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub performance: String, // "excellent", "good", "average"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanShare {
    #[serde(alias = "name", deserialize_with = "null_as_default")]
    pub plan: Plan,
    #[serde(alias = "value", deserialize_with = "rounded_count")]
    pub clients: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheck {
    #[serde(deserialize_with = "null_as_default")]
    pub metric: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String, // "excellent", "good", "warning"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminDashboard {
    #[serde(deserialize_with = "null_as_default")]
    pub kpis: Vec<Kpi>,
    #[serde(alias = "specialistPerformance", alias = "specialist_performance", deserialize_with = "null_as_default")]
    pub specialists: Vec<SpecialistPerformance>,
    #[serde(alias = "plan_distribution", deserialize_with = "null_as_default")]
    pub plan_distribution: Vec<PlanShare>,
    #[serde(alias = "system_health", deserialize_with = "null_as_default")]
    pub system_health: Vec<HealthCheck>,
}

// --- Analytics ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyTrend {
    #[serde(deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(deserialize_with = "rounded_count")]
    pub applications: u32,
    #[serde(deserialize_with = "rounded_count")]
    pub interviews: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusShare {
    #[serde(alias = "name", deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(alias = "value", deserialize_with = "rounded_count")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePerformance {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "rounded_count")]
    pub apps: u32,
    #[serde(deserialize_with = "rounded_count")]
    pub interviews: u32,
    #[serde(deserialize_with = "rounded_count")]
    pub offers: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyActivity {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "rounded_count")]
    pub applications: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsView {
    #[serde(deserialize_with = "null_as_default")]
    pub kpis: Vec<Kpi>,
    #[serde(alias = "application_trend", deserialize_with = "null_as_default")]
    pub application_trend: Vec<MonthlyTrend>,
    #[serde(alias = "status_distribution", deserialize_with = "null_as_default")]
    pub status_distribution: Vec<StatusShare>,
    #[serde(alias = "role_performance", deserialize_with = "null_as_default")]
    pub role_performance: Vec<RolePerformance>,
    #[serde(alias = "top_companies", deserialize_with = "null_as_default")]
    pub top_companies: Vec<CompanyActivity>,
}

// --- Applications page ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ApplicationsPayload")]
pub struct ApplicationsView {
    #[serde(deserialize_with = "null_as_default")]
    pub applications: Vec<ApplicationCard>,
}

/// The endpoint has served both a wrapped object and a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ApplicationsPayload {
    Wrapped {
        #[serde(default, deserialize_with = "null_as_default")]
        applications: Vec<ApplicationCard>,
    },
    Bare(Vec<ApplicationCard>),
}

impl From<ApplicationsPayload> for ApplicationsView {
    fn from(payload: ApplicationsPayload) -> Self {
        let applications = match payload {
            ApplicationsPayload::Wrapped { applications } => applications,
            ApplicationsPayload::Bare(applications) => applications,
        };
        ApplicationsView { applications }
    }
}

// --- Pages projected from the customer dashboard ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumesView {
    pub versions: Vec<ResumeVersion>,
}

impl ResumesView {
    pub fn total_applications(&self) -> u32 {
        self.versions.iter().map(|r| r.used_in_apps).sum()
    }

    pub fn average_ats_score(&self) -> u32 {
        if self.versions.is_empty() {
            return 0;
        }
        let total: u32 = self.versions.iter().map(|r| r.ats_score).sum();
        (total as f64 / self.versions.len() as f64).round() as u32
    }

    /// Swap in the server's copy of a resume; unknown ids go to the front.
    pub fn replace(&mut self, resume: ResumeVersion) {
        match self.versions.iter_mut().find(|r| r.id == resume.id) {
            Some(slot) => *slot = resume,
            None => self.versions.insert(0, resume),
        }
    }
}

impl From<CustomerDashboard> for ResumesView {
    fn from(dashboard: CustomerDashboard) -> Self {
        ResumesView {
            versions: dashboard.resume_versions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsView {
    pub user: DashboardUser,
}

impl From<CustomerDashboard> for SettingsView {
    fn from(dashboard: CustomerDashboard) -> Self {
        SettingsView {
            user: dashboard.user,
        }
    }
}

// --- Wire envelopes ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest<'a> {
    pub target_role: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateResumeRequest<'a> {
    pub content: &'a Value,
}

#[derive(Debug, Deserialize)]
pub struct ResumeEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub resume: ResumeVersion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_dashboard_decodes_camel_case() {
        let body = json!({
            "user": { "name": "John Doe", "planName": "gold", "totalQuota": 100 },
            "metrics": {
                "applicationsSubmitted": { "value": 47, "trend": 15, "trendData": [32, 35, 47] },
                "interviewConversion": { "value": "18%", "trend": 12 }
            },
            "pipeline": {
                "offer": [{ "jobTitle": "Senior React Developer", "company": "Cloud Solutions",
                            "status": "offer", "atsScore": 98, "dateApplied": "Feb 1, 2026" }]
            },
            "resumeVersions": [{ "id": "RES001", "targetRole": "Senior Software Engineer",
                                 "atsScore": 96, "usedIn": 12, "content": { "summary": "Builder." } }],
            "activityFeed": [{ "text": "Application submitted to Tech Corp", "time": "2 hours ago",
                               "type": "application" }]
        });

        let dashboard: CustomerDashboard = serde_json::from_value(body).unwrap();
        assert_eq!(dashboard.user.name, "John Doe");
        assert_eq!(dashboard.user.plan_name, Plan::Gold);
        assert_eq!(dashboard.metrics.applications_submitted.value, MetricValue::Number(47.0));
        assert_eq!(dashboard.metrics.applications_submitted.history, vec![32.0, 35.0, 47.0]);
        assert_eq!(dashboard.metrics.interview_conversion.value.to_string(), "18%");
        assert_eq!(dashboard.metrics.remaining_quota, Metric::default());
        assert_eq!(dashboard.pipeline.offer[0].applied_date, "Feb 1, 2026");
        assert_eq!(dashboard.resume_versions[0].used_in_apps, 12);
        assert_eq!(dashboard.resume_versions[0].summary(), "Builder.");
        assert_eq!(dashboard.activity[0].message, "Application submitted to Tech Corp");
        assert!(dashboard.interviews.upcoming.is_empty());
    }

    #[test]
    fn test_snake_case_fields_are_accepted() {
        let body = json!({
            "user": { "name": "Ada", "plan_name": "silver", "total_quota": 60 },
            "resume_versions": [{ "id": "R1", "target_role": "Data Analyst", "ats_score": 91,
                                  "used_in_apps": 3 }]
        });
        let dashboard: CustomerDashboard = serde_json::from_value(body).unwrap();
        assert_eq!(dashboard.user.total_quota, 60);
        assert_eq!(dashboard.user.plan_name, Plan::Silver);
        assert_eq!(dashboard.resume_versions[0].target_role, "Data Analyst");
        assert_eq!(dashboard.resume_versions[0].used_in_apps, 3);
    }

    #[test]
    fn test_applications_view_accepts_bare_list() {
        let wrapped: ApplicationsView = serde_json::from_value(json!({
            "applications": [{ "id": "APP001", "jobTitle": "Lead Developer", "status": "interview" }]
        }))
        .unwrap();
        let bare: ApplicationsView = serde_json::from_value(json!([
            { "id": "APP001", "jobTitle": "Lead Developer", "status": "interview" }
        ]))
        .unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(bare.applications[0].status, ApplicationStatus::Interview);
    }

    #[test]
    fn test_null_fields_decode_as_defaults() {
        let view: ApplicationsView = serde_json::from_str(
            r#"{"applications":[{"id":"APP001","jobTitle":"Lead Developer","salary":null,
                "location":null,"status":null,"atsScore":null}]}"#,
        )
        .unwrap();
        let card = &view.applications[0];
        assert_eq!(card.job_title, "Lead Developer");
        assert_eq!(card.salary, "");
        assert_eq!(card.status, ApplicationStatus::Applied);
        assert_eq!(card.ats_score, 0);

        let view: ApplicationsView = serde_json::from_str(r#"{"applications":null}"#).unwrap();
        assert!(view.applications.is_empty());

        let dashboard: CustomerDashboard = serde_json::from_value(json!({
            "user": { "name": null, "planName": "gold" },
            "resumeVersions": [{ "id": "RES001", "keywords": null, "content": null }],
            "metrics": { "avgAtsScore": { "value": null, "trendData": null } }
        }))
        .unwrap();
        assert_eq!(dashboard.user.name, "");
        assert!(dashboard.resume_versions[0].keywords.is_empty());
        assert_eq!(dashboard.metrics.avg_ats_score.value, MetricValue::default());
    }

    #[test]
    fn test_fractional_scores_are_rounded() {
        let view: ApplicationsView = serde_json::from_str(
            r#"[{"id":"APP001","atsScore":91.5},{"id":"APP002","atsScore":87.2}]"#,
        )
        .unwrap();
        assert_eq!(view.applications[0].ats_score, 92);
        assert_eq!(view.applications[1].ats_score, 87);

        let resume: ResumeVersion =
            serde_json::from_value(json!({ "atsScore": 88.6, "usedInApps": 12 })).unwrap();
        assert_eq!(resume.ats_score, 89);
        assert_eq!(resume.used_in_apps, 12);
    }

    #[test]
    fn test_pipeline_stages_in_fixed_order() {
        let pipeline = Pipeline {
            interview: vec![ApplicationCard::default(), ApplicationCard::default()],
            ..Default::default()
        };
        let keys: Vec<ApplicationStatus> = pipeline.stages().map(|s| s.key).collect();
        assert_eq!(keys, ApplicationStatus::ALL.to_vec());
        let counts: Vec<usize> = pipeline.stages().map(|s| s.cards.len()).collect();
        assert_eq!(counts, vec![0, 0, 2, 0, 0]);
    }

    #[test]
    fn test_content_with_summary_keeps_other_keys() {
        let resume = ResumeVersion {
            id: "RES001".to_string(),
            content: json!({ "summary": "old", "experience": [1, 2] }),
            ..Default::default()
        };
        let updated = resume.content_with_summary("new");
        assert_eq!(updated["summary"], "new");
        assert_eq!(updated["experience"], json!([1, 2]));

        let blank = ResumeVersion::default();
        assert_eq!(blank.summary(), "");
        assert_eq!(blank.content_with_summary("x"), json!({ "summary": "x" }));
    }

    #[test]
    fn test_resumes_view_stats() {
        let view = ResumesView {
            versions: vec![
                ResumeVersion { ats_score: 96, used_in_apps: 12, ..Default::default() },
                ResumeVersion { ats_score: 93, used_in_apps: 8, ..Default::default() },
                ResumeVersion { ats_score: 95, used_in_apps: 15, ..Default::default() },
            ],
        };
        assert_eq!(view.total_applications(), 35);
        assert_eq!(view.average_ats_score(), 95);
        assert_eq!(ResumesView::default().average_ats_score(), 0);
    }

    #[test]
    fn test_resumes_view_replace_is_wholesale() {
        let mut view = ResumesView {
            versions: vec![ResumeVersion {
                id: "RES001".to_string(),
                keywords: vec!["React".to_string()],
                ..Default::default()
            }],
        };
        view.replace(ResumeVersion { id: "RES001".to_string(), ats_score: 97, ..Default::default() });
        assert_eq!(view.versions.len(), 1);
        assert_eq!(view.versions[0].ats_score, 97);
        assert!(view.versions[0].keywords.is_empty());

        view.replace(ResumeVersion { id: "RES009".to_string(), ..Default::default() });
        assert_eq!(view.versions[0].id, "RES009");
    }

    #[test]
    fn test_plan_labels_and_limits() {
        let plan: Plan = serde_json::from_value(json!("Career LaunchPad")).unwrap();
        assert_eq!(plan, Plan::Launchpad);
        assert_eq!(plan.label(), "Career LaunchPad");
        assert_eq!(Plan::Silver.monthly_limit(), 60);
        assert_eq!(Plan::Gold.monthly_limit(), 100);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Offer".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Offer);
        assert!("hired".parse::<ApplicationStatus>().is_err());
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_metric_value_display() {
        assert_eq!(MetricValue::Number(153.0).to_string(), "153");
        assert_eq!(MetricValue::Number(16.8).to_string(), "16.8");
        assert_eq!(MetricValue::default().to_string(), "...");
    }
}
