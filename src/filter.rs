use std::fmt;
use std::str::FromStr;

use crate::models::{ApplicationCard, ApplicationStatus};

pub const EMPTY_MESSAGE: &str = "No applications found matching your criteria.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    /// Options in the order the status selector offers them.
    pub const OPTIONS: [StatusFilter; 6] = [
        StatusFilter::All,
        StatusFilter::Only(ApplicationStatus::Applied),
        StatusFilter::Only(ApplicationStatus::Viewed),
        StatusFilter::Only(ApplicationStatus::Interview),
        StatusFilter::Only(ApplicationStatus::Offer),
        StatusFilter::Only(ApplicationStatus::Rejected),
    ];

    pub fn matches(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    pub fn next(&self) -> StatusFilter {
        let idx = Self::OPTIONS.iter().position(|o| o == self).unwrap_or(0);
        Self::OPTIONS[(idx + 1) % Self::OPTIONS.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<ApplicationStatus>().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Search box plus status selector for the applications page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl ApplicationFilter {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    /// Case-insensitive substring on title or company, and the status filter.
    pub fn matches(&self, card: &ApplicationCard) -> bool {
        let needle = self.query.to_lowercase();
        let matches_search = card.job_title.to_lowercase().contains(&needle)
            || card.company.to_lowercase().contains(&needle);
        matches_search && self.status.matches(card.status)
    }

    pub fn apply<'a>(&self, applications: &'a [ApplicationCard]) -> Vec<&'a ApplicationCard> {
        applications.iter().filter(|card| self.matches(card)).collect()
    }
}

/// Header counts, always over the unfiltered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplicationStats {
    pub total: usize,
    pub interviews: usize,
    pub offers: usize,
    pub pending: usize,
}

impl ApplicationStats {
    pub fn from_cards(applications: &[ApplicationCard]) -> Self {
        let count = |pred: fn(ApplicationStatus) -> bool| {
            applications.iter().filter(|a| pred(a.status)).count()
        };
        Self {
            total: applications.len(),
            interviews: count(|s| s == ApplicationStatus::Interview),
            offers: count(|s| s == ApplicationStatus::Offer),
            pending: count(|s| matches!(s, ApplicationStatus::Applied | ApplicationStatus::Viewed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, company: &str, status: ApplicationStatus) -> ApplicationCard {
        ApplicationCard {
            job_title: title.to_string(),
            company: company.to_string(),
            status,
            ..Default::default()
        }
    }

    fn sample() -> Vec<ApplicationCard> {
        vec![
            card("Senior Software Engineer", "Tech Corp", ApplicationStatus::Interview),
            card("Full Stack Developer", "StartupXYZ", ApplicationStatus::Applied),
            card("Frontend Engineer", "Digital Agency", ApplicationStatus::Viewed),
            card("Lead Developer", "Finance Inc", ApplicationStatus::Interview),
            card("Senior React Developer", "Cloud Solutions", ApplicationStatus::Offer),
            card("DevOps Engineer", "Infrastructure Co", ApplicationStatus::Rejected),
        ]
    }

    #[test]
    fn test_no_match_yields_empty_list() {
        let apps = sample();
        let filter = ApplicationFilter::new("quantum chef", StatusFilter::All);
        assert!(filter.apply(&apps).is_empty());
    }

    #[test]
    fn test_all_returns_everything() {
        let apps = sample();
        let filter = ApplicationFilter::default();
        assert_eq!(filter.apply(&apps).len(), apps.len());
    }

    #[test]
    fn test_status_filter_is_exact() {
        let apps = sample();
        for status in ApplicationStatus::ALL {
            let filter = ApplicationFilter::new("", StatusFilter::Only(status));
            let result = filter.apply(&apps);
            assert!(!result.is_empty());
            assert!(result.iter().all(|a| a.status == status));
            let expected = apps.iter().filter(|a| a.status == status).count();
            assert_eq!(result.len(), expected);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_or_company() {
        let apps = sample();
        let by_title = ApplicationFilter::new("ENGINEER", StatusFilter::All);
        assert_eq!(by_title.apply(&apps).len(), 3);

        let by_company = ApplicationFilter::new("finance", StatusFilter::All);
        let result = by_company.apply(&apps);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].job_title, "Lead Developer");
    }

    #[test]
    fn test_search_and_status_combine() {
        let apps = sample();
        let filter = ApplicationFilter::new("senior", StatusFilter::Only(ApplicationStatus::Offer));
        let result = filter.apply(&apps);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].company, "Cloud Solutions");
    }

    #[test]
    fn test_status_filter_parse_and_cycle() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "viewed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ApplicationStatus::Viewed)
        );
        assert!("pending".parse::<StatusFilter>().is_err());

        let mut filter = StatusFilter::All;
        for _ in 0..StatusFilter::OPTIONS.len() {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::All);
        assert_eq!(StatusFilter::All.next(), StatusFilter::Only(ApplicationStatus::Applied));
    }

    #[test]
    fn test_stats() {
        let stats = ApplicationStats::from_cards(&sample());
        assert_eq!(
            stats,
            ApplicationStats { total: 6, interviews: 2, offers: 1, pending: 2 }
        );
    }
}
