//! Placeholder view models shown when a page's fetch fails.

use crate::loader::Placeholder;
use crate::models::{
    AdminDashboard, AnalyticsView, ApplicationsView, CustomerDashboard, CustomerMetrics,
    DashboardUser, InterviewSchedule, Kpi, Metric, Plan, ResumesView, SettingsView, StaffDashboard,
};

const ELLIPSIS: &str = "...";

fn placeholder_kpis(titles: &[&str]) -> Vec<Kpi> {
    titles
        .iter()
        .map(|title| Kpi {
            title: title.to_string(),
            metric: Metric::default(),
        })
        .collect()
}

impl Placeholder for DashboardUser {
    fn placeholder() -> Self {
        DashboardUser {
            name: ELLIPSIS.to_string(),
            plan_name: Plan::default(),
            total_quota: 0,
        }
    }
}

impl Placeholder for CustomerDashboard {
    fn placeholder() -> Self {
        CustomerDashboard {
            user: DashboardUser::placeholder(),
            metrics: CustomerMetrics::default(),
            ..Default::default()
        }
    }
}

impl Placeholder for StaffDashboard {
    fn placeholder() -> Self {
        StaffDashboard::default()
    }
}

impl Placeholder for AdminDashboard {
    fn placeholder() -> Self {
        AdminDashboard {
            kpis: placeholder_kpis(&[
                "Total Active Clients",
                "Revenue This Month",
                "Applications Submitted",
                "Avg ATS Score",
                "Conversion Rate",
            ]),
            ..Default::default()
        }
    }
}

impl Placeholder for AnalyticsView {
    fn placeholder() -> Self {
        AnalyticsView {
            kpis: placeholder_kpis(&[
                "Total Applications",
                "Interview Rate",
                "Avg ATS Score",
                "Response Time",
            ]),
            ..Default::default()
        }
    }
}

impl Placeholder for ApplicationsView {
    fn placeholder() -> Self {
        ApplicationsView::default()
    }
}

impl Placeholder for ResumesView {
    fn placeholder() -> Self {
        ResumesView::default()
    }
}

impl Placeholder for InterviewSchedule {
    fn placeholder() -> Self {
        InterviewSchedule::default()
    }
}

impl Placeholder for SettingsView {
    fn placeholder() -> Self {
        SettingsView {
            user: DashboardUser::placeholder(),
        }
    }
}
