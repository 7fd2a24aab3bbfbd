use crate::api::DashboardApi;
use crate::loader::{FailurePolicy, Loadable, resolve};
use crate::models::{
    AdminDashboard, AnalyticsView, ApplicationsView, CustomerDashboard, InterviewSchedule,
    ResumesView, SettingsView, StaffDashboard,
};
use crate::routes::Route;

/// Data behind the page at one route.
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    Customer(Loadable<CustomerDashboard>),
    Staff(Loadable<StaffDashboard>),
    Admin(Loadable<AdminDashboard>),
    Applications(Loadable<ApplicationsView>),
    Resumes(Loadable<ResumesView>),
    Interviews(Loadable<InterviewSchedule>),
    Analytics(Loadable<AnalyticsView>),
    Settings(Loadable<SettingsView>),
    Support,
}

impl PageData {
    pub fn loading(route: Route) -> PageData {
        match route {
            Route::CustomerDashboard => PageData::Customer(Loadable::Loading),
            Route::StaffDashboard => PageData::Staff(Loadable::Loading),
            Route::AdminDashboard => PageData::Admin(Loadable::Loading),
            Route::Applications => PageData::Applications(Loadable::Loading),
            Route::Resumes => PageData::Resumes(Loadable::Loading),
            Route::Interviews => PageData::Interviews(Loadable::Loading),
            Route::Analytics => PageData::Analytics(Loadable::Loading),
            Route::Settings => PageData::Settings(Loadable::Loading),
            Route::Support => PageData::Support,
        }
    }

    /// Issue the page's GET and resolve it with the page's failure policy.
    ///
    /// The customer dashboard blocks on failure; every other page degrades
    /// to its placeholder.
    pub fn fetch(api: &dyn DashboardApi, route: Route, client_id: &str) -> PageData {
        let soft = FailurePolicy::Placeholder;
        match route {
            Route::CustomerDashboard => PageData::Customer(resolve(
                "customer dashboard",
                api.customer_dashboard(client_id),
                FailurePolicy::Blocking,
            )),
            Route::StaffDashboard => {
                PageData::Staff(resolve("staff dashboard", api.staff_dashboard(), soft))
            }
            Route::AdminDashboard => {
                PageData::Admin(resolve("admin dashboard", api.admin_dashboard(), soft))
            }
            Route::Applications => {
                PageData::Applications(resolve("applications", api.applications(), soft))
            }
            Route::Analytics => PageData::Analytics(resolve("analytics", api.analytics(), soft)),
            Route::Resumes => PageData::Resumes(resolve(
                "resumes",
                api.customer_dashboard(client_id).map(ResumesView::from),
                soft,
            )),
            Route::Interviews => PageData::Interviews(resolve(
                "interviews",
                api.customer_dashboard(client_id).map(|d| d.interviews),
                soft,
            )),
            Route::Settings => PageData::Settings(resolve(
                "settings",
                api.customer_dashboard(client_id).map(SettingsView::from),
                soft,
            )),
            Route::Support => PageData::Support,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageData::Customer(l) => l.error(),
            PageData::Staff(l) => l.error(),
            PageData::Admin(l) => l.error(),
            PageData::Applications(l) => l.error(),
            PageData::Resumes(l) => l.error(),
            PageData::Interviews(l) => l.error(),
            PageData::Analytics(l) => l.error(),
            PageData::Settings(l) => l.error(),
            PageData::Support => None,
        }
    }
}

/// Name shown in the shell's top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellUser {
    pub name: String,
    pub offline: bool,
}

impl Default for ShellUser {
    fn default() -> Self {
        ShellUser {
            name: "...".to_string(),
            offline: false,
        }
    }
}

impl ShellUser {
    pub fn fetch(api: &dyn DashboardApi, client_id: &str) -> ShellUser {
        match api.customer_dashboard(client_id) {
            Ok(dashboard) if dashboard.user.name.trim().is_empty() => ShellUser {
                name: "Unknown User".to_string(),
                offline: false,
            },
            Ok(dashboard) => ShellUser {
                name: dashboard.user.name,
                offline: false,
            },
            Err(err) => {
                tracing::warn!(error = %err, "layout failed to fetch user");
                ShellUser {
                    name: "...".to_string(),
                    offline: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::StubApi;
    use crate::models::{DashboardUser, ResumeVersion};

    fn customer(name: &str) -> CustomerDashboard {
        CustomerDashboard {
            user: DashboardUser { name: name.to_string(), ..Default::default() },
            resume_versions: vec![ResumeVersion { id: "RES001".to_string(), ..Default::default() }],
            ..Default::default()
        }
    }

    #[test]
    fn test_customer_dashboard_blocks_on_failure() {
        let api = StubApi::default();
        let page = PageData::fetch(&api, Route::CustomerDashboard, "client-1");
        assert!(matches!(page, PageData::Customer(Loadable::Blocked { .. })));
    }

    #[test]
    fn test_other_pages_degrade_on_failure() {
        let api = StubApi::default();
        for route in [
            Route::StaffDashboard,
            Route::AdminDashboard,
            Route::Applications,
            Route::Resumes,
            Route::Interviews,
            Route::Analytics,
            Route::Settings,
        ] {
            let page = PageData::fetch(&api, route, "client-1");
            assert!(page.error().is_some(), "{:?} should report an error", route);
            let degraded = match &page {
                PageData::Staff(l) => matches!(l, Loadable::Degraded { .. }),
                PageData::Admin(l) => matches!(l, Loadable::Degraded { .. }),
                PageData::Applications(l) => matches!(l, Loadable::Degraded { .. }),
                PageData::Resumes(l) => matches!(l, Loadable::Degraded { .. }),
                PageData::Interviews(l) => matches!(l, Loadable::Degraded { .. }),
                PageData::Analytics(l) => matches!(l, Loadable::Degraded { .. }),
                PageData::Settings(l) => matches!(l, Loadable::Degraded { .. }),
                _ => false,
            };
            assert!(degraded, "{:?} should use its placeholder", route);
        }
    }

    #[test]
    fn test_resumes_page_projects_customer_dashboard() {
        let api = StubApi { customer: Some(customer("Ada")), ..Default::default() };
        match PageData::fetch(&api, Route::Resumes, "client-1") {
            PageData::Resumes(Loadable::Ready(view)) => assert_eq!(view.versions[0].id, "RES001"),
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[test]
    fn test_support_needs_no_fetch() {
        let api = StubApi::default();
        assert_eq!(PageData::fetch(&api, Route::Support, "x"), PageData::Support);
        assert_eq!(PageData::loading(Route::Support), PageData::Support);
    }

    #[test]
    fn test_shell_user() {
        let api = StubApi { customer: Some(customer("John Doe")), ..Default::default() };
        assert_eq!(
            ShellUser::fetch(&api, "c"),
            ShellUser { name: "John Doe".to_string(), offline: false }
        );

        let nameless = StubApi { customer: Some(customer("")), ..Default::default() };
        assert_eq!(ShellUser::fetch(&nameless, "c").name, "Unknown User");

        let down = ShellUser::fetch(&StubApi::default(), "c");
        assert_eq!(down, ShellUser { name: "...".to_string(), offline: true });
    }
}
