use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    #[default]
    #[serde(rename = "/")]
    CustomerDashboard,
    #[serde(rename = "/staff")]
    StaffDashboard,
    #[serde(rename = "/admin")]
    AdminDashboard,
    #[serde(rename = "/applications")]
    Applications,
    #[serde(rename = "/resumes")]
    Resumes,
    #[serde(rename = "/interviews")]
    Interviews,
    #[serde(rename = "/analytics")]
    Analytics,
    #[serde(rename = "/support")]
    Support,
    #[serde(rename = "/settings")]
    Settings,
}

/// Static path table.
pub const ROUTES: [(&str, Route); 9] = [
    ("/", Route::CustomerDashboard),
    ("/staff", Route::StaffDashboard),
    ("/admin", Route::AdminDashboard),
    ("/applications", Route::Applications),
    ("/resumes", Route::Resumes),
    ("/interviews", Route::Interviews),
    ("/analytics", Route::Analytics),
    ("/support", Route::Support),
    ("/settings", Route::Settings),
];

impl Route {
    pub fn path(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, route)| route == self)
            .map(|(path, _)| *path)
            .unwrap_or("/")
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        ROUTES
            .iter()
            .find(|(p, _)| *p == normalized)
            .map(|(_, route)| *route)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::CustomerDashboard => "Dashboard",
            Route::StaffDashboard => "Staff Dashboard",
            Route::AdminDashboard => "Admin Dashboard",
            Route::Applications => "Applications",
            Route::Resumes => "Resume Versions",
            Route::Interviews => "Interviews",
            Route::Analytics => "Analytics",
            Route::Support => "Support",
            Route::Settings => "Settings",
        }
    }

    pub fn home(role: Role) -> Route {
        match role {
            Role::Customer => Route::CustomerDashboard,
            Role::Staff => Route::StaffDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }

    pub fn is_dashboard(&self) -> bool {
        matches!(
            self,
            Route::CustomerDashboard | Route::StaffDashboard | Route::AdminDashboard
        )
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| {
            let known: Vec<&str> = ROUTES.iter().map(|(p, _)| *p).collect();
            format!("Unknown route '{}'. Known routes: {}", s, known.join(", "))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

pub const MAIN_NAV: [NavItem; 5] = [
    NavItem { label: "Dashboard", route: Route::CustomerDashboard },
    NavItem { label: "Applications", route: Route::Applications },
    NavItem { label: "Resume Versions", route: Route::Resumes },
    NavItem { label: "Interviews", route: Route::Interviews },
    NavItem { label: "Analytics", route: Route::Analytics },
];

pub const BOTTOM_NAV: [NavItem; 2] = [
    NavItem { label: "Support", route: Route::Support },
    NavItem { label: "Settings", route: Route::Settings },
];

/// The Dashboard entry stays lit on every role's dashboard.
pub fn is_active(item: Route, current: Route) -> bool {
    if item == Route::CustomerDashboard {
        return current.is_dashboard();
    }
    item == current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip_through_table() {
        for (path, route) in ROUTES {
            assert_eq!(route.path(), path);
            assert_eq!(Route::from_path(path), Some(route));
        }
    }

    #[test]
    fn test_from_path_normalizes() {
        assert_eq!(Route::from_path("/resumes/"), Some(Route::Resumes));
        assert_eq!(Route::from_path(""), Some(Route::CustomerDashboard));
        assert_eq!(Route::from_path("/billing"), None);
        assert!("/billing".parse::<Route>().unwrap_err().contains("/settings"));
    }

    #[test]
    fn test_dashboard_nav_active_for_every_role_home() {
        for role in Role::ALL {
            assert!(is_active(Route::CustomerDashboard, Route::home(role)));
        }
        assert!(!is_active(Route::CustomerDashboard, Route::Applications));
        assert!(is_active(Route::Settings, Route::Settings));
        assert!(!is_active(Route::Settings, Route::Support));
    }

    #[test]
    fn test_route_serializes_as_path() {
        assert_eq!(serde_json::to_string(&Route::Interviews).unwrap(), "\"/interviews\"");
        let route: Route = serde_json::from_str("\"/admin\"").unwrap();
        assert_eq!(route, Route::AdminDashboard);
    }
}
