use serde::{Deserialize, Serialize};

use crate::models::Role;
use crate::routes::Route;

/// Shell state handed to the renderer each frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub role: Role,
    pub route: Route,
    pub sidebar_collapsed: bool,
    pub drawer_open: bool,
    pub assistant_open: bool,
}

impl UiState {
    pub fn new(role: Role, route: Option<Route>) -> Self {
        Self {
            role,
            route: route.unwrap_or_else(|| Route::home(role)),
            ..Default::default()
        }
    }

    /// Switching role jumps to that role's dashboard.
    pub fn switch_role(&mut self, role: Role) {
        self.role = role;
        self.navigate(Route::home(role));
    }

    /// Only the role switcher changes which dashboard is home; the Dashboard
    /// nav entry always goes to `/`.
    pub fn navigate(&mut self, route: Route) {
        self.route = route;
        self.drawer_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    pub fn toggle_assistant(&mut self) {
        self.assistant_open = !self.assistant_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_role_navigates_home() {
        let mut state = UiState::new(Role::Admin, Some(Route::Analytics));
        state.switch_role(Role::Staff);
        assert_eq!(state.route, Route::StaffDashboard);
        state.switch_role(Role::Customer);
        assert_eq!(state.route, Route::CustomerDashboard);
    }

    #[test]
    fn test_dashboard_nav_goes_to_root_for_every_role() {
        let mut state = UiState::new(Role::Admin, None);
        assert_eq!(state.route, Route::AdminDashboard);
        state.navigate(Route::Resumes);
        state.navigate(Route::CustomerDashboard);
        assert_eq!(state.route, Route::CustomerDashboard);
        assert_eq!(state.role, Role::Admin);
    }

    #[test]
    fn test_navigate_closes_drawer() {
        let mut state = UiState::default();
        state.toggle_drawer();
        assert!(state.drawer_open);
        state.navigate(Route::Support);
        assert!(!state.drawer_open);
    }

    #[test]
    fn test_state_is_serializable() {
        let mut state = UiState::new(Role::Staff, None);
        state.toggle_sidebar();
        state.toggle_assistant();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["role"], "staff");
        assert_eq!(json["route"], "/staff");
        assert_eq!(json["sidebarCollapsed"], true);
        let back: UiState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
