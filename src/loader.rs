use tracing::warn;

use crate::error::ApiResult;

/// A view model that can stand in for itself when the real one is unavailable.
///
/// Placeholders keep every field the page renders, filled with `"..."` or
/// zero, so layouts keep their shape.
pub trait Placeholder {
    fn placeholder() -> Self;
}

/// What a page does when its fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Render the placeholder with an offline banner.
    Placeholder,
    /// Replace the page with an error screen.
    Blocking,
}

/// State of one page's data.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Degraded { placeholder: T, error: String },
    Blocked { error: String },
}

impl<T> Loadable<T> {
    /// Data to render, real or placeholder.
    pub fn data(&self) -> Option<&T> {
        match self {
            Loadable::Ready(data) => Some(data),
            Loadable::Degraded { placeholder, .. } => Some(placeholder),
            Loadable::Loading | Loadable::Blocked { .. } => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(data) => Some(data),
            Loadable::Degraded { placeholder, .. } => Some(placeholder),
            Loadable::Loading | Loadable::Blocked { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Degraded { error, .. } | Loadable::Blocked { error } => Some(error),
            Loadable::Loading | Loadable::Ready(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Ready(data) => Loadable::Ready(f(data)),
            Loadable::Degraded { placeholder, error } => Loadable::Degraded {
                placeholder: f(placeholder),
                error,
            },
            Loadable::Blocked { error } => Loadable::Blocked { error },
        }
    }
}

/// Turn a fetch result into page state according to `policy`.
pub fn resolve<T: Placeholder>(what: &str, result: ApiResult<T>, policy: FailurePolicy) -> Loadable<T> {
    match result {
        Ok(data) => Loadable::Ready(data),
        Err(err) => {
            warn!(page = what, error = %err, "fetch failed");
            let error = err.summary();
            match policy {
                FailurePolicy::Placeholder => Loadable::Degraded {
                    placeholder: T::placeholder(),
                    error,
                },
                FailurePolicy::Blocking => Loadable::Blocked { error },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use reqwest::StatusCode;

    #[derive(Debug, PartialEq)]
    struct Tile(String);

    impl Placeholder for Tile {
        fn placeholder() -> Self {
            Tile("...".to_string())
        }
    }

    fn unavailable() -> ApiError {
        ApiError::Status {
            url: "http://api/x".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        }
    }

    #[test]
    fn test_success_is_ready() {
        let state = resolve("tile", Ok(Tile("47".to_string())), FailurePolicy::Placeholder);
        assert_eq!(state, Loadable::Ready(Tile("47".to_string())));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_failure_with_placeholder_policy() {
        let state = resolve::<Tile>("tile", Err(unavailable()), FailurePolicy::Placeholder);
        assert_eq!(state.data(), Some(&Tile("...".to_string())));
        assert_eq!(state.error(), Some("server returned 503 Service Unavailable"));
    }

    #[test]
    fn test_failure_with_blocking_policy() {
        let state = resolve::<Tile>("tile", Err(unavailable()), FailurePolicy::Blocking);
        assert!(state.data().is_none());
        assert!(matches!(state, Loadable::Blocked { .. }));
    }

    #[test]
    fn test_map_keeps_error() {
        let state: Loadable<Tile> = Loadable::Degraded {
            placeholder: Tile("...".to_string()),
            error: "offline".to_string(),
        };
        let mapped = state.map(|t| t.0.len());
        assert_eq!(mapped.data(), Some(&3));
        assert_eq!(mapped.error(), Some("offline"));
        assert!(Loadable::<Tile>::Loading.map(|t| t.0).is_loading());
    }
}
