//! Navigation requests and their back-stack options.

use serde::{Deserialize, Serialize};

use crate::RouteParams;

/// Truncate the back stack down to (or through) a destination before pushing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopUpTo {
    /// Destination or graph identifier to pop up to.
    pub target: String,
    /// Also remove the matched entry.
    #[serde(default)]
    pub inclusive: bool,
}

/// Back-stack options of a navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavOptions {
    #[serde(default)]
    pub pop_up_to: Option<PopUpTo>,
    /// Do not push a duplicate of the current top.
    #[serde(default)]
    pub launch_single_top: bool,
}

impl NavOptions {
    /// Options with no pop-up-to and no single-top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops up to `target`, keeping it on the stack.
    pub fn pop_up_to(mut self, target: impl Into<String>) -> Self {
        self.pop_up_to = Some(PopUpTo {
            target: target.into(),
            inclusive: false,
        });
        self
    }

    /// Pops up to and including `target`.
    pub fn pop_up_to_inclusive(mut self, target: impl Into<String>) -> Self {
        self.pop_up_to = Some(PopUpTo {
            target: target.into(),
            inclusive: true,
        });
        self
    }

    pub fn single_top(mut self) -> Self {
        self.launch_single_top = true;
        self
    }
}

/// Request to navigate to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    /// Destination or graph identifier.
    pub target: String,
    /// Parameter values for the target's placeholders.
    #[serde(default)]
    pub params: RouteParams,
    #[serde(flatten)]
    pub options: NavOptions,
}

impl NavigationRequest {
    /// Creates a request with no parameters and default options.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            params: RouteParams::new(),
            options: NavOptions::default(),
        }
    }

    /// Sets parameter values.
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Sets a single parameter value.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Sets back-stack options.
    pub fn with_options(mut self, options: NavOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = NavigationRequest::new("home")
            .param("name", "John")
            .with_options(NavOptions::new().pop_up_to_inclusive("login").single_top());

        assert_eq!(request.target, "home");
        assert_eq!(request.params.get("name"), Some("John"));
        assert_eq!(
            request.options.pop_up_to,
            Some(PopUpTo {
                target: "login".into(),
                inclusive: true
            })
        );
        assert!(request.options.launch_single_top);
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let request: NavigationRequest = serde_json::from_str(r#"{"target":"home"}"#).unwrap();
        assert_eq!(request, NavigationRequest::new("home"));

        let request: NavigationRequest = serde_json::from_str(
            r#"{"target":"home","pop_up_to":{"target":"login","inclusive":true},"launch_single_top":true}"#,
        )
        .unwrap();
        assert!(request.options.launch_single_top);
        assert!(request.options.pop_up_to.unwrap().inclusive);
    }
}
