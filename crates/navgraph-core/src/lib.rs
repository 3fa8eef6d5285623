//! Back-stack navigation for screen-based applications.
//!
//! This crate decides, for a tree of named screens grouped into graphs, which
//! stack of screens exists at any time and how navigation requests mutate it.
//!
//! - [`RouteRegistry`] stores destination templates (`profile/{name}/{score}`)
//!   and graphs, and converts between concrete routes and parameters.
//! - [`BackStack`] is the state machine: navigate with optional pop-up-to and
//!   single-top policies, go back, pop up to a destination.
//! - [`Navigator`] is the façade handed to the rendering layer, through the
//!   [`NavigationPort`] capability.
//!
//! ```
//! use navgraph_core::{Graph, NavOptions, Navigator, RouteParams, RouteRegistry};
//!
//! let mut registry = RouteRegistry::new();
//! registry.register_route("login", "login")?;
//! registry.register_route("home", "home")?;
//! registry.register_graph(Graph::new("auth", "login", ["login"]))?;
//! registry.register_graph(Graph::new("main", "home", ["home"]))?;
//! registry.register_graph(Graph::new("root", "auth", ["auth", "main"]))?;
//!
//! let mut nav = Navigator::new(registry, "root")?;
//! assert_eq!(nav.current_destination().0, "login");
//!
//! nav.navigate("main", RouteParams::new(), NavOptions::new().pop_up_to_inclusive("auth"))?;
//! assert_eq!(nav.depth(), 1);
//! assert!(!nav.go_back());
//! # Ok::<(), navgraph_core::NavError>(())
//! ```

mod config;
pub mod encoding;
mod engine;
mod entry;
mod error;
mod navigator;
mod params;
mod pattern;
mod registry;
mod request;

pub use config::{ConfigError, NavConfig};
pub use engine::BackStack;
pub use entry::BackStackEntry;
pub use error::NavError;
pub use navigator::{DestinationListener, NavigationPort, Navigator, SharedNavigator};
pub use params::RouteParams;
pub use pattern::{RoutePattern, Segment};
pub use registry::{DestinationTemplate, Graph, ResolvedRoute, RouteRegistry};
pub use request::{NavOptions, NavigationRequest, PopUpTo};

/// Result type for navigation operations.
pub type Result<T> = std::result::Result<T, NavError>;
