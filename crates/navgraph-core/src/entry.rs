//! Back-stack entries.

use serde::{Deserialize, Serialize};

use crate::RouteParams;

/// A resolved destination on the back stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackStackEntry {
    /// Session-unique id, increasing with every push.
    pub entry_id: u64,
    /// Identifier of the destination template.
    pub destination: String,
    /// Decoded parameter values.
    pub params: RouteParams,
    /// Concrete, encoded route.
    pub route: String,
    /// Graphs enclosing the destination, outermost first.
    pub graphs: Vec<String>,
}

impl BackStackEntry {
    /// Returns true if this entry shows the same destination with the same
    /// parameters. Entry ids are not compared.
    pub fn same_destination(&self, destination: &str, params: &RouteParams) -> bool {
        self.destination == destination && self.params == *params
    }

    /// Returns true if the destination is enclosed, at any depth, by `graph`.
    pub fn in_graph(&self, graph: &str) -> bool {
        self.graphs.iter().any(|g| g == graph)
    }
}

impl std::fmt::Display for BackStackEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.destination)
        } else {
            write!(f, "{} {}", self.destination, self.params)
        }
    }
}
