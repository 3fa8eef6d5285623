//! Error types for navigation operations.

use thiserror::Error;

/// Errors that can occur while registering routes or navigating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// A destination or graph with this identifier already exists.
    #[error("duplicate identifier: {id}")]
    DuplicateIdentifier { id: String },

    /// The pattern could match the same concrete route as an existing one.
    #[error("route pattern {pattern} of {id} collides with {existing_pattern} of {existing}")]
    AmbiguousRoute {
        id: String,
        pattern: String,
        existing: String,
        existing_pattern: String,
    },

    /// The route pattern is malformed.
    #[error("invalid route pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A graph's start destination is not one of its members.
    #[error("invalid start destination {start} for graph {graph}")]
    InvalidStartDestination { graph: String, start: String },

    /// A graph member is already owned by another graph.
    #[error("{id} is already a member of graph {graph}")]
    AlreadyMember { id: String, graph: String },

    /// Following start destinations or parent graphs led back to a graph
    /// already visited.
    #[error("graph cycle: {}", path.join(" -> "))]
    GraphCycle { path: Vec<String> },

    /// The identifier names neither a destination nor a graph.
    #[error("unknown destination: {id}")]
    UnknownDestination { id: String },

    /// No registered pattern matches the route.
    #[error("no route matches: {route}")]
    NoMatchingRoute { route: String },

    /// A placeholder has no supplied value.
    #[error("missing parameter {name} for {id}")]
    MissingParameter { id: String, name: String },

    /// A value was supplied for a name the pattern does not declare.
    #[error("unexpected parameter {name} for {id}")]
    UnexpectedParameter { id: String, name: String },

    /// A route segment is not valid percent-encoded UTF-8.
    #[error("invalid percent-encoding in segment {segment}")]
    InvalidEncoding { segment: String },

    /// The back stack holds a single entry and cannot be popped.
    #[error("back stack is at its root entry")]
    AtRoot,
}

impl NavError {
    /// Returns true for errors a caller is expected to handle at runtime.
    ///
    /// Everything else is a registration or programming error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NavError::AtRoot)
    }
}
