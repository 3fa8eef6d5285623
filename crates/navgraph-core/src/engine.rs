//! The back-stack state machine.
//!
//! A [`BackStack`] owns the ordered entries of a navigation session. The
//! bottom entry was entered first; the top entry is the one displayed. The
//! stack is never empty: it starts with the resolved start destination of the
//! root graph, and `go_back` refuses to pop the last entry.
//!
//! Every request is resolved completely before the stack is touched, so a
//! failing request leaves the stack exactly as it was.

use crate::{
    BackStackEntry, NavError, NavOptions, NavigationRequest, Result, RouteParams, RouteRegistry,
};

/// A resolved target that has not been pushed yet.
struct PendingEntry {
    destination: String,
    params: RouteParams,
    route: String,
    graphs: Vec<String>,
}

/// Back stack of a single navigation session.
#[derive(Debug, Clone)]
pub struct BackStack {
    registry: RouteRegistry,
    entries: Vec<BackStackEntry>,
    next_entry_id: u64,
}

impl BackStack {
    /// Creates a back stack holding the leaf start destination of `root`.
    ///
    /// `root` may name a graph or a destination. The start destination must
    /// not declare placeholders.
    pub fn new(registry: RouteRegistry, root: &str) -> Result<Self> {
        let mut stack = Self {
            registry,
            entries: Vec::new(),
            next_entry_id: 1,
        };

        let start = stack.resolve_target(root, &RouteParams::new())?;
        stack.push(start);
        tracing::debug!(root = %root, start = %stack.current().destination, "initialized back stack");
        Ok(stack)
    }

    /// Returns the registry the stack resolves against.
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Returns the displayed entry.
    pub fn current(&self) -> &BackStackEntry {
        // Non-empty from construction on; every truncation is followed by a push.
        &self.entries[self.entries.len() - 1]
    }

    /// Returns the entry below the top, if any.
    pub fn previous(&self) -> Option<&BackStackEntry> {
        self.entries.len().checked_sub(2).map(|i| &self.entries[i])
    }

    /// Returns all entries, bottom first.
    pub fn entries(&self) -> &[BackStackEntry] {
        &self.entries
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if some entry shows `destination`.
    pub fn contains(&self, destination: &str) -> bool {
        self.entries.iter().any(|e| e.destination == destination)
    }

    /// Returns the destination ids on the stack, bottom first.
    pub fn destinations(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.destination.as_str()).collect()
    }

    /// Applies a navigation request and returns the new top entry.
    pub fn navigate(&mut self, request: &NavigationRequest) -> Result<&BackStackEntry> {
        let pending = self.resolve_target(&request.target, &request.params)?;
        let options = &request.options;

        if let Some(pop) = &options.pop_up_to {
            match self.find_match(&pop.target) {
                Some(index) => {
                    let keep = if pop.inclusive { index } else { index + 1 };
                    tracing::debug!(
                        pop_to = %pop.target,
                        inclusive = pop.inclusive,
                        popped = self.entries.len() - keep,
                        "popped up to"
                    );
                    self.entries.truncate(keep);
                }
                None if self.registry.contains(&pop.target) => {
                    tracing::debug!(pop_to = %pop.target, "pop-up-to target not on back stack, ignoring");
                }
                None => {
                    tracing::warn!(pop_to = %pop.target, "pop-up-to target is not registered, ignoring");
                }
            }
        }

        let duplicate = options.launch_single_top
            && self
                .entries
                .last()
                .is_some_and(|top| top.same_destination(&pending.destination, &pending.params));

        if duplicate {
            tracing::debug!(destination = %pending.destination, "single top: keeping current entry");
        } else {
            self.push(pending);
        }

        Ok(self.current())
    }

    /// Resolves a concrete route and navigates to it.
    pub fn navigate_to_route(&mut self, route: &str, options: NavOptions) -> Result<&BackStackEntry> {
        let resolved = self.registry.resolve(route)?;
        let request = NavigationRequest::new(resolved.id)
            .with_params(resolved.params)
            .with_options(options);
        self.navigate(&request)
    }

    /// Pops the top entry and returns it.
    ///
    /// Fails with [`NavError::AtRoot`] when only one entry is left; the stack
    /// is unchanged in that case.
    pub fn go_back(&mut self) -> Result<BackStackEntry> {
        if self.entries.len() <= 1 {
            return Err(NavError::AtRoot);
        }
        let popped = self.entries.pop().ok_or(NavError::AtRoot)?;
        tracing::debug!(
            popped = %popped.destination,
            current = %self.current().destination,
            "went back"
        );
        Ok(popped)
    }

    /// Pops entries above the nearest match of `target`, and the match itself
    /// when `inclusive`.
    ///
    /// Returns false, leaving the stack unchanged, when nothing matches, when
    /// nothing would be popped, or when the stack would become empty.
    pub fn pop_up_to(&mut self, target: &str, inclusive: bool) -> bool {
        let Some(index) = self.find_match(target) else {
            tracing::debug!(pop_to = %target, "pop target not on back stack");
            return false;
        };

        let keep = if inclusive { index } else { index + 1 };
        if keep == 0 || keep == self.entries.len() {
            return false;
        }

        self.entries.truncate(keep);
        tracing::debug!(pop_to = %target, inclusive, current = %self.current().destination, "popped back stack");
        true
    }

    /// Resolves an identifier and parameters into an entry ready to push.
    fn resolve_target(&self, target: &str, params: &RouteParams) -> Result<PendingEntry> {
        let template = self.registry.resolve_to_leaf(target)?;
        template.check_params(params)?;
        let route = template.build(params)?;

        Ok(PendingEntry {
            destination: template.id.clone(),
            params: params.clone(),
            route,
            graphs: self.registry.graph_chain(&template.id),
        })
    }

    /// Finds the index of the entry a pop should stop at.
    ///
    /// A destination id matches the nearest entry showing it. A graph id
    /// matches the bottom of the nearest contiguous run of entries inside
    /// that graph.
    fn find_match(&self, target: &str) -> Option<usize> {
        if self.registry.is_graph(target) {
            let top = self.entries.iter().rposition(|e| e.in_graph(target))?;
            let mut bottom = top;
            while bottom > 0 && self.entries[bottom - 1].in_graph(target) {
                bottom -= 1;
            }
            Some(bottom)
        } else {
            self.entries.iter().rposition(|e| e.destination == target)
        }
    }

    fn push(&mut self, pending: PendingEntry) {
        let entry = BackStackEntry {
            entry_id: self.next_entry_id,
            destination: pending.destination,
            params: pending.params,
            route: pending.route,
            graphs: pending.graphs,
        };
        self.next_entry_id += 1;
        tracing::debug!(
            destination = %entry.destination,
            route = %entry.route,
            depth = self.entries.len() + 1,
            "pushed entry"
        );
        self.entries.push(entry);
    }
}
