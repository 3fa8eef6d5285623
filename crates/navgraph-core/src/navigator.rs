//! Navigation façade: the surface the rendering layer talks to.
//!
//! Screens never hold a [`Navigator`] directly. They receive a
//! [`NavigationPort`], which lets them request navigation without knowing
//! how the back stack works, and tests can hand them a recording stub
//! instead.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::{
    BackStack, BackStackEntry, NavError, NavOptions, NavigationRequest, Result, RouteParams,
    RouteRegistry,
};

/// Capability to request navigation, injected into screens.
pub trait NavigationPort {
    /// Navigates to a destination or graph.
    fn navigate(&mut self, target: &str, params: RouteParams, options: NavOptions) -> Result<()>;

    /// Navigates to a concrete route string.
    fn navigate_to_route(&mut self, route: &str, options: NavOptions) -> Result<()>;

    /// Pops the top destination. Returns false when already at the root.
    fn go_back(&mut self) -> bool;
}

/// Observer of the displayed destination.
///
/// Listeners run while the navigator is mutably borrowed, and for a
/// [`SharedNavigator`] while its mutex is held. A listener must not call back
/// into the navigator: with a `SharedNavigator` clone that deadlocks. Record
/// the entry (for example over a channel) and navigate after the call that
/// triggered the notification has returned.
pub trait DestinationListener: Send {
    /// Called with the new top entry whenever it changes.
    fn on_destination_changed(&mut self, entry: &BackStackEntry);
}

impl<F> DestinationListener for F
where
    F: FnMut(&BackStackEntry) + Send,
{
    fn on_destination_changed(&mut self, entry: &BackStackEntry) {
        self(entry)
    }
}

/// Navigation controller of one session.
pub struct Navigator {
    stack: BackStack,
    listeners: Vec<Box<dyn DestinationListener>>,
}

impl Navigator {
    /// Creates a navigator whose stack starts at the leaf start of `root`.
    pub fn new(registry: RouteRegistry, root: &str) -> Result<Self> {
        Ok(Self::with_stack(BackStack::new(registry, root)?))
    }

    /// Wraps an existing back stack.
    pub fn with_stack(stack: BackStack) -> Self {
        Self {
            stack,
            listeners: Vec::new(),
        }
    }

    /// Returns the displayed entry.
    pub fn current(&self) -> &BackStackEntry {
        self.stack.current()
    }

    /// Returns the displayed destination id and its parameters.
    pub fn current_destination(&self) -> (&str, &RouteParams) {
        let entry = self.stack.current();
        (&entry.destination, &entry.params)
    }

    /// Returns all entries, bottom first.
    pub fn back_stack(&self) -> &[BackStackEntry] {
        self.stack.entries()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn registry(&self) -> &RouteRegistry {
        self.stack.registry()
    }

    /// Registers a listener and immediately reports the current destination.
    pub fn add_listener(&mut self, mut listener: impl DestinationListener + 'static) {
        listener.on_destination_changed(self.stack.current());
        self.listeners.push(Box::new(listener));
    }

    /// Navigates to a destination or graph and returns the new top entry.
    pub fn navigate(
        &mut self,
        target: &str,
        params: RouteParams,
        options: NavOptions,
    ) -> Result<&BackStackEntry> {
        let request = NavigationRequest::new(target)
            .with_params(params)
            .with_options(options);
        self.navigate_request(&request)
    }

    /// Applies a prepared navigation request.
    pub fn navigate_request(&mut self, request: &NavigationRequest) -> Result<&BackStackEntry> {
        let before = self.stack.current().entry_id;
        if let Err(e) = self.stack.navigate(request) {
            tracing::error!(target_id = %request.target, error = %e, "navigation request rejected");
            return Err(e);
        }
        self.notify_if_changed(before);
        Ok(self.stack.current())
    }

    /// Resolves a concrete route and navigates to it.
    pub fn navigate_to_route(&mut self, route: &str, options: NavOptions) -> Result<&BackStackEntry> {
        let before = self.stack.current().entry_id;
        if let Err(e) = self.stack.navigate_to_route(route, options) {
            tracing::error!(route = %route, error = %e, "navigation request rejected");
            return Err(e);
        }
        self.notify_if_changed(before);
        Ok(self.stack.current())
    }

    /// Pops the top entry. Returns false, leaving the stack unchanged, when
    /// the stack is at its root entry.
    pub fn go_back(&mut self) -> bool {
        let before = self.stack.current().entry_id;
        match self.stack.go_back() {
            Ok(_) => {
                self.notify_if_changed(before);
                true
            }
            Err(NavError::AtRoot) => {
                tracing::debug!("go back at root");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "go back failed");
                false
            }
        }
    }

    /// Pops up to `target` without pushing anything. See [`BackStack::pop_up_to`].
    pub fn pop_up_to(&mut self, target: &str, inclusive: bool) -> bool {
        let before = self.stack.current().entry_id;
        let popped = self.stack.pop_up_to(target, inclusive);
        if popped {
            self.notify_if_changed(before);
        }
        popped
    }

    /// Moves the navigator behind a mutex for use from several threads.
    pub fn into_shared(self) -> SharedNavigator {
        SharedNavigator::new(self)
    }

    fn notify_if_changed(&mut self, before: u64) {
        let top = self.stack.current();
        if top.entry_id == before {
            return;
        }
        tracing::info!(destination = %top.destination, route = %top.route, "destination changed");
        for listener in &mut self.listeners {
            listener.on_destination_changed(top);
        }
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("stack", &self.stack)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl NavigationPort for Navigator {
    fn navigate(&mut self, target: &str, params: RouteParams, options: NavOptions) -> Result<()> {
        Navigator::navigate(self, target, params, options).map(|_| ())
    }

    fn navigate_to_route(&mut self, route: &str, options: NavOptions) -> Result<()> {
        Navigator::navigate_to_route(self, route, options).map(|_| ())
    }

    fn go_back(&mut self) -> bool {
        Navigator::go_back(self)
    }
}

/// A [`Navigator`] shared between threads.
///
/// The back stack has no synchronization of its own; every call here holds
/// the mutex for its whole duration, which keeps requests atomic.
///
/// Listeners are notified with the mutex held, so they must not navigate
/// through a clone of the same `SharedNavigator`. See [`DestinationListener`].
#[derive(Clone)]
pub struct SharedNavigator(Arc<Mutex<Navigator>>);

impl SharedNavigator {
    /// Wraps a navigator.
    pub fn new(navigator: Navigator) -> Self {
        Self(Arc::new(Mutex::new(navigator)))
    }

    /// Locks the navigator for a sequence of calls.
    pub fn lock(&self) -> MutexGuard<'_, Navigator> {
        self.0.lock()
    }

    /// Returns a copy of the displayed entry.
    pub fn current(&self) -> BackStackEntry {
        self.0.lock().current().clone()
    }
}

impl std::fmt::Debug for SharedNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedNavigator { .. }")
    }
}

impl NavigationPort for SharedNavigator {
    fn navigate(&mut self, target: &str, params: RouteParams, options: NavOptions) -> Result<()> {
        self.0.lock().navigate(target, params, options).map(|_| ())
    }

    fn navigate_to_route(&mut self, route: &str, options: NavOptions) -> Result<()> {
        self.0.lock().navigate_to_route(route, options).map(|_| ())
    }

    fn go_back(&mut self) -> bool {
        self.0.lock().go_back()
    }
}
