//! Route registry: destination templates and the graphs that group them.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{NavError, Result, RouteParams, RoutePattern};

/// A navigable screen identity and the route pattern it answers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationTemplate {
    /// Unique identifier within the registry.
    pub id: String,
    /// Route pattern, e.g. `profile/{name}/{score}`.
    pub route: RoutePattern,
}

impl DestinationTemplate {
    /// Creates a template, parsing the route pattern.
    pub fn new(id: impl Into<String>, route: &str) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            route: RoutePattern::parse(route)?,
        })
    }

    /// Builds the concrete route for these parameter values.
    pub fn build(&self, params: &RouteParams) -> Result<String> {
        self.route.build(&self.id, params)
    }

    /// Checks that `params` supplies exactly the pattern's placeholders.
    pub fn check_params(&self, params: &RouteParams) -> Result<()> {
        if let Some(name) = self.route.placeholders().find(|name| !params.contains(name)) {
            return Err(NavError::MissingParameter {
                id: self.id.clone(),
                name: name.to_string(),
            });
        }
        if let Some(name) = params.names().find(|name| !self.route.has_placeholder(name)) {
            return Err(NavError::UnexpectedParameter {
                id: self.id.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// A named group of destinations (or nested graphs) with one entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Identifier, usable as a navigation target.
    pub id: String,
    /// Member entered when navigating to the graph.
    pub start: String,
    /// Destination and graph identifiers grouped by this graph.
    pub members: Vec<String>,
}

impl Graph {
    /// Creates a graph.
    pub fn new<I, S>(id: impl Into<String>, start: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            start: start.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `id` is a direct member.
    pub fn has_member(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }
}

/// Result of resolving a concrete route string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Identifier of the matching template.
    pub id: String,
    /// Decoded parameter values.
    pub params: RouteParams,
}

/// Registry of destination templates and graphs.
///
/// Populated once at startup and read-only afterwards. Graph members may be
/// registered before or after the graph that groups them; start chains are
/// validated when they are resolved.
#[derive(Debug, Default, Clone)]
pub struct RouteRegistry {
    /// Templates indexed by id.
    templates: HashMap<String, DestinationTemplate>,
    /// Template ids in registration order.
    order: Vec<String>,
    /// Graphs indexed by id.
    graphs: HashMap<String, Graph>,
    /// Graph ids in registration order.
    graph_order: Vec<String>,
    /// Owning graph of every graph member.
    parents: HashMap<String, String>,
}

impl RouteRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `id` names a template or a graph.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id) || self.graphs.contains_key(id)
    }

    /// Registers a destination template.
    pub fn register(&mut self, template: DestinationTemplate) -> Result<()> {
        if self.contains(&template.id) {
            return Err(NavError::DuplicateIdentifier { id: template.id });
        }

        if let Some(existing) = self
            .templates()
            .find(|t| t.route.collides_with(&template.route))
        {
            return Err(NavError::AmbiguousRoute {
                id: template.id.clone(),
                pattern: template.route.to_string(),
                existing: existing.id.clone(),
                existing_pattern: existing.route.to_string(),
            });
        }

        tracing::debug!(id = %template.id, route = %template.route, "registered destination");
        self.order.push(template.id.clone());
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Parses a pattern and registers it under `id`.
    pub fn register_route(&mut self, id: impl Into<String>, route: &str) -> Result<()> {
        self.register(DestinationTemplate::new(id, route)?)
    }

    /// Registers a graph.
    pub fn register_graph(&mut self, graph: Graph) -> Result<()> {
        if self.contains(&graph.id) {
            return Err(NavError::DuplicateIdentifier { id: graph.id });
        }

        if graph.start == graph.id || !graph.has_member(&graph.start) {
            return Err(NavError::InvalidStartDestination {
                graph: graph.id,
                start: graph.start,
            });
        }

        let mut seen = HashSet::new();
        for member in &graph.members {
            if *member == graph.id {
                return Err(NavError::AlreadyMember {
                    id: member.clone(),
                    graph: graph.id.clone(),
                });
            }
            if let Some(owner) = self.parents.get(member) {
                return Err(NavError::AlreadyMember {
                    id: member.clone(),
                    graph: owner.clone(),
                });
            }
            if !seen.insert(member.as_str()) {
                return Err(NavError::AlreadyMember {
                    id: member.clone(),
                    graph: graph.id.clone(),
                });
            }
        }

        tracing::debug!(
            id = %graph.id,
            start = %graph.start,
            members = graph.members.len(),
            "registered graph"
        );
        for member in &graph.members {
            self.parents.insert(member.clone(), graph.id.clone());
        }
        self.graph_order.push(graph.id.clone());
        self.graphs.insert(graph.id.clone(), graph);
        Ok(())
    }

    /// Gets a template by id.
    pub fn template(&self, id: &str) -> Option<&DestinationTemplate> {
        self.templates.get(id)
    }

    /// Gets a graph by id.
    pub fn graph(&self, id: &str) -> Option<&Graph> {
        self.graphs.get(id)
    }

    /// Returns true if `id` names a graph.
    pub fn is_graph(&self, id: &str) -> bool {
        self.graphs.contains_key(id)
    }

    /// Iterates over templates in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &DestinationTemplate> {
        self.order.iter().filter_map(|id| self.templates.get(id))
    }

    /// Iterates over graphs in registration order.
    pub fn graphs(&self) -> impl Iterator<Item = &Graph> {
        self.graph_order.iter().filter_map(|id| self.graphs.get(id))
    }

    /// Returns the graph that lists `id` as a member.
    pub fn parent_graph(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Returns the graphs enclosing `id`, outermost first.
    pub fn graph_chain(&self, id: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent_graph(current) {
            // Membership is unique, but a hand-built cycle of parents must not hang.
            if chain.iter().any(|g| g == parent) {
                break;
            }
            chain.push(parent.to_string());
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Follows start destinations from `id` until a template is reached.
    pub fn resolve_to_leaf(&self, id: &str) -> Result<&DestinationTemplate> {
        let mut path: Vec<String> = Vec::new();
        let mut current = id;
        loop {
            if let Some(template) = self.templates.get(current) {
                return Ok(template);
            }

            let Some(graph) = self.graphs.get(current) else {
                return Err(NavError::UnknownDestination {
                    id: current.to_string(),
                });
            };

            if path.iter().any(|p| p == current) {
                path.push(current.to_string());
                return Err(NavError::GraphCycle { path });
            }
            path.push(current.to_string());
            current = &graph.start;
        }
    }

    /// Checks that every graph member exists and every graph reaches a leaf.
    ///
    /// Registration accepts forward references; call this once the registry
    /// is complete to surface dangling members and start cycles at startup
    /// instead of on first navigation.
    pub fn validate(&self) -> Result<()> {
        for graph in self.graphs() {
            if let Some(missing) = graph.members.iter().find(|m| !self.contains(m)) {
                return Err(NavError::UnknownDestination {
                    id: missing.clone(),
                });
            }
            self.check_parents(&graph.id)?;
            self.resolve_to_leaf(&graph.id)?;
        }
        Ok(())
    }

    /// Fails with [`NavError::GraphCycle`] if the parent chain of `id` loops.
    fn check_parents(&self, id: &str) -> Result<()> {
        let mut path = vec![id.to_string()];
        let mut current = id;
        while let Some(parent) = self.parent_graph(current) {
            let revisited = path.iter().any(|p| p == parent);
            path.push(parent.to_string());
            if revisited {
                return Err(NavError::GraphCycle { path });
            }
            current = parent;
        }
        Ok(())
    }

    /// Matches a concrete route against all templates.
    pub fn resolve(&self, route: &str) -> Result<ResolvedRoute> {
        for template in self.templates() {
            if let Some(params) = template.route.matches(route)? {
                return Ok(ResolvedRoute {
                    id: template.id.clone(),
                    params,
                });
            }
        }
        Err(NavError::NoMatchingRoute {
            route: route.to_string(),
        })
    }

    /// Builds the concrete route of a template.
    pub fn build(&self, id: &str, params: &RouteParams) -> Result<String> {
        self.templates
            .get(id)
            .ok_or_else(|| NavError::UnknownDestination { id: id.to_string() })?
            .build(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> RouteRegistry {
        let mut registry = RouteRegistry::new();
        registry.register_route("login", "login").unwrap();
        registry.register_route("signup", "signup").unwrap();
        registry.register_route("home", "home").unwrap();
        registry
            .register_route("profile", "profile/{name}/{score}")
            .unwrap();
        registry
            .register_graph(Graph::new("auth", "login", ["login", "signup"]))
            .unwrap();
        registry
            .register_graph(Graph::new("main", "home", ["home", "profile"]))
            .unwrap();
        registry
            .register_graph(Graph::new("root", "auth", ["auth", "main"]))
            .unwrap();
        registry
    }

    #[test]
    fn test_duplicate_identifier() {
        let mut registry = sample_registry();
        let err = registry.register_route("home", "elsewhere").unwrap_err();
        assert_eq!(err, NavError::DuplicateIdentifier { id: "home".into() });

        let err = registry
            .register_graph(Graph::new("login", "x", ["x"]))
            .unwrap_err();
        assert_eq!(err, NavError::DuplicateIdentifier { id: "login".into() });

        let err = registry.register_route("auth", "auth").unwrap_err();
        assert_eq!(err, NavError::DuplicateIdentifier { id: "auth".into() });
    }

    #[test]
    fn test_ambiguous_route() {
        let mut registry = sample_registry();
        let err = registry
            .register_route("profile_settings", "profile/settings/{tab}")
            .unwrap_err();
        assert!(matches!(err, NavError::AmbiguousRoute { ref existing, .. } if existing == "profile"));

        registry
            .register_route("profile_posts", "profile/{name}/{score}/posts")
            .unwrap();
    }

    #[test]
    fn test_invalid_start_destination() {
        let mut registry = RouteRegistry::new();
        let err = registry
            .register_graph(Graph::new("auth", "home", ["login", "signup"]))
            .unwrap_err();
        assert_eq!(
            err,
            NavError::InvalidStartDestination {
                graph: "auth".into(),
                start: "home".into()
            }
        );

        let err = registry
            .register_graph(Graph::new("auth", "auth", ["auth", "login"]))
            .unwrap_err();
        assert!(matches!(err, NavError::InvalidStartDestination { .. }));
        assert!(!registry.contains("auth"));
    }

    #[test]
    fn test_member_owned_by_one_graph() {
        let mut registry = sample_registry();
        let err = registry
            .register_graph(Graph::new("extra", "home", ["home"]))
            .unwrap_err();
        assert_eq!(
            err,
            NavError::AlreadyMember {
                id: "home".into(),
                graph: "main".into()
            }
        );
    }

    #[test]
    fn test_resolve_and_build() {
        let registry = sample_registry();
        let params = RouteParams::new().with("name", "John Doe").with("score", "95");

        let route = registry.build("profile", &params).unwrap();
        assert_eq!(route, "profile/John%20Doe/95");

        let resolved = registry.resolve(&route).unwrap();
        assert_eq!(resolved.id, "profile");
        assert_eq!(resolved.params, params);

        assert_eq!(registry.resolve("/home").unwrap().id, "home");
    }

    #[test]
    fn test_empty_leading_value_resolves_to_its_own_template() {
        let mut registry = RouteRegistry::new();
        registry.register_route("b", "b").unwrap();
        registry.register_route("x", "{a}/b").unwrap();
        registry.register_route("pair", "{a}/{c}/pair").unwrap();

        let params = RouteParams::new().with("a", "");
        let route = registry.build("x", &params).unwrap();
        assert_eq!(
            registry.resolve(&route).unwrap(),
            ResolvedRoute {
                id: "x".into(),
                params
            }
        );

        let params = RouteParams::new().with("a", "").with("c", "");
        let route = registry.build("pair", &params).unwrap();
        assert_eq!(route, "///pair");
        assert_eq!(registry.resolve(&route).unwrap().params, params);

        assert_eq!(registry.resolve("/b").unwrap().id, "b");
    }

    #[test]
    fn test_resolve_no_match() {
        let registry = sample_registry();
        assert_eq!(
            registry.resolve("settings"),
            Err(NavError::NoMatchingRoute {
                route: "settings".into()
            })
        );
        // Graph ids are not routes.
        assert!(registry.resolve("auth").is_err());
    }

    #[test]
    fn test_build_unknown_and_graph() {
        let registry = sample_registry();
        assert!(matches!(
            registry.build("nope", &RouteParams::new()),
            Err(NavError::UnknownDestination { .. })
        ));
        assert!(matches!(
            registry.build("auth", &RouteParams::new()),
            Err(NavError::UnknownDestination { .. })
        ));
    }

    #[test]
    fn test_resolve_to_leaf_nested() {
        let registry = sample_registry();
        assert_eq!(registry.resolve_to_leaf("root").unwrap().id, "login");
        assert_eq!(registry.resolve_to_leaf("main").unwrap().id, "home");
        assert_eq!(registry.resolve_to_leaf("profile").unwrap().id, "profile");
    }

    #[test]
    fn test_resolve_to_leaf_detects_cycle() {
        // Forward references make a start cycle expressible at registration time.
        let mut registry = RouteRegistry::new();
        registry.register_graph(Graph::new("a", "b", ["b"])).unwrap();
        registry.register_graph(Graph::new("b", "c", ["c"])).unwrap();
        registry.register_graph(Graph::new("c", "a", ["a"])).unwrap();

        assert_eq!(
            registry.resolve_to_leaf("a").unwrap_err(),
            NavError::GraphCycle {
                path: vec!["a".into(), "b".into(), "c".into(), "a".into()]
            }
        );
        assert!(matches!(
            registry.resolve_to_leaf("b"),
            Err(NavError::GraphCycle { .. })
        ));
        assert!(registry.graph_chain("a").len() <= 3);
    }

    #[test]
    fn test_resolve_to_leaf_unknown_start() {
        let mut registry = RouteRegistry::new();
        registry
            .register_graph(Graph::new("auth", "login", ["login"]))
            .unwrap();
        assert_eq!(
            registry.resolve_to_leaf("auth").unwrap_err(),
            NavError::UnknownDestination { id: "login".into() }
        );
    }

    #[test]
    fn test_validate() {
        assert!(sample_registry().validate().is_ok());

        let mut registry = sample_registry();
        registry
            .register_graph(Graph::new("settings", "prefs", ["prefs", "about"]))
            .unwrap();
        registry.register_route("prefs", "settings/prefs").unwrap();
        assert_eq!(
            registry.validate(),
            Err(NavError::UnknownDestination { id: "about".into() })
        );
        registry.register_route("about", "settings/about").unwrap();
        assert!(registry.validate().is_ok());

        registry
            .register_graph(Graph::new("x", "y", ["y"]))
            .unwrap();
        registry
            .register_graph(Graph::new("y", "x", ["x"]))
            .unwrap();
        assert!(matches!(
            registry.validate(),
            Err(NavError::GraphCycle { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_membership_cycle() {
        let mut registry = RouteRegistry::new();
        registry.register_route("x", "x").unwrap();
        registry.register_route("y", "y").unwrap();
        registry
            .register_graph(Graph::new("a", "x", ["x", "b"]))
            .unwrap();
        registry
            .register_graph(Graph::new("b", "y", ["y", "a"]))
            .unwrap();

        // Start chains are fine; only the parent chain loops.
        assert_eq!(registry.resolve_to_leaf("a").unwrap().id, "x");
        assert_eq!(
            registry.validate(),
            Err(NavError::GraphCycle {
                path: vec!["a".into(), "b".into(), "a".into()]
            })
        );
    }

    #[test]
    fn test_graph_chain() {
        let registry = sample_registry();
        assert_eq!(registry.graph_chain("profile"), vec!["root", "main"]);
        assert_eq!(registry.graph_chain("auth"), vec!["root"]);
        assert!(registry.graph_chain("root").is_empty());
        assert_eq!(registry.parent_graph("signup"), Some("auth"));
    }

    #[test]
    fn test_template_check_params() {
        let registry = sample_registry();
        let profile = registry.template("profile").unwrap();

        let ok = RouteParams::new().with("name", "a").with("score", "1");
        assert!(profile.check_params(&ok).is_ok());

        let missing = RouteParams::new().with("name", "a");
        assert!(matches!(
            profile.check_params(&missing),
            Err(NavError::MissingParameter { ref name, .. }) if name == "score"
        ));

        let extra = ok.clone().with("tab", "x");
        assert!(matches!(
            profile.check_params(&extra),
            Err(NavError::UnexpectedParameter { ref name, .. }) if name == "tab"
        ));
    }
}
