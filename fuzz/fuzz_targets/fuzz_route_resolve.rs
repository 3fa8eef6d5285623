//! Fuzz target for route resolution.
//!
//! Arbitrary routes must either resolve or fail with an error, never panic,
//! and a resolved route must rebuild to an equivalent route.

#![no_main]

use libfuzzer_sys::fuzz_target;
use navgraph_core::{encoding, RouteRegistry};

fn registry() -> RouteRegistry {
    let mut registry = RouteRegistry::new();
    for (id, route) in [
        ("home", "home"),
        ("profile", "profile/{name}/{score}"),
        ("item", "shop/{category}/item/{id}"),
        ("settings", "settings/{section}"),
    ] {
        let _ = registry.register_route(id, route);
    }
    registry
}

fuzz_target!(|data: &[u8]| {
    let route = String::from_utf8_lossy(data);
    let _ = encoding::decode(&route);

    let registry = registry();
    if let Ok(resolved) = registry.resolve(&route) {
        let rebuilt = registry
            .build(&resolved.id, &resolved.params)
            .expect("resolved params always rebuild");
        let again = registry.resolve(&rebuilt).expect("rebuilt route resolves");
        assert_eq!(again, resolved);
    }
});
