//! Fuzz target for back-stack operations.
//!
//! Drives a navigator with arbitrary operation sequences and checks that the
//! stack is never emptied and rejected requests leave it untouched.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use navgraph_core::{BackStack, Graph, NavOptions, NavigationRequest, RouteRegistry};

const TARGETS: [&str; 8] = [
    "login", "signup", "home", "profile", "auth", "main", "root", "missing",
];

#[derive(Debug, Arbitrary)]
enum Op {
    Navigate {
        target: u8,
        name: Option<String>,
        score: Option<String>,
        pop_up_to: Option<(u8, bool)>,
        single_top: bool,
    },
    Route(String),
    Back,
    PopUpTo(u8, bool),
}

fn pick(index: u8) -> &'static str {
    TARGETS[usize::from(index) % TARGETS.len()]
}

fn registry() -> Option<RouteRegistry> {
    let mut registry = RouteRegistry::new();
    registry.register_route("login", "login").ok()?;
    registry.register_route("signup", "signup").ok()?;
    registry.register_route("home", "home").ok()?;
    registry
        .register_route("profile", "profile/{name}/{score}")
        .ok()?;
    registry
        .register_graph(Graph::new("auth", "login", ["login", "signup"]))
        .ok()?;
    registry
        .register_graph(Graph::new("main", "home", ["home", "profile"]))
        .ok()?;
    registry
        .register_graph(Graph::new("root", "auth", ["auth", "main"]))
        .ok()?;
    Some(registry)
}

fuzz_target!(|ops: Vec<Op>| {
    let Some(registry) = registry() else {
        return;
    };
    let Ok(mut stack) = BackStack::new(registry, "root") else {
        return;
    };

    for op in ops {
        let before = stack.entries().to_vec();
        match op {
            Op::Navigate {
                target,
                name,
                score,
                pop_up_to,
                single_top,
            } => {
                let mut options = NavOptions::new();
                if let Some((pop, inclusive)) = pop_up_to {
                    options = if inclusive {
                        options.pop_up_to_inclusive(pick(pop))
                    } else {
                        options.pop_up_to(pick(pop))
                    };
                }
                if single_top {
                    options = options.single_top();
                }

                let mut request = NavigationRequest::new(pick(target)).with_options(options);
                if let Some(name) = name {
                    request = request.param("name", name);
                }
                if let Some(score) = score {
                    request = request.param("score", score);
                }

                if stack.navigate(&request).is_err() {
                    assert_eq!(stack.entries(), before.as_slice());
                }
            }
            Op::Route(route) => {
                if stack.navigate_to_route(&route, NavOptions::new()).is_err() {
                    assert_eq!(stack.entries(), before.as_slice());
                }
            }
            Op::Back => {
                if stack.go_back().is_err() {
                    assert_eq!(before.len(), 1);
                }
            }
            Op::PopUpTo(target, inclusive) => {
                stack.pop_up_to(pick(target), inclusive);
            }
        }
        assert!(stack.depth() >= 1);
    }
});
