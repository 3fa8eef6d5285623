#![no_main]

use libfuzzer_sys::fuzz_target;
use navgraph_core::{RouteParams, RoutePattern};

fuzz_target!(|input: (String, Vec<String>)| {
    let (text, values) = input;

    // Parsing arbitrary patterns should never panic
    let Ok(pattern) = RoutePattern::parse(&text) else {
        return;
    };

    // Placeholder values come from the input; missing ones are empty
    let params: RouteParams = pattern
        .placeholders()
        .enumerate()
        .map(|(i, name)| (name.to_string(), values.get(i).cloned().unwrap_or_default()))
        .collect();

    let route = pattern.build("fuzz", &params).expect("all placeholders supplied");
    let matched = pattern.matches(&route).expect("built route decodes");
    assert_eq!(matched, Some(params));
});
