//! Parsing of navigation replay scripts.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! navigate <id> [name=value ...] [--pop-up-to <id>] [--inclusive] [--single-top]
//! route <route> [--pop-up-to <id>] [--inclusive] [--single-top]
//! back
//! pop <id> [--inclusive]
//! ```
//!
//! Parameter values are percent-decoded, so `name=John%20Doe` carries a space.

use navgraph_core::{encoding, NavOptions, NavigationRequest, PopUpTo, RouteParams};

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Navigate(NavigationRequest),
    Route { route: String, options: NavOptions },
    Back,
    Pop { target: String, inclusive: bool },
}

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// Parses a whole script into numbered steps.
pub fn parse(script: &str) -> Result<Vec<(usize, Step)>, ParseError> {
    let mut steps = Vec::new();
    for (index, raw) in script.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let step = parse_line(text).map_err(|message| ParseError { line, message })?;
        steps.push((line, step));
    }
    Ok(steps)
}

fn parse_line(text: &str) -> Result<Step, String> {
    let mut words = text.split_whitespace();
    let command = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    match command {
        "navigate" => {
            let (target, tail) = rest
                .split_first()
                .ok_or_else(|| "navigate needs a destination".to_string())?;
            let (params, options) = parse_arguments(tail, true)?;
            Ok(Step::Navigate(
                NavigationRequest::new(*target)
                    .with_params(params)
                    .with_options(options),
            ))
        }
        "route" => {
            let (route, tail) = rest
                .split_first()
                .ok_or_else(|| "route needs a route".to_string())?;
            let (_, options) = parse_arguments(tail, false)?;
            Ok(Step::Route {
                route: route.to_string(),
                options,
            })
        }
        "back" => {
            if !rest.is_empty() {
                return Err("back takes no arguments".to_string());
            }
            Ok(Step::Back)
        }
        "pop" => match rest.as_slice() {
            [target] => Ok(Step::Pop {
                target: target.to_string(),
                inclusive: false,
            }),
            [target, "--inclusive"] => Ok(Step::Pop {
                target: target.to_string(),
                inclusive: true,
            }),
            _ => Err("usage: pop <id> [--inclusive]".to_string()),
        },
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_arguments(words: &[&str], allow_params: bool) -> Result<(RouteParams, NavOptions), String> {
    let mut params = RouteParams::new();
    let mut pop_target = None;
    let mut inclusive = false;
    let mut single_top = false;

    let mut iter = words.iter();
    while let Some(word) = iter.next() {
        match *word {
            "--pop-up-to" => {
                let target = iter
                    .next()
                    .ok_or_else(|| "--pop-up-to needs a destination".to_string())?;
                pop_target = Some(target.to_string());
            }
            "--inclusive" => inclusive = true,
            "--single-top" => single_top = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            pair if allow_params => {
                let (name, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("expected name=value, got {pair}"))?;
                let value = encoding::decode(value).map_err(|e| e.to_string())?;
                params.insert(name, value);
            }
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    if inclusive && pop_target.is_none() {
        return Err("--inclusive requires --pop-up-to".to_string());
    }

    let options = NavOptions {
        pop_up_to: pop_target.map(|target| PopUpTo { target, inclusive }),
        launch_single_top: single_top,
    };
    Ok((params, options))
}
