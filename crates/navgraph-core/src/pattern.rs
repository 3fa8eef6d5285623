//! Route patterns: literal segments and named placeholders.
//!
//! A pattern such as `profile/{name}/{score}` matches concrete routes with
//! exactly three segments whose first segment is `profile`. Placeholder
//! values are captured positionally and percent-decoded.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{encoding, NavError, Result, RouteParams};

/// A single segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must match the route segment exactly.
    Literal(String),
    /// Captures the route segment under this name.
    Placeholder(String),
}

impl Segment {
    /// Returns true if the two segments can match the same concrete segment.
    fn overlaps(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            _ => true,
        }
    }
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern. A single leading `/` is ignored.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| NavError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let body = pattern.strip_prefix('/').unwrap_or(pattern);
        if body.is_empty() {
            return Err(invalid("pattern is empty"));
        }

        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for part in body.split('/') {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }

            if let Some(inner) = part.strip_prefix('{') {
                let name = inner
                    .strip_suffix('}')
                    .ok_or_else(|| invalid("unterminated placeholder"))?;
                if name.is_empty() {
                    return Err(invalid("placeholder name is empty"));
                }
                if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(invalid("placeholder names may only contain [A-Za-z0-9_]"));
                }
                if !seen.insert(name.to_string()) {
                    return Err(invalid("duplicate placeholder name"));
                }
                segments.push(Segment::Placeholder(name.to_string()));
            } else {
                if part.contains(['{', '}']) {
                    return Err(invalid("braces are only allowed around a whole segment"));
                }
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: body.to_string(),
            segments,
        })
    }

    /// Returns the pattern text without a leading `/`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns placeholder names in declaration order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the pattern has a placeholder with this name.
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().any(|p| p == name)
    }

    /// Returns true if some concrete route could match both patterns.
    pub fn collides_with(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.overlaps(b))
    }

    /// Matches a concrete route, returning the decoded parameters.
    ///
    /// Returns `Ok(None)` when the route does not match. Decoding errors are
    /// only reported for routes whose literal segments all match.
    pub fn matches(&self, route: &str) -> Result<Option<RouteParams>> {
        let body = route.strip_prefix('/').unwrap_or(route);
        let parts: Vec<&str> = body.split('/').collect();
        if parts.len() != self.segments.len() {
            return Ok(None);
        }

        let literals_match = self.segments.iter().zip(&parts).all(|(seg, part)| match seg {
            Segment::Literal(lit) => lit == part,
            Segment::Placeholder(_) => true,
        });
        if !literals_match {
            return Ok(None);
        }

        let mut params = RouteParams::new();
        for (seg, part) in self.segments.iter().zip(parts) {
            if let Segment::Placeholder(name) = seg {
                params.insert(name.clone(), encoding::decode(part)?);
            }
        }
        Ok(Some(params))
    }

    /// Substitutes encoded parameter values into the pattern.
    ///
    /// `id` is only used to label a [`NavError::MissingParameter`]. Values for
    /// names the pattern does not declare are ignored here.
    ///
    /// An empty first segment gets an extra leading `/`, since [`matches`]
    /// drops one leading `/` before splitting.
    ///
    /// [`matches`]: RoutePattern::matches
    pub fn build(&self, id: &str, params: &RouteParams) -> Result<String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            match seg {
                Segment::Literal(lit) => parts.push(lit.clone()),
                Segment::Placeholder(name) => {
                    let value = params.get(name).ok_or_else(|| NavError::MissingParameter {
                        id: id.to_string(),
                        name: name.clone(),
                    })?;
                    parts.push(encoding::encode(value));
                }
            }
        }
        let route = parts.join("/");
        if route.starts_with('/') {
            return Ok(format!("/{route}"));
        }
        Ok(route)
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for RoutePattern {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoutePattern {
    type Error = NavError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RoutePattern> for String {
    fn from(pattern: RoutePattern) -> Self {
        pattern.raw
    }
}
