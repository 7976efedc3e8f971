//! Route pattern parsing and matching.
//!
//! A pattern is a `/`-separated template. Each segment is a literal, a
//! single-segment variable (`{name}` or `:name`), or a trailing wildcard
//! (`{*name}` or `*name`) that captures the rest of the path.

use std::fmt;

use crate::FsError;

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Var(String),
    Wildcard(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern string.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] for unbalanced braces, empty segments
    ///   (`"/docs/"`, `"/a//b"`), empty or illegal variable names, a wildcard
    ///   that is not the last segment, or a variable name used twice
    ///
    /// # Example
    ///
    /// ```rust
    /// use routefs::Pattern;
    ///
    /// let pattern = Pattern::parse("/lockers/{name}/{*rest}").unwrap();
    /// assert_eq!(pattern.variables().collect::<Vec<_>>(), ["name", "rest"]);
    ///
    /// assert!(Pattern::parse("/{*rest}/tail").is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self, FsError> {
        let invalid = |reason: String| FsError::InvalidPattern {
            pattern: source.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let trimmed = source.strip_prefix('/').unwrap_or(source);
        if !trimmed.is_empty() {
            for raw in trimmed.split('/') {
                if matches!(segments.last(), Some(Segment::Wildcard(_))) {
                    return Err(invalid("wildcard must be the last segment".into()));
                }
                if raw.is_empty() {
                    return Err(invalid("empty segment".into()));
                }
                segments.push(parse_segment(raw).map_err(invalid)?);
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Var(name) | Segment::Wildcard(name) = segment {
                if seen.contains(&name.as_str()) {
                    return Err(invalid(format!("variable {name:?} used twice")));
                }
                seen.push(name);
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Variable names in the order they appear.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Var(name) | Segment::Wildcard(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a path (leading `/` optional) and return the variable bindings.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let parts: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        let mut bindings = Vec::new();
        let mut index = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    if parts.get(index) != Some(&literal.as_str()) {
                        return None;
                    }
                    index += 1;
                }
                Segment::Var(name) => {
                    let value = parts.get(index).filter(|part| !part.is_empty())?;
                    bindings.push((name.clone(), (*value).to_string()));
                    index += 1;
                }
                Segment::Wildcard(name) => {
                    let rest = parts.get(index..).unwrap_or_default().join("/");
                    bindings.push((name.clone(), rest));
                    index = parts.len();
                }
            }
        }

        (index == parts.len()).then_some(bindings)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segment(raw: &str) -> Result<Segment, String> {
    if let Some(inner) = raw.strip_prefix('{') {
        let inner = inner
            .strip_suffix('}')
            .ok_or_else(|| format!("unclosed '{{' in segment {raw:?}"))?;
        return match inner.strip_prefix('*') {
            Some(name) => Ok(Segment::Wildcard(variable_name(name)?)),
            None => Ok(Segment::Var(variable_name(inner)?)),
        };
    }
    if let Some(name) = raw.strip_prefix(':') {
        return Ok(Segment::Var(variable_name(name)?));
    }
    if let Some(name) = raw.strip_prefix('*') {
        return Ok(Segment::Wildcard(variable_name(name)?));
    }
    if raw.contains(['{', '}']) {
        return Err(format!("stray brace in segment {raw:?}"));
    }
    Ok(Segment::Literal(raw.to_string()))
}

fn variable_name(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("empty variable name".into());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("illegal variable name {name:?}"));
    }
    Ok(name.to_string())
}
