//! Route path pattern parsing
//!
//! Patterns use the familiar `{name}` placeholder syntax:
//!
//! ```text
//! foo/{id}                    one required parameter
//! files/{name}.{ext}          complex segment mixing literals and parameters
//! constraints/{id:int}        inline constraint
//! bar/{id?}                   inline optional marker
//! pages/{page=1}              inline default value
//! ```
//!
//! Parsing splits the pattern into `/`-separated segments, each holding an
//! ordered list of literal and parameter parts. Braces nest, so inline regex
//! constraints such as `{code:regex(^\d{3}$)}` survive intact.

use crate::error::RouteConfigError;

use super::constraint::Constraint;

/// A parameter placeholder as written in the pattern
#[derive(Debug, Clone)]
pub struct PatternParameter {
    /// Parameter name as written (case preserved)
    pub name: String,
    /// Inline constraints (`{id:int:min(1)}`)
    pub constraints: Vec<Constraint>,
    /// Inline optional marker (`{id?}`)
    pub optional: bool,
    /// Inline default (`{page=1}`)
    pub default: Option<String>,
}

/// One piece of a path segment
#[derive(Debug, Clone)]
pub enum SegmentPart {
    /// Literal text copied verbatim
    Literal(String),
    /// Parameter placeholder
    Parameter(PatternParameter),
}

/// One `/`-separated segment of a pattern
#[derive(Debug, Clone)]
pub struct PathSegment {
    parts: Vec<SegmentPart>,
}

impl PathSegment {
    /// Parts of this segment in pattern order
    #[must_use]
    pub fn parts(&self) -> &[SegmentPart] {
        &self.parts
    }

    /// The parameter, if this segment consists of a single placeholder and nothing else
    #[must_use]
    pub fn sole_parameter(&self) -> Option<&PatternParameter> {
        match self.parts.as_slice() {
            [SegmentPart::Parameter(p)] => Some(p),
            _ => None,
        }
    }
}

/// Parsed route path pattern
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Parse a route pattern such as `foo/{id}`
    ///
    /// A leading `/` or `~/` is ignored; a trailing `/` is tolerated.
    pub fn parse(pattern: &str) -> Result<Self, RouteConfigError> {
        let invalid = |reason: String| RouteConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let body = pattern
            .strip_prefix("~/")
            .or_else(|| pattern.strip_prefix('/'))
            .unwrap_or(pattern);
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = Vec::new();
        if !body.is_empty() {
            for raw_segment in split_top_level(body, '/') {
                if raw_segment.is_empty() {
                    return Err(invalid("empty path segment".to_string()));
                }
                segments.push(parse_segment(raw_segment).map_err(|e| match e {
                    SegmentError::Pattern(reason) => invalid(reason),
                    SegmentError::Config(err) => err,
                })?);
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            for part in &segment.parts {
                if let SegmentPart::Parameter(p) = part {
                    if seen.iter().any(|s| s.eq_ignore_ascii_case(&p.name)) {
                        return Err(invalid(format!("parameter '{}' appears twice", p.name)));
                    }
                    seen.push(&p.name);
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as registered
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Segments in pattern order
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// All parameter placeholders in pattern order
    pub fn parameters(&self) -> impl Iterator<Item = &PatternParameter> {
        self.segments.iter().flat_map(|s| {
            s.parts.iter().filter_map(|part| match part {
                SegmentPart::Parameter(p) => Some(p),
                SegmentPart::Literal(_) => None,
            })
        })
    }
}

enum SegmentError {
    Pattern(String),
    Config(RouteConfigError),
}

/// Split on `sep` outside of braces and parentheses
fn split_top_level(input: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '{' | '(' => depth += 1,
            '}' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                out.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push(&input[start..]);
    out
}

fn parse_segment(raw: &str) -> Result<PathSegment, SegmentError> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = raw.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                let mut depth = 1usize;
                let mut end = None;
                for (j, inner) in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                end = Some(j);
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                let end = end.ok_or_else(|| {
                    SegmentError::Pattern(format!("unclosed '{{' in segment '{}'", raw))
                })?;
                if !literal.is_empty() {
                    parts.push(SegmentPart::Literal(std::mem::take(&mut literal)));
                } else if matches!(parts.last(), Some(SegmentPart::Parameter(_))) {
                    return Err(SegmentError::Pattern(format!(
                        "adjacent parameters need a literal separator in segment '{}'",
                        raw
                    )));
                }
                parts.push(SegmentPart::Parameter(parse_parameter(&raw[i + 1..end])?));
            }
            '}' => {
                return Err(SegmentError::Pattern(format!(
                    "unmatched '}}' in segment '{}'",
                    raw
                )))
            }
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        parts.push(SegmentPart::Literal(literal));
    }
    Ok(PathSegment { parts })
}

fn parse_parameter(body: &str) -> Result<PatternParameter, SegmentError> {
    let mut rest = body.trim();

    let optional = match rest.strip_suffix('?') {
        Some(stripped) => {
            rest = stripped;
            true
        }
        None => false,
    };

    let mut default = None;
    if let Some(eq) = find_top_level(rest, '=') {
        default = Some(rest[eq + 1..].to_string());
        rest = &rest[..eq];
    }

    let mut pieces = split_top_level(rest, ':').into_iter();
    let name = pieces.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(SegmentError::Pattern("empty parameter name".to_string()));
    }
    if name.starts_with('*') {
        return Err(SegmentError::Pattern(format!(
            "catch-all parameter '{}' is not supported",
            name
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SegmentError::Pattern(format!(
            "invalid parameter name '{}'",
            name
        )));
    }

    let constraints = pieces
        .map(|text| Constraint::parse_inline(name, text.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(SegmentError::Config)?;

    Ok(PatternParameter {
        name: name.to_string(),
        constraints,
        optional,
        default,
    })
}

fn find_top_level(input: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
