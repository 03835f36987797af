use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::error::RouteConfigError;

use super::constraint::Constraint;
use super::pattern::{PathPattern, PathSegment, SegmentPart};

/// Default attached to a route parameter
///
/// `Optional` is the sentinel that turns a segment into an optional one;
/// `Value` supplies the segment when the caller does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RouteDefault {
    /// The segment may be omitted entirely
    Optional,
    /// Concrete value used when no property fills the segment
    Value(String),
}

impl RouteDefault {
    /// Config spelling of the optional sentinel
    pub const OPTIONAL: &'static str = "optional";
}

impl<'de> Deserialize<'de> for RouteDefault {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(i64),
            Float(f64),
            Text(String),
            Null,
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Null => RouteDefault::Optional,
            Raw::Text(t) if t.eq_ignore_ascii_case(RouteDefault::OPTIONAL) => RouteDefault::Optional,
            Raw::Text(t) => RouteDefault::Value(t),
            Raw::Int(i) => RouteDefault::Value(i.to_string()),
            Raw::Float(f) => RouteDefault::Value(f.to_string()),
            Raw::Bool(b) => RouteDefault::Value(b.to_string()),
        })
    }
}

/// Route registration input
///
/// Mirrors the shape a host framework passes when mapping a route: a name, a
/// pattern, per-segment defaults and per-segment regex constraints. It is
/// also the on-disk shape of a route in a routes file.
///
/// ```rust
/// use brrtlink::route::RouteDefinition;
///
/// let def = RouteDefinition::new("foo.one.two", "foo/{one}/{two}")
///     .optional("one")
///     .optional("two");
/// assert_eq!(def.defaults.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Unique route name
    pub name: String,
    /// Path pattern, e.g. `foo/{id}`
    pub template: String,
    /// Segment name -> default (or the optional sentinel)
    #[serde(default)]
    pub defaults: BTreeMap<String, RouteDefault>,
    /// Segment name -> regular expression
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,
}

impl RouteDefinition {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            ..Default::default()
        }
    }

    /// Mark a segment optional
    pub fn optional(mut self, segment: impl Into<String>) -> Self {
        self.defaults.insert(segment.into(), RouteDefault::Optional);
        self
    }

    /// Give a segment a default value
    pub fn default_value(mut self, segment: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults
            .insert(segment.into(), RouteDefault::Value(value.into()));
        self
    }

    /// Attach a regex constraint to a segment
    pub fn constraint(mut self, segment: impl Into<String>, regex: impl Into<String>) -> Self {
        self.constraints.insert(segment.into(), regex.into());
        self
    }
}

fn find_ignore_case<'a, V>(map: &'a BTreeMap<String, V>, name: &str) -> Option<&'a V> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// A path parameter with everything the generators need to know about it
#[derive(Debug, Clone)]
pub struct RouteParameter {
    /// Name as written in the pattern
    pub name: String,
    /// Whether the segment may be omitted
    pub optional: bool,
    /// Fallback value for a required segment
    pub default: Option<String>,
    /// Inline and route-level constraints, all of which must accept the value
    pub constraints: Vec<Constraint>,
}

impl RouteParameter {
    /// Case-insensitive name comparison used for property matching
    #[inline]
    #[must_use]
    pub fn matches(&self, property: &str) -> bool {
        self.name.eq_ignore_ascii_case(property)
    }

    /// Whether any constraint rejects `value`
    #[must_use]
    pub fn rejects(&self, value: &str) -> bool {
        self.constraints.iter().any(|c| !c.accepts(value))
    }
}

/// Immutable description of one named route
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    name: String,
    pattern: PathPattern,
    parameters: Vec<RouteParameter>,
}

impl RouteDescriptor {
    /// Build a descriptor from a registration
    ///
    /// Defaults and constraints for segments that do not appear in the
    /// pattern are ignored, as a host router would.
    pub fn from_definition(def: &RouteDefinition) -> Result<Self, RouteConfigError> {
        if def.name.trim().is_empty() {
            return Err(RouteConfigError::EmptyRouteName);
        }
        let pattern = PathPattern::parse(&def.template)?;

        let mut parameters = Vec::new();
        for p in pattern.parameters() {
            let route_default = find_ignore_case(&def.defaults, &p.name);

            let optional = p.optional || matches!(route_default, Some(RouteDefault::Optional));
            let default = match route_default {
                Some(RouteDefault::Value(v)) => Some(v.clone()),
                _ => p.default.clone(),
            };

            let mut constraints = p.constraints.clone();
            if let Some(expr) = find_ignore_case(&def.constraints, &p.name) {
                constraints.push(Constraint::pattern(&p.name, expr)?);
            }

            parameters.push(RouteParameter {
                name: p.name.clone(),
                optional,
                default,
                constraints,
            });
        }

        let descriptor = Self {
            name: def.name.clone(),
            pattern,
            parameters,
        };

        for segment in descriptor.pattern.segments() {
            if segment.sole_parameter().is_some() {
                continue;
            }
            for p in descriptor.segment_parameters(segment) {
                if p.optional {
                    return Err(RouteConfigError::OptionalInComplexSegment {
                        pattern: def.template.clone(),
                        segment: p.name.clone(),
                    });
                }
            }
        }

        Ok(descriptor)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Path parameters in pattern order
    #[must_use]
    pub fn parameters(&self) -> &[RouteParameter] {
        &self.parameters
    }

    /// Look a parameter up by its exact pattern name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&RouteParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Parameter matched by a property name (ASCII case-insensitive)
    #[must_use]
    pub fn parameter_for_property(&self, property: &str) -> Option<&RouteParameter> {
        self.parameters.iter().find(|p| p.matches(property))
    }

    /// Parameters appearing in one segment, in order
    pub fn segment_parameters<'a>(
        &'a self,
        segment: &'a PathSegment,
    ) -> impl Iterator<Item = &'a RouteParameter> + 'a {
        segment.parts().iter().filter_map(move |part| match part {
            SegmentPart::Parameter(p) => self.parameter(&p.name),
            SegmentPart::Literal(_) => None,
        })
    }
}

/// Source of route descriptors
///
/// A host framework implements this over its own routing table; [`RouteTable`]
/// is the in-memory implementation shipped with the crate.
pub trait RouteResolver: Send + Sync {
    /// Exact-name lookup; `None` when the route is not registered
    fn resolve(&self, name: &str) -> Option<Arc<RouteDescriptor>>;
}

/// In-memory named route table
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Arc<RouteDescriptor>>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of definitions, failing on the first bad one
    pub fn from_definitions<I>(definitions: I) -> Result<Self, RouteConfigError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut table = Self::new();
        for def in definitions {
            table.map_route(def)?;
        }
        info!(routes_count = table.len(), "Route table loaded");
        Ok(table)
    }

    /// Register a route
    pub fn map_route(&mut self, def: RouteDefinition) -> Result<&mut Self, RouteConfigError> {
        if self.routes.contains_key(&def.name) {
            return Err(RouteConfigError::DuplicateRoute { name: def.name });
        }
        let descriptor = RouteDescriptor::from_definition(&def)?;
        debug!(
            route = %def.name,
            pattern = %def.template,
            parameters = descriptor.parameters().len(),
            "Route registered"
        );
        self.routes.insert(def.name, Arc::new(descriptor));
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered route names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl RouteResolver for RouteTable {
    fn resolve(&self, name: &str) -> Option<Arc<RouteDescriptor>> {
        self.routes.get(name).map(Arc::clone)
    }
}
