//! Parameter classification
//!
//! Partitions a parameter object against a route:
//!
//! 1. properties naming a required segment fill that segment
//! 2. properties naming an optional segment fill that segment
//! 3. everything else is leftover, nested objects flattened into dotted keys
//!
//! Null values and all-null nested objects vanish. Each property lands in
//! exactly one bucket; when two properties name the same segment (`Id` and
//! `id`) the first one declared fills it and the second becomes leftover.

use smallvec::SmallVec;
use tracing::debug;

use crate::options::GenerationOptions;
use crate::route::RouteDescriptor;

use super::shape::{FieldShape, ShapeKind};
use super::value::{ParamBag, ParamValue};

/// Segments held inline before spilling to the heap.
/// Route patterns rarely carry more than a handful of parameters.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Segment name -> stringified value, keyed by the name as written in the pattern
pub type SegmentValues = SmallVec<[(String, String); MAX_INLINE_SEGMENTS]>;

/// Result of classifying one parameter object against one route
///
/// Built fresh for every generation call and dropped at its end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedParameters {
    path_values: SegmentValues,
    optional_path_values: SegmentValues,
    leftover: Vec<(String, String)>,
}

impl ClassifiedParameters {
    /// Value supplied for a required segment
    #[must_use]
    pub fn path_value(&self, segment: &str) -> Option<&str> {
        lookup(&self.path_values, segment)
    }

    /// Value supplied for an optional segment
    #[must_use]
    pub fn optional_path_value(&self, segment: &str) -> Option<&str> {
        lookup(&self.optional_path_values, segment)
    }

    #[must_use]
    pub fn path_values(&self) -> &[(String, String)] {
        &self.path_values
    }

    #[must_use]
    pub fn optional_path_values(&self) -> &[(String, String)] {
        &self.optional_path_values
    }

    /// Leftover `(dotted_key, value)` pairs in enumeration order
    #[must_use]
    pub fn leftover(&self) -> &[(String, String)] {
        &self.leftover
    }

    pub fn leftover_keys(&self) -> impl Iterator<Item = &str> {
        self.leftover.iter().map(|(k, _)| k.as_str())
    }

    fn push_leftover(&mut self, key: String, value: String) {
        if self.leftover.iter().any(|(k, _)| *k == key) {
            debug!(key = %key, "Duplicate leftover key dropped");
            return;
        }
        self.leftover.push((key, value));
    }
}

fn lookup<'a>(values: &'a SegmentValues, segment: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|(k, _)| k == segment)
        .map(|(_, v)| v.as_str())
}

/// Classify a parameter object against a route
///
/// With no object every bucket is empty.
#[must_use]
pub fn classify(
    route: &RouteDescriptor,
    params: Option<&ParamBag>,
    options: &GenerationOptions,
) -> ClassifiedParameters {
    let mut out = ClassifiedParameters::default();
    let Some(bag) = params else {
        return out;
    };

    for (name, value) in bag.iter() {
        if value.is_null() {
            continue;
        }

        // Objects have no single textual form, so they never fill a segment.
        let segment_text = match value {
            ParamValue::Object(_) => None,
            other => route
                .parameter_for_property(name)
                .and_then(|param| other.to_param_string().map(|text| (param, text))),
        };

        if let Some((param, text)) = segment_text {
            let bucket = if param.optional {
                &mut out.optional_path_values
            } else {
                &mut out.path_values
            };
            if lookup(bucket, &param.name).is_none() {
                bucket.push((param.name.clone(), text));
                continue;
            }
            debug!(
                route = %route.name(),
                property = %name,
                segment = %param.name,
                "Segment already filled; property treated as leftover"
            );
        }

        let key = options.key(name);
        match value {
            ParamValue::Object(inner) => flatten(&key, inner, options, &mut out),
            other => {
                if let Some(text) = other.to_param_string() {
                    out.push_leftover(key, text);
                }
            }
        }
    }

    out
}

fn flatten(prefix: &str, bag: &ParamBag, options: &GenerationOptions, out: &mut ClassifiedParameters) {
    for (name, value) in bag.iter() {
        let key = options.nested_key(prefix, name);
        match value {
            ParamValue::Null => {}
            ParamValue::Object(inner) => flatten(&key, inner, options, out),
            other => {
                if let Some(text) = other.to_param_string() {
                    out.push_leftover(key, text);
                }
            }
        }
    }
}

/// Leftover keys for a parameter type, without a value
///
/// Applies the same bucket rules as [`classify`] to a static shape: leaf
/// fields naming a segment are consumed, nested fields expand to every leaf
/// key regardless of whether a value would be present.
#[must_use]
pub fn classify_shape(
    route: &RouteDescriptor,
    fields: &[FieldShape],
    options: &GenerationOptions,
) -> Vec<String> {
    let mut consumed: SmallVec<[&str; MAX_INLINE_SEGMENTS]> = SmallVec::new();
    let mut keys = Vec::new();

    for field in fields {
        if let ShapeKind::Leaf = field.kind {
            if let Some(param) = route.parameter_for_property(field.name) {
                if !consumed.contains(&param.name.as_str()) {
                    consumed.push(param.name.as_str());
                    continue;
                }
            }
        }

        let key = options.key(field.name);
        match &field.kind {
            ShapeKind::Leaf => push_key(&mut keys, key),
            ShapeKind::Nested(children) => flatten_shape(&key, children, options, &mut keys),
        }
    }

    keys
}

fn flatten_shape(prefix: &str, fields: &[FieldShape], options: &GenerationOptions, keys: &mut Vec<String>) {
    for field in fields {
        let key = options.nested_key(prefix, field.name);
        match &field.kind {
            ShapeKind::Leaf => push_key(keys, key),
            ShapeKind::Nested(children) => flatten_shape(&key, children, options, keys),
        }
    }
}

fn push_key(keys: &mut Vec<String>, key: String) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}
