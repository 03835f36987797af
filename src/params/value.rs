use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::shape::ShapeKind;

/// A single property value in a parameter object
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Absent; skipped by classification
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Rendered as one comma-joined value
    List(Vec<ParamValue>),
    /// Nested plain object; flattened into dotted leftover keys
    Object(ParamBag),
    /// Value with no inspectable fields; rendered from its text
    Opaque(String),
}

impl ParamValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Natural textual form used in URLs
    ///
    /// Returns `None` for null and for nested objects, which have no single
    /// textual form. Lists join their scalar items with `,`, dropping nulls
    /// and anything that is not a scalar; a list with nothing left is `None`.
    #[must_use]
    pub fn to_param_string(&self) -> Option<String> {
        match self {
            ParamValue::Null | ParamValue::Object(_) => None,
            ParamValue::Bool(b) => Some(b.to_string()),
            ParamValue::Int(i) => Some(i.to_string()),
            ParamValue::UInt(u) => Some(u.to_string()),
            ParamValue::Float(f) => Some(f.to_string()),
            ParamValue::Str(s) | ParamValue::Opaque(s) => Some(s.clone()),
            ParamValue::List(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter(|item| !matches!(item, ParamValue::List(_)))
                    .filter_map(ParamValue::to_param_string)
                    .collect();
                (!parts.is_empty()).then(|| parts.join(","))
            }
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_param_string() {
            Some(s) => f.write_str(&s),
            None => Ok(()),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ParamValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ParamValue::UInt(u)
                } else {
                    n.as_f64().map(ParamValue::Float).unwrap_or(ParamValue::Null)
                }
            }
            Value::String(s) => ParamValue::Str(s),
            Value::Array(items) => ParamValue::List(items.into_iter().map(ParamValue::from).collect()),
            Value::Object(map) => ParamValue::Object(ParamBag::from(map)),
        }
    }
}

/// Ordered property name -> value mapping
///
/// Enumeration order is insertion order, which is the declaration order of
/// the struct or literal the bag was built from.
///
/// ```rust
/// use brrtlink::params::{ParamBag, ParamValue};
///
/// let bag = ParamBag::new()
///     .with("Id", 1)
///     .with("Bar", ParamBag::new().with("Abc", "abc"));
/// assert_eq!(bag.len(), 2);
/// assert_eq!(bag.get("id"), None);
/// assert_eq!(bag.get("Id"), Some(&ParamValue::Int(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamBag {
    entries: Vec<(String, ParamValue)>,
}

impl ParamBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`ParamBag::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Exact-name lookup
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a bag from any serializable value
    ///
    /// Structs keep their field order. Values that do not serialize to an
    /// object (numbers, strings, sequences) yield an empty bag.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::to_value(value)? {
            Value::Object(map) => ParamBag::from(map),
            _ => ParamBag::new(),
        })
    }
}

impl From<Map<String, Value>> for ParamBag {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(k, v)| (k, ParamValue::from(v)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = ParamBag::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}

/// Anything that can be enumerated as a parameter object
pub trait ToParams {
    fn to_params(&self) -> ParamBag;
}

impl ToParams for ParamBag {
    fn to_params(&self) -> ParamBag {
        self.clone()
    }
}

impl ToParams for Map<String, Value> {
    fn to_params(&self) -> ParamBag {
        ParamBag::from(self.clone())
    }
}

impl ToParams for Value {
    /// Objects enumerate their keys; every other JSON value is an empty object
    fn to_params(&self) -> ParamBag {
        match self {
            Value::Object(map) => map.to_params(),
            _ => ParamBag::new(),
        }
    }
}

impl<T: ToParams + ?Sized> ToParams for &T {
    fn to_params(&self) -> ParamBag {
        (**self).to_params()
    }
}

impl<T: ToParams> ToParams for Option<T> {
    fn to_params(&self) -> ParamBag {
        self.as_ref().map(ToParams::to_params).unwrap_or_default()
    }
}

/// A value usable as a field of a `#[derive(LinkParams)]` struct
///
/// Scalars are leaves; structs deriving `LinkParams` are nested objects.
pub trait ParamField {
    fn to_param_value(&self) -> ParamValue;

    /// Static shape of the field's type
    fn field_shape() -> ShapeKind
    where
        Self: Sized,
    {
        ShapeKind::Leaf
    }
}

macro_rules! scalar_field {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl ParamField for $t {
                fn to_param_value(&self) -> ParamValue {
                    ParamValue::$variant(<$target>::from(*self))
                }
            }

            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    ParamValue::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

scalar_field!(Int as i64: i8, i16, i32, i64);
scalar_field!(UInt as u64: u8, u16, u32, u64);
scalar_field!(Float as f64: f64);
scalar_field!(Bool as bool: bool);

// Widening through the decimal text keeps `0.1f32` rendering as `0.1`.
fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::from(v))
}

impl ParamField for f32 {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Float(widen_f32(*self))
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(widen_f32(v))
    }
}

impl ParamField for usize {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::UInt(*self as u64)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::UInt(v as u64)
    }
}

impl ParamField for isize {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Int(*self as i64)
    }
}

impl From<isize> for ParamValue {
    fn from(v: isize) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl ParamField for char {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.to_string())
    }
}

impl ParamField for String {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.clone())
    }
}

impl ParamField for str {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<char> for ParamValue {
    fn from(v: char) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<ParamBag> for ParamValue {
    fn from(v: ParamBag) -> Self {
        ParamValue::Object(v)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ParamValue::Null)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: ParamField + ?Sized> ParamField for &T {
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }
}

impl<T: ParamField> ParamField for Option<T> {
    fn to_param_value(&self) -> ParamValue {
        match self {
            Some(v) => v.to_param_value(),
            None => ParamValue::Null,
        }
    }

    fn field_shape() -> ShapeKind {
        T::field_shape()
    }
}

impl<T: ParamField> ParamField for Box<T> {
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }

    fn field_shape() -> ShapeKind {
        T::field_shape()
    }
}

impl<T: ParamField> ParamField for Vec<T> {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::List(self.iter().map(ParamField::to_param_value).collect())
    }
}

/// A dynamic bag nested in a typed struct; its keys are unknown statically
impl ParamField for ParamBag {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Object(self.clone())
    }
}

impl ParamField for Value {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::from(self.clone())
    }
}
