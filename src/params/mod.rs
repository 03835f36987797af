//! # Params Module
//!
//! Parameter objects and their classification against a route.
//!
//! A parameter object is an ordered list of name/value pairs. It can come from:
//!
//! - a struct deriving [`LinkParams`](crate::LinkParams), enumerated in field declaration order
//! - a [`serde_json::Value`] object (insertion order is preserved)
//! - any `Serialize` value through [`ParamBag::from_serialize`]
//! - the [`params!`](crate::params!) macro or the [`ParamBag`] builder
//!
//! [`classify`] then splits the object into path values, optional path values
//! and leftover query pairs.

mod classify;
mod shape;
mod value;

pub use classify::{
    classify, classify_shape, ClassifiedParameters, SegmentValues, MAX_INLINE_SEGMENTS,
};
pub use shape::{FieldShape, ParamShape, ShapeKind};
pub use value::{ParamBag, ParamField, ParamValue, ToParams};

/// Build a [`ParamBag`] inline, the way an anonymous object literal would
///
/// ```rust
/// use brrtlink::params;
///
/// let bag = params! {
///     "Id" => 1,
///     "Bar" => params! { "Abc" => "abc", "Def" => "def" },
/// };
/// assert_eq!(bag.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::params::ParamBag::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut bag = $crate::params::ParamBag::new();
        $(bag.insert($name, $value);)+
        bag
    }};
}
