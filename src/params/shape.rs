//! Static parameter shapes
//!
//! A shape is the field layout of a parameter type known without a value in
//! hand. The template renderer uses it to describe a route for a type: nested
//! structs list every leaf key even when the nested value would be `None`.

/// Kind of a field in a parameter shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    /// Rendered as a single key
    Leaf,
    /// Plain aggregate whose own fields become dotted keys
    Nested(Vec<FieldShape>),
}

/// One named field of a parameter type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    pub name: &'static str,
    pub kind: ShapeKind,
}

impl FieldShape {
    #[must_use]
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            kind: ShapeKind::Leaf,
        }
    }

    #[must_use]
    pub fn nested(name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self {
            name,
            kind: ShapeKind::Nested(fields),
        }
    }
}

/// Types with a statically known field layout
///
/// Implemented by `#[derive(LinkParams)]`.
pub trait ParamShape {
    fn param_shape() -> Vec<FieldShape>;
}
