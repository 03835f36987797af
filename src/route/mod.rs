//! # Route Module
//!
//! Named route metadata consumed by the generators.
//!
//! ## Overview
//!
//! The route module is responsible for:
//! - Parsing path patterns (`foo/{id}`, `constraints/{id:int}`, `bar/{id?}`)
//! - Merging per-segment defaults and constraints into a [`RouteDescriptor`]
//! - Resolving a route name to its descriptor through the [`RouteResolver`] seam
//!
//! Descriptors are built once at registration time and shared behind `Arc`;
//! nothing in the generation path mutates them.
//!
//! ## Example
//!
//! ```rust
//! use brrtlink::route::{RouteDefinition, RouteResolver, RouteTable};
//!
//! let mut routes = RouteTable::new();
//! routes
//!     .map_route(RouteDefinition::new("foo.show", "foo/{id}").constraint("id", r"\d+"))
//!     .unwrap();
//!
//! let route = routes.resolve("foo.show").unwrap();
//! assert_eq!(route.parameters()[0].name, "id");
//! assert!(routes.resolve("missing").is_none());
//! ```

mod constraint;
mod pattern;
mod table;

pub use constraint::Constraint;
pub use pattern::{PathPattern, PathSegment, PatternParameter, SegmentPart};
pub use table::{
    RouteDefault, RouteDefinition, RouteDescriptor, RouteParameter, RouteResolver, RouteTable,
};
