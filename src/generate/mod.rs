//! # Generate Module
//!
//! Turns a route name plus an optional parameter object into either an
//! RFC 6570 URI template or a concrete URL.
//!
//! ## Flow
//!
//! 1. Resolve the route by name through a [`RouteResolver`](crate::route::RouteResolver)
//! 2. [`classify`](crate::params::classify) the parameters into path values,
//!    optional path values and leftover pairs
//! 3. Resolve the base (`scheme://host[:port]/` or `/`)
//! 4. Render the path and query
//!
//! Every failure (unknown route, missing value, constraint violation, bad
//! base URI) yields `None` from the `generate*` methods and a
//! [`GenerationError`](crate::error::GenerationError) from `try_generate*`.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use brrtlink::generate::{RequestContext, UrlGenerator};
//! use brrtlink::route::{RouteDefinition, RouteTable};
//! use brrtlink::params;
//!
//! let mut routes = RouteTable::new();
//! routes
//!     .map_route(RouteDefinition::new("foo.one.two", "foo/{one}/{two}").optional("one").optional("two"))
//!     .unwrap();
//!
//! let urls = UrlGenerator::new(Arc::new(routes), RequestContext::new("http", "localhost", Some(8000)));
//! assert_eq!(
//!     urls.generate_with("foo.one.two", &params! { "one" => 1 }).as_deref(),
//!     Some("http://localhost:8000/foo/1")
//! );
//! ```

mod base;
mod generator;
mod template;
mod url;

pub use base::{resolve_base, RequestContext};
pub use generator::{
    generate_template, generate_template_for, generate_url, try_generate_template, try_generate_template_for,
    try_generate_url, Generator, Link, TemplateGenerator, UrlGenerator,
};
pub use template::{render_path_template, render_query_template};
pub use url::{render_path, render_query};
