//! # brrtlink
//!
//! **brrtlink** turns named routes into links: concrete URLs for a set of
//! values, and [RFC 6570](https://www.rfc-editor.org/rfc/rfc6570) URI templates
//! that describe the same route to API clients.
//!
//! ## Overview
//!
//! A host web framework registers its routes by name (`foo.show` ->
//! `foo/{id}`). Given a route name and a parameter object, brrtlink:
//!
//! - fills path segments from properties with matching names
//! - drops optional segments that have no value
//! - flattens everything else into a query string with dotted keys
//!
//! The same route can be rendered as a template instead, listing the query
//! keys as a form-style expression.
//!
//! ## Architecture
//!
//! - **[`route`]** - Path pattern parsing, route descriptors and the route table
//! - **[`params`]** - Parameter objects and their classification against a route
//! - **[`generate`]** - Template and URL rendering, and the generator types
//! - **[`options`]** - Generation settings (absolute/relative output, key style)
//! - **[`config`]** - Routes files in YAML or JSON
//! - **[`logging`]** - Optional `tracing` subscriber setup
//! - **[`error`]** - Generation and route registration errors
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use brrtlink::{Generator, LinkParams, RequestContext, RouteDefinition, RouteTable};
//!
//! #[derive(LinkParams)]
//! struct Filter {
//!     abc: Option<String>,
//!     def: Option<String>,
//! }
//!
//! #[derive(LinkParams)]
//! struct ShowFoo {
//!     id: u32,
//!     bar: Option<Filter>,
//! }
//!
//! let mut routes = RouteTable::new();
//! routes.map_route(RouteDefinition::new("foo.show", "foo/{id}")).unwrap();
//!
//! let links = Generator::new(
//!     Arc::new(routes),
//!     RequestContext::new("http", "localhost", Some(8000)),
//! );
//!
//! let link = links
//!     .generate("foo.show", &ShowFoo { id: 1, bar: None })
//!     .unwrap();
//! assert_eq!(link.url, "http://localhost:8000/foo/1");
//! assert_eq!(link.template, "http://localhost:8000/foo/{id}{?bar.abc,bar.def}");
//! ```

// Lets derive output name `::brrtlink` paths from inside this crate too.
extern crate self as brrtlink;

pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod options;
pub mod params;
pub mod route;

pub use brrtlink_macros::LinkParams;
pub use config::{load_routes, RouteConfig};
pub use error::{GenerationError, RouteConfigError};
pub use generate::{Generator, Link, RequestContext, TemplateGenerator, UrlGenerator};
pub use options::{GenerationOptions, UriKind};
pub use params::{ParamBag, ParamValue, ToParams};
pub use route::{RouteDefinition, RouteResolver, RouteTable};
