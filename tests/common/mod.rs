#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use brrtlink::route::{RouteDefinition, RouteTable};
use brrtlink::{Generator, RequestContext, TemplateGenerator, UrlGenerator};

pub const BASE_URL: &str = "http://localhost:8000/";

/// The route set most tests share
pub fn shared_routes() -> RouteTable {
    RouteTable::from_definitions([
        RouteDefinition::new("foo.show", "foo/{id}"),
        RouteDefinition::new("bar.show", "bar/{id}").optional("id"),
        RouteDefinition::new("bar.one.two", "bar/{one}/{two}")
            .optional("one")
            .optional("two"),
        RouteDefinition::new("foo.one.two", "foo/{one}/{two}"),
        RouteDefinition::new("constraint", "constraints/{id:int}").constraint("id", r"\d+"),
    ])
    .unwrap()
}

/// A table holding a single route
pub fn single_route(def: RouteDefinition) -> RouteTable {
    RouteTable::from_definitions([def]).unwrap()
}

pub fn request() -> RequestContext {
    RequestContext::parse(BASE_URL).unwrap()
}

pub fn templates(routes: RouteTable) -> TemplateGenerator {
    TemplateGenerator::new(Arc::new(routes), request())
}

pub fn urls(routes: RouteTable) -> UrlGenerator {
    UrlGenerator::new(Arc::new(routes), request())
}

pub fn generator(routes: RouteTable) -> Generator {
    Generator::new(Arc::new(routes), request())
}

pub mod temp_files {
    use std::io::Write;

    use tempfile::NamedTempFile;

    /// Write `content` to a temporary file with the given extension
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_routes(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("brrtlink_routes_")
            .suffix(&format!(".{}", ext))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
