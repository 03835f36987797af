use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::GenerationError;
use crate::options::GenerationOptions;
use crate::params::{classify, classify_shape, ParamBag, ParamShape, ToParams};
use crate::route::{RouteDescriptor, RouteResolver};

use super::base::{resolve_base, RequestContext};
use super::template::{render_path_template, render_query_template};
use super::url::{render_path, render_query};

fn lookup(
    routes: &dyn RouteResolver,
    route_name: &str,
) -> Result<Arc<RouteDescriptor>, GenerationError> {
    routes
        .resolve(route_name)
        .ok_or_else(|| GenerationError::RouteNotFound {
            route: route_name.to_string(),
        })
}

fn report<T>(route_name: &str, kind: &'static str, result: Result<T, GenerationError>) -> Option<T> {
    match result {
        Ok(out) => Some(out),
        Err(err @ GenerationError::RouteNotFound { .. }) => {
            warn!(route = %route_name, kind, error = %err, "Link generation failed");
            None
        }
        Err(err) => {
            debug!(route = %route_name, kind, error = %err, "Link generation failed");
            None
        }
    }
}

/// Template for a route, with leftover keys taken from a parameter object
///
/// Null values and all-null nested objects contribute no keys.
pub fn try_generate_template(
    routes: &dyn RouteResolver,
    request: &RequestContext,
    route_name: &str,
    options: &GenerationOptions,
    params: Option<&ParamBag>,
) -> Result<String, GenerationError> {
    let route = lookup(routes, route_name)?;
    let classified = classify(&route, params, options);

    let mut out = resolve_base(options, request)?;
    out.push_str(&render_path_template(&route));
    out.push_str(&render_query_template(classified.leftover_keys()));

    debug!(route = %route_name, template = %out, "Template generated");
    Ok(out)
}

/// Template for a route, with leftover keys taken from a parameter type
///
/// Every leaf of every nested field is listed whether or not a value would be
/// present at runtime.
pub fn try_generate_template_for<T: ParamShape + ?Sized>(
    routes: &dyn RouteResolver,
    request: &RequestContext,
    route_name: &str,
    options: &GenerationOptions,
) -> Result<String, GenerationError> {
    let route = lookup(routes, route_name)?;
    let keys = classify_shape(&route, &T::param_shape(), options);

    let mut out = resolve_base(options, request)?;
    out.push_str(&render_path_template(&route));
    out.push_str(&render_query_template(keys.iter().map(String::as_str)));

    debug!(route = %route_name, template = %out, "Template generated");
    Ok(out)
}

/// Concrete URL for a route
pub fn try_generate_url(
    routes: &dyn RouteResolver,
    request: &RequestContext,
    route_name: &str,
    options: &GenerationOptions,
    params: Option<&ParamBag>,
) -> Result<String, GenerationError> {
    let route = lookup(routes, route_name)?;
    let classified = classify(&route, params, options);

    let path = render_path(&route, &classified)?;
    let mut out = resolve_base(options, request)?;
    out.push_str(&path);
    out.push_str(&render_query(classified.leftover()));

    debug!(route = %route_name, url = %out, "URL generated");
    Ok(out)
}

/// [`try_generate_template`] with every failure mapped to `None`
#[must_use]
pub fn generate_template(
    routes: &dyn RouteResolver,
    request: &RequestContext,
    route_name: &str,
    options: &GenerationOptions,
    params: Option<&ParamBag>,
) -> Option<String> {
    report(
        route_name,
        "template",
        try_generate_template(routes, request, route_name, options, params),
    )
}

/// [`try_generate_template_for`] with every failure mapped to `None`
#[must_use]
pub fn generate_template_for<T: ParamShape + ?Sized>(
    routes: &dyn RouteResolver,
    request: &RequestContext,
    route_name: &str,
    options: &GenerationOptions,
) -> Option<String> {
    report(
        route_name,
        "template",
        try_generate_template_for::<T>(routes, request, route_name, options),
    )
}

/// [`try_generate_url`] with every failure mapped to `None`
#[must_use]
pub fn generate_url(
    routes: &dyn RouteResolver,
    request: &RequestContext,
    route_name: &str,
    options: &GenerationOptions,
    params: Option<&ParamBag>,
) -> Option<String> {
    report(
        route_name,
        "url",
        try_generate_url(routes, request, route_name, options, params),
    )
}

/// Route table, request and options shared by the generator types
#[derive(Clone)]
struct Context {
    routes: Arc<dyn RouteResolver>,
    request: RequestContext,
    options: GenerationOptions,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("request", &self.request)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Produces RFC 6570 templates for named routes
///
/// ```rust
/// use std::sync::Arc;
/// use brrtlink::generate::{RequestContext, TemplateGenerator};
/// use brrtlink::route::{RouteDefinition, RouteTable};
/// use brrtlink::params;
///
/// let mut routes = RouteTable::new();
/// routes.map_route(RouteDefinition::new("foo.show", "foo/{id}")).unwrap();
///
/// let request = RequestContext::new("http", "localhost", Some(8000));
/// let generator = TemplateGenerator::new(Arc::new(routes), request);
///
/// assert_eq!(
///     generator.generate_with("foo.show", &params! { "Id" => 1, "Bar" => "x", "Bam" => 2 }).as_deref(),
///     Some("http://localhost:8000/foo/{id}{?bar,bam}")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    ctx: Context,
}

impl TemplateGenerator {
    pub fn new(routes: Arc<dyn RouteResolver>, request: RequestContext) -> Self {
        Self {
            ctx: Context {
                routes,
                request,
                options: GenerationOptions::default(),
            },
        }
    }

    /// Same route table and request, different options
    #[must_use]
    pub fn with_options(&self, options: GenerationOptions) -> Self {
        let mut ctx = self.ctx.clone();
        ctx.options = options;
        Self { ctx }
    }

    #[must_use]
    pub fn options(&self) -> &GenerationOptions {
        &self.ctx.options
    }

    /// Template with no query expression
    #[must_use]
    pub fn generate(&self, route_name: &str) -> Option<String> {
        report(route_name, "template", self.try_generate(route_name, None))
    }

    /// Template whose query expression lists the object's leftover keys
    #[must_use]
    pub fn generate_with<P: ToParams + ?Sized>(&self, route_name: &str, params: &P) -> Option<String> {
        let bag = params.to_params();
        report(route_name, "template", self.try_generate(route_name, Some(&bag)))
    }

    /// Template whose query expression lists every leftover key of `T`
    #[must_use]
    pub fn generate_for<T: ParamShape + ?Sized>(&self, route_name: &str) -> Option<String> {
        let Context {
            routes,
            request,
            options,
        } = &self.ctx;
        generate_template_for::<T>(routes.as_ref(), request, route_name, options)
    }

    pub fn try_generate(
        &self,
        route_name: &str,
        params: Option<&ParamBag>,
    ) -> Result<String, GenerationError> {
        let Context {
            routes,
            request,
            options,
        } = &self.ctx;
        try_generate_template(routes.as_ref(), request, route_name, options, params)
    }

    pub fn try_generate_for<T: ParamShape + ?Sized>(
        &self,
        route_name: &str,
    ) -> Result<String, GenerationError> {
        let Context {
            routes,
            request,
            options,
        } = &self.ctx;
        try_generate_template_for::<T>(routes.as_ref(), request, route_name, options)
    }
}

/// Produces concrete URLs for named routes
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    ctx: Context,
}

impl UrlGenerator {
    pub fn new(routes: Arc<dyn RouteResolver>, request: RequestContext) -> Self {
        Self {
            ctx: Context {
                routes,
                request,
                options: GenerationOptions::default(),
            },
        }
    }

    /// Same route table and request, different options
    #[must_use]
    pub fn with_options(&self, options: GenerationOptions) -> Self {
        let mut ctx = self.ctx.clone();
        ctx.options = options;
        Self { ctx }
    }

    #[must_use]
    pub fn options(&self) -> &GenerationOptions {
        &self.ctx.options
    }

    /// URL for a route that needs no caller values
    #[must_use]
    pub fn generate(&self, route_name: &str) -> Option<String> {
        report(route_name, "url", self.try_generate(route_name, None))
    }

    /// URL with path segments and query string filled from `params`
    #[must_use]
    pub fn generate_with<P: ToParams + ?Sized>(&self, route_name: &str, params: &P) -> Option<String> {
        let bag = params.to_params();
        report(route_name, "url", self.try_generate(route_name, Some(&bag)))
    }

    pub fn try_generate(
        &self,
        route_name: &str,
        params: Option<&ParamBag>,
    ) -> Result<String, GenerationError> {
        let Context {
            routes,
            request,
            options,
        } = &self.ctx;
        try_generate_url(routes.as_ref(), request, route_name, options, params)
    }
}

/// A route rendered both ways
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Concrete URL for the given values
    pub url: String,
    /// Template for the value's type
    pub template: String,
}

/// Template and URL generation over one route table and request
#[derive(Debug, Clone)]
pub struct Generator {
    templates: TemplateGenerator,
    urls: UrlGenerator,
}

impl Generator {
    pub fn new(routes: Arc<dyn RouteResolver>, request: RequestContext) -> Self {
        Self {
            templates: TemplateGenerator::new(Arc::clone(&routes), request.clone()),
            urls: UrlGenerator::new(routes, request),
        }
    }

    #[must_use]
    pub fn with_options(&self, options: GenerationOptions) -> Self {
        Self {
            templates: self.templates.with_options(options.clone()),
            urls: self.urls.with_options(options),
        }
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateGenerator {
        &self.templates
    }

    #[must_use]
    pub fn urls(&self) -> &UrlGenerator {
        &self.urls
    }

    /// URL from the value, template from its type
    ///
    /// `None` when either half cannot be produced.
    #[must_use]
    pub fn generate<T: ToParams + ParamShape>(&self, route_name: &str, params: &T) -> Option<Link> {
        let url = self.urls.generate_with(route_name, params)?;
        let template = self.templates.generate_for::<T>(route_name)?;
        Some(Link { url, template })
    }

    /// URL and template both derived from the value
    #[must_use]
    pub fn generate_dynamic<P: ToParams + ?Sized>(&self, route_name: &str, params: &P) -> Option<Link> {
        let bag = params.to_params();
        let url = report(route_name, "url", self.urls.try_generate(route_name, Some(&bag)))?;
        let template = report(
            route_name,
            "template",
            self.templates.try_generate(route_name, Some(&bag)),
        )?;
        Some(Link { url, template })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::route::{RouteDefinition, RouteTable};

    fn fixture() -> (RouteTable, RequestContext) {
        let mut routes = RouteTable::new();
        routes
            .map_route(RouteDefinition::new("foo.show", "foo/{id}"))
            .unwrap();
        (routes, RequestContext::new("http", "localhost", Some(8000)))
    }

    #[test]
    fn generators_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateGenerator>();
        assert_send_sync::<UrlGenerator>();
        assert_send_sync::<Generator>();
    }

    #[test]
    fn free_functions_match_generators() {
        let (routes, request) = fixture();
        let options = GenerationOptions::default();
        let bag = params! { "Id" => 1, "Q" => "x" };

        assert_eq!(
            generate_url(&routes, &request, "foo.show", &options, Some(&bag)).as_deref(),
            Some("http://localhost:8000/foo/1?q=x")
        );
        assert_eq!(
            generate_template(&routes, &request, "foo.show", &options, Some(&bag)).as_deref(),
            Some("http://localhost:8000/foo/{id}{?q}")
        );
        assert_eq!(
            generate_template(&routes, &request, "foo.show", &options, None).as_deref(),
            Some("http://localhost:8000/foo/{id}")
        );
        assert!(generate_url(&routes, &request, "foo.show", &options, None).is_none());
    }

    #[test]
    fn with_options_leaves_original_untouched() {
        let (routes, request) = fixture();
        let absolute = UrlGenerator::new(Arc::new(routes), request);
        let relative = absolute.with_options(GenerationOptions::relative());
        let bag = params! { "Id" => 1 };

        assert_eq!(
            relative.generate_with("foo.show", &bag).as_deref(),
            Some("/foo/1")
        );
        assert_eq!(
            absolute.generate_with("foo.show", &bag).as_deref(),
            Some("http://localhost:8000/foo/1")
        );
    }

    #[test]
    fn bad_base_uri_is_reported() {
        let (routes, request) = fixture();
        let options = GenerationOptions::default().with_base_uri("::nope");
        let err = try_generate_url(&routes, &request, "foo.show", &options, Some(&params! { "Id" => 1 }))
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidBaseUri { .. }));
    }
}
