//! Base URI resolution
//!
//! Absolute output is prefixed with `scheme://host[:port]/` taken from the
//! current request, or with the configured override. Relative output starts
//! with `/`. Either way the prefix ends in exactly one `/`, and rendered
//! paths are appended without a leading slash.

use http::header::HOST;
use http::{Request, Uri};
use url::Url;

use crate::error::GenerationError;
use crate::options::{GenerationOptions, UriKind};

/// Scheme, host and port of the request a link is generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl RequestContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Take scheme, host and port from an absolute URL; path and query are ignored
    pub fn parse(url: &str) -> Result<Self, GenerationError> {
        let parsed = Url::parse(url).map_err(|e| GenerationError::InvalidBaseUri {
            base: url.to_string(),
            reason: e.to_string(),
        })?;
        let host = parsed
            .host_str()
            .ok_or_else(|| GenerationError::InvalidBaseUri {
                base: url.to_string(),
                reason: "URL has no host".to_string(),
            })?;
        Ok(Self::new(parsed.scheme(), host, parsed.port()))
    }

    /// Context from an absolute request URI
    ///
    /// Returns `None` for origin-form URIs (`/foo`) that carry no authority.
    #[must_use]
    pub fn from_uri(uri: &Uri) -> Option<Self> {
        let host = uri.host()?;
        let scheme = uri.scheme_str().unwrap_or("http");
        Some(Self::new(scheme, host, uri.port_u16()))
    }

    /// Context from an incoming request
    ///
    /// Uses the request URI's authority when present, otherwise the `Host`
    /// header. The scheme defaults to `http` when the URI does not carry one.
    #[must_use]
    pub fn from_request<B>(request: &Request<B>) -> Option<Self> {
        if let Some(ctx) = Self::from_uri(request.uri()) {
            return Some(ctx);
        }
        let host_header = request.headers().get(HOST)?.to_str().ok()?;
        let authority: http::uri::Authority = host_header.parse().ok()?;
        let scheme = request.uri().scheme_str().unwrap_or("http");
        Some(Self::new(scheme, authority.host(), authority.port_u16()))
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `scheme://host[:port]/`, with the scheme's default port elided
    pub fn base_url(&self) -> Result<Url, GenerationError> {
        let raw = match self.port {
            Some(port) => format!("{}://{}:{}/", self.scheme, self.host, port),
            None => format!("{}://{}/", self.scheme, self.host),
        };
        Url::parse(&raw).map_err(|e| GenerationError::InvalidBaseUri {
            base: raw.clone(),
            reason: e.to_string(),
        })
    }
}

/// Prefix for generated output, always ending in `/`
pub fn resolve_base(
    options: &GenerationOptions,
    request: &RequestContext,
) -> Result<String, GenerationError> {
    if options.uri_kind == UriKind::Relative {
        return Ok("/".to_string());
    }

    let url = match &options.base_uri {
        Some(base) => Url::parse(base).map_err(|e| GenerationError::InvalidBaseUri {
            base: base.clone(),
            reason: e.to_string(),
        })?,
        None => request.base_url()?,
    };

    let mut base = String::from(url.as_str());
    if let Some(cut) = base.find(['?', '#']) {
        base.truncate(cut);
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_from_request_keeps_explicit_port() {
        let ctx = RequestContext::parse("http://localhost:8000/some/page?x=1").unwrap();
        let base = resolve_base(&GenerationOptions::default(), &ctx).unwrap();
        assert_eq!(base, "http://localhost:8000/");
    }

    #[test]
    fn default_port_is_elided() {
        let ctx = RequestContext::new("https", "example.com", Some(443));
        let base = resolve_base(&GenerationOptions::default(), &ctx).unwrap();
        assert_eq!(base, "https://example.com/");
    }

    #[test]
    fn relative_ignores_request() {
        let ctx = RequestContext::new("http", "example.com", None);
        let base = resolve_base(&GenerationOptions::relative(), &ctx).unwrap();
        assert_eq!(base, "/");
    }

    #[test]
    fn override_gets_trailing_slash() {
        let ctx = RequestContext::new("http", "example.com", None);
        let options = GenerationOptions::default().with_base_uri("https://api.example.com/v1?x=1");
        assert_eq!(resolve_base(&options, &ctx).unwrap(), "https://api.example.com/v1/");
    }

    #[test]
    fn bad_override_is_an_error() {
        let ctx = RequestContext::new("http", "example.com", None);
        let options = GenerationOptions::default().with_base_uri("not a url");
        assert!(matches!(
            resolve_base(&options, &ctx),
            Err(GenerationError::InvalidBaseUri { .. })
        ));
    }

    #[test]
    fn context_from_request_uri_and_host_header() {
        let req = Request::builder()
            .uri("http://localhost:8000/foo")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_request(&req).unwrap();
        assert_eq!(ctx.host(), "localhost");
        assert_eq!(ctx.port(), Some(8000));

        let req = Request::builder()
            .uri("/foo")
            .header(HOST, "example.com:9000")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_request(&req).unwrap();
        assert_eq!(ctx.scheme(), "http");
        assert_eq!(ctx.host(), "example.com");
        assert_eq!(ctx.port(), Some(9000));

        let req = Request::builder().uri("/foo").body(()).unwrap();
        assert!(RequestContext::from_request(&req).is_none());
    }
}
