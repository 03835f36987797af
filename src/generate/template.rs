//! RFC 6570 template rendering
//!
//! Path segments are rendered from the route pattern:
//!
//! ```text
//! foo/{id}              -> foo/{id}
//! constraints/{id:int}  -> constraints/{id}
//! bar/{id}   (optional) -> bar{/id}
//! ```
//!
//! Leftover keys become a form-style query expression: `{?bar.abc,bar.def}`.
//! Characters outside the varname alphabet are percent-encoded.

use crate::route::{RouteDescriptor, SegmentPart};

/// Path portion of a template, without a leading slash
#[must_use]
pub fn render_path_template(route: &RouteDescriptor) -> String {
    let mut out = String::new();

    for (index, segment) in route.pattern().segments().iter().enumerate() {
        let optional = segment
            .sole_parameter()
            .and_then(|p| route.parameter(&p.name))
            .filter(|p| p.optional);

        if let Some(param) = optional {
            // The base already ends in `/`, so a leading optional segment has
            // no slash of its own to carry.
            if index == 0 {
                out.push('{');
            } else {
                out.push_str("{/");
            }
            out.push_str(&param.name);
            out.push('}');
            continue;
        }

        if index > 0 {
            out.push('/');
        }
        for part in segment.parts() {
            match part {
                SegmentPart::Literal(text) => out.push_str(text),
                SegmentPart::Parameter(p) => {
                    out.push('{');
                    out.push_str(&p.name);
                    out.push('}');
                }
            }
        }
    }

    out
}

/// `{?k1,k2,...}`, or the empty string when there are no keys
#[must_use]
pub fn render_query_template<'a, I>(keys: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for key in keys {
        out.push_str(if out.is_empty() { "{?" } else { "," });
        push_varname(&mut out, key);
    }
    if !out.is_empty() {
        out.push('}');
    }
    out
}

/// Variable names may only hold `ALPHA / DIGIT / "_" / "."`; every other
/// byte is percent-encoded.
fn push_varname(out: &mut String, key: &str) {
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.' {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
}
