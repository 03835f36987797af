//! Concrete URL rendering
//!
//! Required segments take the caller's value or the route default, optional
//! segments are dropped together with their slash when no value is given, and
//! an empty string counts as no value. Every value is checked against the
//! segment's constraints before it is percent-encoded into the path.

use urlencoding::encode;

use crate::error::GenerationError;
use crate::params::ClassifiedParameters;
use crate::route::{RouteDescriptor, RouteParameter, SegmentPart};

/// Path portion of a URL, without a leading slash
pub fn render_path(
    route: &RouteDescriptor,
    classified: &ClassifiedParameters,
) -> Result<String, GenerationError> {
    let mut segments: Vec<String> = Vec::with_capacity(route.pattern().segments().len());

    for segment in route.pattern().segments() {
        let optional = segment
            .sole_parameter()
            .and_then(|p| route.parameter(&p.name))
            .filter(|p| p.optional);

        if let Some(param) = optional {
            if let Some(value) = classified
                .optional_path_value(&param.name)
                .filter(|v| !v.is_empty())
            {
                check(route, param, value)?;
                segments.push(encode(value).into_owned());
            }
            continue;
        }

        let mut rendered = String::new();
        for part in segment.parts() {
            match part {
                SegmentPart::Literal(text) => rendered.push_str(text),
                SegmentPart::Parameter(p) => {
                    let Some(param) = route.parameter(&p.name) else {
                        continue;
                    };
                    let value = classified
                        .path_value(&param.name)
                        .filter(|v| !v.is_empty())
                        .or(param.default.as_deref())
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| GenerationError::MissingRequiredValue {
                            route: route.name().to_string(),
                            segment: param.name.clone(),
                        })?;
                    check(route, param, value)?;
                    rendered.push_str(&encode(value));
                }
            }
        }
        segments.push(rendered);
    }

    Ok(segments.join("/"))
}

fn check(route: &RouteDescriptor, param: &RouteParameter, value: &str) -> Result<(), GenerationError> {
    if param.rejects(value) {
        return Err(GenerationError::ConstraintViolation {
            route: route.name().to_string(),
            segment: param.name.clone(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// `?k1=v1&k2=v2`, or the empty string when nothing is left over
#[must_use]
pub fn render_query(leftover: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in leftover {
        out.push(if out.is_empty() { '?' } else { '&' });
        out.push_str(&encode(key));
        out.push('=');
        out.push_str(&encode(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::options::GenerationOptions;
    use crate::params::{classify, ToParams};
    use crate::route::RouteDefinition;

    fn render(def: RouteDefinition, params: serde_json::Value) -> Result<String, GenerationError> {
        let route = RouteDescriptor::from_definition(&def).unwrap();
        let bag = params.to_params();
        let classified = classify(&route, Some(&bag), &GenerationOptions::default());
        render_path(&route, &classified)
    }

    #[test]
    fn required_segment_is_filled() {
        let out = render(RouteDefinition::new("a", "foo/{id}"), json!({"Id": 1})).unwrap();
        assert_eq!(out, "foo/1");
    }

    #[test]
    fn missing_required_value() {
        let err = render(RouteDefinition::new("a", "foo/{id}"), json!({})).unwrap_err();
        assert_eq!(
            err,
            GenerationError::MissingRequiredValue {
                route: "a".into(),
                segment: "id".into()
            }
        );
    }

    #[test]
    fn default_fills_missing_segment() {
        let out = render(
            RouteDefinition::new("a", "pages/{page}").default_value("page", "1"),
            json!({}),
        )
        .unwrap();
        assert_eq!(out, "pages/1");
    }

    #[test]
    fn optional_segments_leave_no_gap() {
        let def = RouteDefinition::new("a", "foo/{one}/{two}")
            .optional("one")
            .optional("two");
        assert_eq!(render(def.clone(), json!({})).unwrap(), "foo");
        assert_eq!(render(def.clone(), json!({"two": 2})).unwrap(), "foo/2");
        assert_eq!(render(def, json!({"one": 1, "two": 2})).unwrap(), "foo/1/2");
    }

    #[test]
    fn empty_values_count_as_absent() {
        let def = RouteDefinition::new("a", "foo/{one}/{two}")
            .optional("one")
            .optional("two");
        assert_eq!(render(def.clone(), json!({"one": "", "two": 2})).unwrap(), "foo/2");
        assert_eq!(render(def, json!({"one": "", "two": ""})).unwrap(), "foo");

        let err = render(RouteDefinition::new("b", "foo/{id}"), json!({"id": ""})).unwrap_err();
        assert_eq!(
            err,
            GenerationError::MissingRequiredValue {
                route: "b".into(),
                segment: "id".into()
            }
        );

        let out = render(
            RouteDefinition::new("c", "pages/{page}").default_value("page", "1"),
            json!({"page": ""}),
        )
        .unwrap();
        assert_eq!(out, "pages/1");
    }

    #[test]
    fn constraint_rejects_value() {
        let err = render(RouteDefinition::new("a", "c/{id:int}"), json!({"id": "abc"})).unwrap_err();
        assert!(matches!(err, GenerationError::ConstraintViolation { value, .. } if value == "abc"));

        let err = render(
            RouteDefinition::new("b", "c/{id}").optional("id").constraint("id", r"\d+"),
            json!({"id": "x"}),
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::ConstraintViolation { .. }));
    }

    #[test]
    fn path_values_are_percent_encoded() {
        let out = render(
            RouteDefinition::new("a", "files/{name}.{ext}"),
            json!({"name": "my file/v2", "ext": "txt"}),
        )
        .unwrap();
        assert_eq!(out, "files/my%20file%2Fv2.txt");
    }

    #[test]
    fn query_string() {
        assert_eq!(render_query(&[]), "");
        let leftover = vec![
            ("bar.abc".to_string(), "a b".to_string()),
            ("q".to_string(), "x&y".to_string()),
        ];
        assert_eq!(render_query(&leftover), "?bar.abc=a%20b&q=x%26y");
    }
}
