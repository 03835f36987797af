#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::fmt;

use brrtlink::route::RouteDefinition;
use brrtlink::{params, GenerationError, GenerationOptions, LinkParams, UriKind};
use serde_json::json;

use common::{generator, shared_routes, single_route, templates, BASE_URL};

#[derive(LinkParams)]
struct BarType {
    abc: Option<String>,
    def: Option<String>,
}

#[derive(LinkParams)]
struct ComplexRouteParameters {
    bar: Option<BarType>,
    id: i32,
}

struct Handle(u32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle-{}", self.0)
    }
}

#[derive(LinkParams)]
struct WithOpaque {
    id: i32,
    #[link_param(opaque)]
    test: Option<Handle>,
}

#[test]
fn test_fully_qualified_path() {
    let gen = templates(single_route(RouteDefinition::new("foo.show", "foo/{id}")));
    assert_eq!(
        gen.generate("foo.show").unwrap(),
        format!("{}foo/{{id}}", BASE_URL)
    );
}

#[test]
fn test_relative_path() {
    let gen = templates(single_route(RouteDefinition::new("foo.show", "foo/{id}")))
        .with_options(GenerationOptions::default().with_uri_kind(UriKind::Relative));
    assert_eq!(gen.generate("foo.show").unwrap(), "/foo/{id}");
}

#[test]
fn test_querystring_from_leftover_properties() {
    let gen = templates(shared_routes());
    assert_eq!(
        gen.generate_with("foo.show", &json!({"Id": 1, "Bar": "Foo"}))
            .unwrap(),
        "http://localhost:8000/foo/{id}{?bar}"
    );
    assert_eq!(
        gen.generate_with("foo.show", &params! { "Id" => 1, "Bar" => "Foo", "Bam" => 2 })
            .unwrap(),
        "http://localhost:8000/foo/{id}{?bar,bam}"
    );
}

#[test]
fn test_optional_path_items() {
    let gen = templates(shared_routes());
    assert_eq!(
        gen.generate("bar.show").unwrap(),
        "http://localhost:8000/bar{/id}"
    );
    assert_eq!(
        gen.generate("bar.one.two").unwrap(),
        "http://localhost:8000/bar{/one}{/two}"
    );
}

#[test]
fn test_multipart_path() {
    let gen = templates(shared_routes());
    assert_eq!(
        gen.generate("foo.one.two").unwrap(),
        "http://localhost:8000/foo/{one}/{two}"
    );
}

#[test]
fn test_inline_constraints_are_stripped() {
    let gen = templates(single_route(
        RouteDefinition::new("constraint", "constraints/{id:int}").constraint("id", r"\d+"),
    ));
    assert_eq!(
        gen.generate("constraint").unwrap(),
        format!("{}constraints/{{id}}", BASE_URL)
    );
}

#[test]
fn test_nested_dynamic_properties() {
    let gen = templates(shared_routes());
    let params = json!({"Id": 1, "Bar": {"Abc": "abc", "Def": "def"}});
    assert_eq!(
        gen.generate_with("foo.show", &params).unwrap(),
        "http://localhost:8000/foo/{id}{?bar.abc,bar.def}"
    );
}

#[test]
fn test_null_dynamic_branches_are_omitted() {
    let gen = templates(shared_routes());
    let params = json!({"Id": 1, "Bar": {"Abc": null}, "Bam": null});
    assert_eq!(
        gen.generate_with("foo.show", &params).unwrap(),
        "http://localhost:8000/foo/{id}"
    );
}

#[test]
fn test_typed_template_lists_every_nested_key() {
    let gen = templates(shared_routes());
    assert_eq!(
        gen.generate_for::<ComplexRouteParameters>("foo.show")
            .unwrap(),
        "http://localhost:8000/foo/{id}{?bar.abc,bar.def}"
    );
}

#[test]
fn test_combined_link_uses_type_for_template() {
    let links = generator(shared_routes());
    let value = ComplexRouteParameters { bar: None, id: 1 };
    let link = links.generate("foo.show", &value).unwrap();
    assert_eq!(link.url, "http://localhost:8000/foo/1");
    assert_eq!(link.template, "http://localhost:8000/foo/{id}{?bar.abc,bar.def}");

    let link = links
        .generate_dynamic("foo.show", &json!({"Id": 1, "Bar": {"Abc": "x"}}))
        .unwrap();
    assert_eq!(link.url, "http://localhost:8000/foo/1?bar.abc=x");
    assert_eq!(link.template, "http://localhost:8000/foo/{id}{?bar.abc}");

    let negative = ComplexRouteParameters { bar: None, id: -1 };
    assert!(links.generate("constraint", &negative).is_none());
}

#[test]
fn test_opaque_member_is_a_single_key() {
    let gen = templates(shared_routes());
    assert_eq!(
        gen.generate_for::<WithOpaque>("foo.show").unwrap(),
        "http://localhost:8000/foo/{id}{?test}"
    );
    let value = WithOpaque {
        id: 1,
        test: Some(Handle(7)),
    };
    assert_eq!(
        gen.generate_with("foo.show", &value).unwrap(),
        "http://localhost:8000/foo/{id}{?test}"
    );
}

#[test]
fn test_unknown_route() {
    let gen = templates(shared_routes());
    assert!(gen.generate("nope").is_none());
    assert_eq!(
        gen.try_generate("nope", None).unwrap_err(),
        GenerationError::RouteNotFound {
            route: "nope".to_string()
        }
    );
}

#[test]
fn test_template_needs_no_values() {
    let gen = templates(shared_routes());
    assert!(gen.generate("constraint").is_some());
    assert!(gen.generate_with("constraint", &json!({"id": "abc"})).is_some());
}

#[test]
fn test_base_uri_override_and_key_style() {
    let options = GenerationOptions::default()
        .with_base_uri("https://api.example.com/v2")
        .with_property_separator("_")
        .with_lowercase_keys(false);
    let gen = templates(shared_routes()).with_options(options);
    let params = json!({"Id": 1, "Bar": {"Abc": "abc"}});
    assert_eq!(
        gen.generate_with("foo.show", &params).unwrap(),
        "https://api.example.com/v2/foo/{id}{?Bar_Abc}"
    );
}

#[test]
fn test_segment_only_values_leave_template_unchanged() {
    let gen = templates(shared_routes());
    let cases = [
        ("foo.show", json!({"Id": 1})),
        ("bar.show", json!({"Id": 1})),
        ("bar.show", json!({})),
        ("bar.one.two", json!({"one": 1, "two": 2})),
        ("bar.one.two", json!({"Two": 2})),
        ("foo.one.two", json!({"one": "a", "two": "b"})),
        ("constraint", json!({"id": 5})),
    ];
    for (route, values) in cases {
        assert_eq!(
            gen.generate(route).unwrap(),
            gen.generate_with(route, &values).unwrap(),
            "route {}",
            route
        );
    }
}
