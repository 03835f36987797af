#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use brrtlink::options::GenerationOptions;
use brrtlink::params::classify;
use brrtlink::route::{RouteDefinition, RouteDescriptor};
use brrtlink::ParamBag;
use proptest::prelude::*;

use common::{single_route, templates, urls};

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for n in names {
        if n != "id" && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every non-null property lands in exactly one bucket, leftover in declaration order
    #[test]
    fn prop_each_property_classified_once(
        names in prop::collection::vec("[a-z]{1,6}", 0..8),
        id in any::<u32>(),
        include_id in any::<bool>(),
    ) {
        let names = dedup(names);
        let route = RouteDescriptor::from_definition(&RouteDefinition::new("items", "items/{id}")).unwrap();

        let mut bag = ParamBag::new();
        if include_id {
            bag.insert("Id", id);
        }
        for (i, name) in names.iter().enumerate() {
            bag.insert(name.as_str(), i as u64);
        }

        let c = classify(&route, Some(&bag), &GenerationOptions::default());
        let id_text = id.to_string();
        prop_assert_eq!(c.path_value("id"), include_id.then_some(id_text.as_str()));

        let keys: Vec<&str> = c.leftover_keys().collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(keys, expected);
    }

    /// Optional segments render exactly the supplied values, in pattern order, with no gaps
    #[test]
    fn prop_optional_segments_leave_no_gaps(supplied in prop::collection::vec(any::<bool>(), 1..6)) {
        let segment_names: Vec<String> = (0..supplied.len()).map(|i| format!("s{}", i)).collect();
        let pattern = format!(
            "opt/{}",
            segment_names.iter().map(|n| format!("{{{}}}", n)).collect::<Vec<_>>().join("/")
        );
        let mut def = RouteDefinition::new("opt", pattern);
        for name in &segment_names {
            def = def.optional(name.as_str());
        }
        let gen = urls(single_route(def.clone()));

        let mut bag = ParamBag::new();
        let mut expected = String::from("http://localhost:8000/opt");
        for (i, present) in supplied.iter().enumerate() {
            if *present {
                bag.insert(segment_names[i].as_str(), i as u64);
                expected.push('/');
                expected.push_str(&i.to_string());
            }
        }

        let url = gen.try_generate("opt", Some(&bag)).unwrap();
        prop_assert_eq!(&url, &expected);
        prop_assert!(!url["http://".len()..].contains("//"));

        let template = templates(single_route(def)).generate("opt").unwrap();
        for name in &segment_names {
            let expr = format!("{{/{}}}", name);
            prop_assert!(template.contains(&expr));
        }
    }

    /// Values that only fill segments never change the template
    #[test]
    fn prop_segment_values_leave_template_unchanged(
        id in any::<i64>(),
        one in proptest::option::of("[a-z0-9]{1,8}"),
    ) {
        let def = RouteDefinition::new("items", "items/{id}/{one}").optional("one");
        let gen = templates(single_route(def));

        let mut bag = ParamBag::new().with("Id", id);
        if let Some(one) = one {
            bag.insert("One", one);
        }
        prop_assert_eq!(
            gen.generate("items").unwrap(),
            gen.try_generate("items", Some(&bag)).unwrap()
        );
    }

    /// A nested object whose leaves are all null contributes nothing
    #[test]
    fn prop_all_null_nested_object_vanishes(
        leaves in prop::collection::vec("[a-z]{1,6}", 1..6),
        depth in 1usize..4,
    ) {
        let mut inner = ParamBag::new();
        for leaf in &leaves {
            inner.insert(leaf.as_str(), Option::<i32>::None);
        }
        for level in 0..depth {
            inner = ParamBag::new().with(format!("level{}", level), inner);
        }
        let bag = ParamBag::new().with("Id", 1).with("Filter", inner);

        let gen = urls(single_route(RouteDefinition::new("items", "items/{id}")));
        prop_assert_eq!(
            gen.try_generate("items", Some(&bag)).unwrap(),
            "http://localhost:8000/items/1"
        );
    }
}
