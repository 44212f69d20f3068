//! Property tests for the JSON to descriptor serializer.

use proptest::prelude::*;
use serde_json::{Map, Value};

use lookout::domain::services::{serialize, NAMESPACES, ROOT_TAG};

fn key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}(:[a-zA-Z]{1,8})?")
        .unwrap()
        .prop_filter("not a namespace declaration", |k| !k.starts_with("xmlns"))
}

fn text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 ]{0,16}").unwrap()
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        text().prop_map(Value::String),
        proptest::collection::vec(text().prop_map(Value::String), 0..4).prop_map(Value::Array),
    ]
}

fn object() -> impl Strategy<Value = Map<String, Value>> {
    let leaves = proptest::collection::btree_map(key(), leaf(), 0..6)
        .prop_map(|m| m.into_iter().collect::<Map<String, Value>>());
    leaves.prop_recursive(3, 24, 4, |inner| {
        proptest::collection::btree_map(key(), inner.prop_map(Value::Object), 0..3).prop_map(
            |m| m.into_iter().collect::<Map<String, Value>>(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every root carries all namespace declarations first.
    #[test]
    fn property_namespaces_on_every_root(
        object in object()
    ) {
        let xml = serialize(&Value::Object(object).to_string()).unwrap();

        let mut expected = format!("<{}", ROOT_TAG);
        for (key, uri) in NAMESPACES {
            expected.push_str(&format!(" {}=\"{}\"", key, uri));
        }
        prop_assert!(xml.starts_with(&expected));
        let closing = format!("</{}>", ROOT_TAG);
        prop_assert!(xml.ends_with(&closing));
    }

    /// PROPERTY: Booleans always encode with their type hint.
    #[test]
    fn property_booleans_are_typed(
        name in "[a-z]{1,8}",
        flag in any::<bool>(),
    ) {
        let json = format!("{{\"{}\": {}}}", name, flag);
        let xml = serialize(&json).unwrap();
        let attribute = format!("{}=\"{{Boolean}}{}\"", name, flag);
        prop_assert!(xml.contains(&attribute));
    }

    /// PROPERTY: Arbitrary input never panics.
    #[test]
    fn property_never_panics(
        s in "(?s).{0,128}"
    ) {
        let _ = serialize(&s);
    }
}
