//! Property-based tests for the model crate.
//!
//! Laws checked here:
//! - `missing_child` holds exactly when the attribute is absent
//! - `not_contains` is the complement of `contains`
//! - `is_any` agrees with `equals_ordinal` over the candidates
//! - reference text survives a parse / display round trip

use crate::attribute::{Attribute, AttributeQuery, CaseSensitivity};
use crate::reference::Reference;
use crate::test_support::{attr, block_with};
use crate::value::Value;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_ident() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,11}").unwrap()
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-zA-Z0-9./:_-]{0,12}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::btree_map(arb_ident(), inner, 0..4).prop_map(Value::Map),
        ]
    })
}

fn arb_reference_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (arb_ident(), arb_ident(), arb_ident())
            .prop_map(|(t, n, a)| format!("aws_{t}.{n}.{a}")),
        (arb_ident(), arb_ident(), arb_ident()).prop_map(|(t, n, a)| format!("data.{t}.{n}.{a}")),
        (arb_ident(), arb_ident()).prop_map(|(n, a)| format!("module.{n}.{a}")),
        arb_ident().prop_map(|n| format!("var.{n}")),
        arb_ident().prop_map(|n| format!("local.{n}")),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn missing_child_iff_attribute_absent(
        present in prop::collection::btree_set(arb_ident(), 0..5),
        probe in arb_ident(),
    ) {
        let attrs = present.iter().map(|n| attr(n, Value::Null)).collect();
        let b = block_with("resource", &["aws_ebs_volume", "data"], attrs);
        prop_assert_eq!(b.missing_child(&probe), !present.contains(&probe));
        prop_assert_eq!(b.missing_child(&probe), b.attribute(&probe).is_nil());
    }

    #[test]
    fn not_contains_is_complement(value in arb_value(), needle in "[a-z0-9./:_-]{0,6}") {
        let a = attr("x", value);
        prop_assert_eq!(a.not_contains(&needle), !a.contains(&needle));
        let absent: Option<&Attribute> = None;
        prop_assert!(absent.not_contains(&needle));
    }

    #[test]
    fn is_any_agrees_with_equals(value in arb_scalar(), candidates in prop::collection::vec("[a-z]{0,3}", 0..4)) {
        let a = attr("x", value.clone());
        let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let expected = refs.iter().any(|c| a.equals(c, CaseSensitivity::Ordinal));
        prop_assert_eq!(a.is_any(&refs), expected);
        if value.is_null() {
            prop_assert!(!a.is_any(&refs));
        }
    }

    #[test]
    fn ignore_case_equality_is_implied_by_ordinal(s in "[a-zA-Z]{0,8}", t in "[a-zA-Z]{0,8}") {
        let a = attr("x", Value::String(s));
        if a.equals_ordinal(&t) {
            prop_assert!(a.equals(&t, CaseSensitivity::IgnoreCase));
        }
    }

    #[test]
    fn reference_text_round_trips(text in arb_reference_text()) {
        let parsed: Reference = text.parse().expect("generated reference parses");
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn value_get_is_total(value in arb_value(), key in arb_scalar()) {
        let got = value.get(&key);
        if !matches!(value, Value::List(_) | Value::Map(_)) {
            prop_assert!(got.is_null());
        }
    }
}
