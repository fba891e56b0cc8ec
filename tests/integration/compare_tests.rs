//! Comparison of whole instances, read from fixtures or built in memory

use pretty_assertions::assert_eq;
use xbrl_compare::{
    compare, compare_selected, compare_with, BasicComparisons, ComparisonTypes, Instance,
    InstanceComparer, Unit,
};

use crate::common::{eur, lei_context, load_fixture, with_filing_indicators};

#[test]
fn test_fixture_is_equal_to_itself() {
    let instance = load_fixture("ars_a.xbrl");
    let report = compare(&instance, &instance);
    assert!(report.success);
    assert!(report.messages.is_empty());
}

#[test]
fn test_fixture_differences_full_report() {
    let a = load_fixture("ars_a.xbrl");
    let b = load_fixture("ars_b.xbrl");

    let report = compare(&a, &b);
    assert!(!report.success);
    assert_eq!(
        report.messages,
        vec![
            "Different Units",
            "Different FilingIndicators",
            "(a) c2: VG=s2c_AM:x80",
            "(b) ctx_2: VG=s2c_AM:x81",
            "(a) s2md_met:mi363=45000 (VG=s2c_AM:x80)",
            "(a) s2md_met:mi364=100 (VG=s2c_AM:x80)",
            "(b) s2md_met:mi363=45000 (VG=s2c_AM:x81)",
            "(b) s2md_met:mi364=100 (VG=s2c_AM:x81)",
            "(a) uPURE: xbrli:pure",
            "(a) S.02.01",
        ]
    );
}

#[test]
fn test_context_ids_do_not_affect_fact_matching() {
    let a = load_fixture("ars_a.xbrl");
    let b = load_fixture("ars_b.xbrl");

    // si1 sits in c1 / ctx_1, which differ only by id
    let report = compare_with(&a, &b, ComparisonTypes::FACTS);
    assert!(!report
        .messages
        .iter()
        .any(|m| m.contains("s2md_met:si1")));
}

#[test]
fn test_different_context_count() {
    let a = load_fixture("ars_a.xbrl");
    let mut b = a.clone();
    b.contexts.pop();

    let report = compare_selected(
        &a,
        &b,
        ComparisonTypes::BASIC,
        BasicComparisons::CONTEXT_COUNT,
    );
    assert_eq!(report.messages, vec!["Different number of Contexts"]);
    assert!(!report.success);
}

#[test]
fn test_filing_indicator_only_in_a() {
    let a = with_filing_indicators(&["X"]);
    let b = with_filing_indicators(&[]);

    let detailed = compare_with(&a, &b, ComparisonTypes::FILING_INDICATORS);
    assert_eq!(detailed.messages, vec!["(a) X"]);
    assert!(!detailed.success);

    let basic = compare_selected(
        &a,
        &b,
        ComparisonTypes::BASIC,
        BasicComparisons::FILING_INDICATORS,
    );
    assert_eq!(basic.messages, vec!["Different FilingIndicators"]);
    assert!(!basic.success);
}

#[test]
fn test_instances_without_contexts_have_equal_entity_and_period() {
    let a = Instance::new();
    let b = Instance::new();

    let report = compare_selected(
        &a,
        &b,
        ComparisonTypes::BASIC | ComparisonTypes::ENTITY | ComparisonTypes::PERIOD,
        BasicComparisons::ENTITY | BasicComparisons::PERIOD,
    );
    assert!(report.success);
}

#[test]
fn test_missing_contexts_on_a_side_match_anything() {
    let a = Instance::new();
    let mut b = Instance::new();
    b.contexts.push(lei_context("c1"));

    let report = compare_selected(
        &a,
        &b,
        ComparisonTypes::BASIC,
        BasicComparisons::ENTITY | BasicComparisons::PERIOD,
    );
    assert!(report.success);
}

#[test]
fn test_entity_against_missing_entity() {
    let mut a = Instance::new();
    a.contexts.push(lei_context("c1"));
    let b = Instance::new();

    let report = compare_selected(
        &a,
        &b,
        ComparisonTypes::BASIC | ComparisonTypes::ENTITY,
        BasicComparisons::ENTITY,
    );
    assert_eq!(
        report.messages,
        vec![
            "Different Entity",
            "(a) Identifier=http://standards.iso.org/iso/17442:LEI123",
        ]
    );
}

#[test]
fn test_duplicate_units_are_counted() {
    let mut a = Instance::new();
    let mut b = Instance::new();
    let u1 = Unit::new("u1", eur());
    let u2 = Unit::new("u2", eur());
    a.units = vec![u1.clone(), u1.clone(), u2.clone()];
    b.units = vec![u1, u2.clone(), u2];

    let report = compare_with(&a, &b, ComparisonTypes::UNITS);
    assert_eq!(
        report.messages,
        vec!["(a) u1: iso4217:EUR", "(b) u2: iso4217:EUR"]
    );
}

#[test]
fn test_empty_selection_always_succeeds() {
    let a = load_fixture("ars_a.xbrl");
    let b = load_fixture("ars_b.xbrl");
    let report = InstanceComparer::new()
        .with_types(ComparisonTypes::empty())
        .compare(&a, &b);
    assert!(report.success);
}

#[test]
fn test_report_serializes_to_json() {
    let a = with_filing_indicators(&["X"]);
    let b = with_filing_indicators(&[]);
    let report = compare_with(&a, &b, ComparisonTypes::FILING_INDICATORS);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "success": false, "messages": ["(a) X"] })
    );
}
