//! Reading and writing instance documents through files and streams

use std::fs::File;

use pretty_assertions::assert_eq;
use xbrl_compare::{
    compare, compare_files, compare_files_with, compare_streams, compare_streams_with,
    ComparisonTypes, Error, Fact, Instance, QName, Scenario, TypedMember, Unit,
};

use crate::common::{eur, fixture_path, lei_context, load_fixture, TestContext};

const MET: &str = "http://eiopa.europa.eu/xbrl/s2md/dict/met";

#[test]
fn test_fixture_contents() {
    let instance = load_fixture("ars_a.xbrl");
    assert_eq!(instance.taxonomy_version.as_deref(), Some("2.0.1"));
    assert_eq!(instance.contexts.len(), 2);
    assert_eq!(instance.units.len(), 2);
    assert_eq!(instance.facts.len(), 3);
    assert_eq!(instance.filing_indicators.len(), 3);
    assert_eq!(instance.filed_indicators().count(), 2);
    assert_eq!(
        instance.used_domain_namespaces().into_iter().collect::<Vec<_>>(),
        vec!["http://eiopa.europa.eu/xbrl/s2c/dict/dom/AM"]
    );
}

#[test]
fn test_file_and_stream_agree() {
    let path = fixture_path("ars_a.xbrl");

    let from_files = compare_files(&path, &path).unwrap();
    assert!(from_files.success);

    let from_streams = compare_streams(File::open(&path).unwrap(), File::open(&path).unwrap()).unwrap();
    assert!(from_streams.success);

    let from_file = Instance::from_file(&path).unwrap();
    let from_stream = Instance::from_reader(File::open(&path).unwrap()).unwrap();
    assert!(compare(&from_file, &from_stream).success);
}

#[test]
fn test_path_and_stream_forms_with_selection() {
    let a = fixture_path("ars_a.xbrl");
    let b = fixture_path("ars_b.xbrl");

    let by_path = compare_files_with(&a, &b, ComparisonTypes::FILING_INDICATORS).unwrap();
    let by_stream = compare_streams_with(
        File::open(&a).unwrap(),
        File::open(&b).unwrap(),
        ComparisonTypes::FILING_INDICATORS,
    )
    .unwrap();
    assert_eq!(by_path.messages, vec!["(a) S.02.01"]);
    assert_eq!(by_path, by_stream);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let missing = fixture_path("does_not_exist.xbrl");
    assert!(matches!(
        compare_files(&missing, &missing),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_written_fixture_reads_back_equal() {
    let ctx = TestContext::new();
    let original = load_fixture("ars_b.xbrl");
    let path = ctx.save("copy.xbrl", &original);

    let copy = Instance::from_file(&path).unwrap();
    let report = compare(&original, &copy);
    assert!(report.success, "{}", report);
    assert_eq!(copy.schema_reference, original.schema_reference);
    assert_eq!(copy.filing_indicators, original.filing_indicators);
}

#[test]
fn test_built_instance_round_trips() {
    let ctx = TestContext::new();
    let mut instance = Instance::new();
    instance.namespaces.insert("iso4217", xbrl_compare::model::ns::ISO4217);
    instance.namespaces.insert("s2c_dim", "http://eiopa.europa.eu/xbrl/s2c/dict/dim");
    instance.namespaces.insert("s2c_typ", "http://eiopa.europa.eu/xbrl/s2c/dict/typ");
    instance.namespaces.insert("s2md_met", MET);

    let typed = TypedMember {
        dimension: instance.qname("s2c_dim:NF").unwrap(),
        domain: instance.qname("s2c_typ:ID").unwrap(),
        value: "FUND-1".to_string(),
    };
    instance
        .contexts
        .push(lei_context("c1").with_scenario(Scenario::new().with_typed(typed)));
    instance.units.push(Unit::new("uEUR", eur()));
    instance.facts.push(
        Fact::new(QName::new(MET, "mi363").with_prefix("s2md_met"), "c1", "1 < 2")
            .with_unit("uEUR", "2"),
    );

    let path = ctx.save("built.xbrl", &instance);
    let copy = Instance::from_file(&path).unwrap();
    assert_eq!(copy.facts[0].value, "1 < 2");
    assert_eq!(copy.contexts[0].scenario_key(&copy.namespaces), "NF=FUND-1");
    assert!(compare(&instance, &copy).success);
}

#[test]
fn test_empty_scenario_survives_round_trip() {
    let ctx = TestContext::new();
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<xbrli:xbrl xmlns:xbrli="http://www.xbrl.org/2003/instance">
  <xbrli:context id="c1">
    <xbrli:entity><xbrli:identifier scheme="LEI">A</xbrli:identifier></xbrli:entity>
    <xbrli:period><xbrli:instant>2015-12-31</xbrli:instant></xbrli:period>
    <xbrli:scenario></xbrli:scenario>
  </xbrli:context>
</xbrli:xbrl>"#;
    let original = Instance::from_bytes(xml.as_bytes()).unwrap();
    let path = ctx.save("empty-scenario.xbrl", &original);
    let copy = Instance::from_file(&path).unwrap();

    let report = compare(&original, &copy);
    assert!(report.success, "{}", report);
    assert_eq!(copy.contexts[0].scenario, None);
}
