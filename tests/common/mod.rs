//! Common test utilities for xbrl-compare tests

use std::path::PathBuf;

use tempfile::TempDir;
use xbrl_compare::model::ns;
use xbrl_compare::{Context, Entity, FilingIndicator, Instance, Period, QName};

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> Instance {
    Instance::from_file(fixture_path(name)).expect("Failed to read fixture")
}

/// Temporary directory that lives as long as the context
pub struct TestContext {
    _temp_dir: TempDir,
    pub dir: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            dir,
        }
    }

    /// Writes the instance into the temp directory and returns its path
    pub fn save(&self, name: &str, instance: &Instance) -> PathBuf {
        let path = self.dir.join(name);
        instance.save(&path).expect("Failed to write instance");
        path
    }
}

pub fn lei_context(id: &str) -> Context {
    Context::new(id)
        .with_entity(Entity::new("http://standards.iso.org/iso/17442", "LEI123"))
        .with_period(Period::Instant(
            chrono::NaiveDate::from_ymd_opt(2015, 12, 31).expect("valid date"),
        ))
}

/// Instance with one context and the given filed indicators
pub fn with_filing_indicators(values: &[&str]) -> Instance {
    let mut instance = Instance::new();
    instance.contexts.push(lei_context("c1"));
    for value in values {
        instance
            .filing_indicators
            .push(FilingIndicator::new(value, true, "c1"));
    }
    instance
}

pub fn eur() -> QName {
    QName::new(ns::ISO4217, "EUR").with_prefix("iso4217")
}
