//! Structural comparison of two XBRL instances
//!
//! The comparer runs the selected basic checks first, then the selected
//! detailed categories. Messages keep category declaration order; only the
//! domain namespace category sorts its own lines.

pub mod basic;
pub mod detailed;
pub mod diff;
pub mod flags;
pub mod report;

use std::io::Read;
use std::path::Path;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::Instance;
use crate::{Error, Result};

pub use basic::BasicCheck;
pub use detailed::Category;
pub use flags::{BasicComparisons, ComparisonTypes};
pub use report::ComparisonReport;

/// Comparer configured with a category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceComparer {
    types: ComparisonTypes,
    basics: BasicComparisons,
}

impl Default for InstanceComparer {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceComparer {
    /// Every category and every basic check.
    pub fn new() -> Self {
        Self {
            types: ComparisonTypes::ALL,
            basics: BasicComparisons::ALL,
        }
    }

    pub fn with_types(mut self, types: ComparisonTypes) -> Self {
        self.types = types;
        self
    }

    /// Basic checks to run. Ignored unless the types include `BASIC`.
    pub fn with_basics(mut self, basics: BasicComparisons) -> Self {
        self.basics = basics;
        self
    }

    pub fn compare(&self, a: &Instance, b: &Instance) -> ComparisonReport {
        let mut messages = Vec::new();

        if self.types.contains(ComparisonTypes::BASIC) {
            messages.extend(basic::basic_messages(a, b, self.basics));
        }

        let selected: Vec<Category> = Category::ALL
            .iter()
            .copied()
            .filter(|c| self.types.contains(c.flag()))
            .collect();
        debug!(
            "Comparing {} detailed categories ({} vs {} facts)",
            selected.len(),
            a.facts.len(),
            b.facts.len()
        );

        #[cfg(feature = "parallel")]
        let detailed: Vec<Vec<String>> = selected.par_iter().map(|c| c.messages(a, b)).collect();
        #[cfg(not(feature = "parallel"))]
        let detailed: Vec<Vec<String>> = selected.iter().map(|c| c.messages(a, b)).collect();

        messages.extend(detailed.into_iter().flatten());
        ComparisonReport::new(messages)
    }

    /// Compares instances that may be missing.
    ///
    /// A missing instance is reported through the `NULL_INSTANCES` basic
    /// check and nothing else runs. Without that check selected there is
    /// nothing meaningful to evaluate and [`Error::NullInstance`] is returned.
    pub fn compare_optional(
        &self,
        a: Option<&Instance>,
        b: Option<&Instance>,
    ) -> Result<ComparisonReport> {
        match (a, b) {
            (Some(a), Some(b)) => Ok(self.compare(a, b)),
            _ if self.types.contains(ComparisonTypes::BASIC)
                && self.basics.contains(BasicComparisons::NULL_INSTANCES) =>
            {
                Ok(ComparisonReport::new(vec![BasicCheck::NullInstances
                    .label()
                    .to_string()]))
            }
            _ => Err(Error::NullInstance),
        }
    }

    pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        a: P,
        b: Q,
    ) -> Result<ComparisonReport> {
        let a = Instance::from_file(a)?;
        let b = Instance::from_file(b)?;
        Ok(self.compare(&a, &b))
    }

    pub fn compare_streams<R: Read, S: Read>(&self, a: R, b: S) -> Result<ComparisonReport> {
        let a = Instance::from_reader(a)?;
        let b = Instance::from_reader(b)?;
        Ok(self.compare(&a, &b))
    }
}

/// Compares with every category and every basic check.
pub fn compare(a: &Instance, b: &Instance) -> ComparisonReport {
    InstanceComparer::new().compare(a, b)
}

/// Compares the given categories with every basic check.
pub fn compare_with(a: &Instance, b: &Instance, types: ComparisonTypes) -> ComparisonReport {
    InstanceComparer::new().with_types(types).compare(a, b)
}

pub fn compare_selected(
    a: &Instance,
    b: &Instance,
    types: ComparisonTypes,
    basics: BasicComparisons,
) -> ComparisonReport {
    InstanceComparer::new()
        .with_types(types)
        .with_basics(basics)
        .compare(a, b)
}

pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> Result<ComparisonReport> {
    InstanceComparer::new().compare_files(a, b)
}

pub fn compare_files_with<P: AsRef<Path>, Q: AsRef<Path>>(
    a: P,
    b: Q,
    types: ComparisonTypes,
) -> Result<ComparisonReport> {
    InstanceComparer::new().with_types(types).compare_files(a, b)
}

pub fn compare_streams<R: Read, S: Read>(a: R, b: S) -> Result<ComparisonReport> {
    InstanceComparer::new().compare_streams(a, b)
}

pub fn compare_streams_with<R: Read, S: Read>(
    a: R,
    b: S,
    types: ComparisonTypes,
) -> Result<ComparisonReport> {
    InstanceComparer::new().with_types(types).compare_streams(a, b)
}
