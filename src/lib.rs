//! xbrl-compare - XBRL instance document model and structural comparison
//!
//! Licensed under AGPL-3.0

pub mod compare;
pub mod model;
mod reader;
mod writer;

// Re-export main types
pub use compare::{
    compare, compare_files, compare_files_with, compare_selected, compare_streams,
    compare_streams_with, compare_with, BasicComparisons, ComparisonReport, ComparisonTypes,
    InstanceComparer,
};
pub use model::{
    Context, Entity, ExplicitMember, Fact, FilingIndicator, Identifier, Instance, Period, QName,
    Scenario, SchemaReference, TypedMember, Unit,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("At least one of the instances is missing")]
    NullInstance,

    #[error("Unknown comparison selection: {0}")]
    InvalidSelection(String),
}
