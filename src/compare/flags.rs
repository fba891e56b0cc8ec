//! Category selections for the comparer

use std::str::FromStr;

use bitflags::{bitflags, Flags};

use crate::{Error, Result};

bitflags! {
    /// Detailed comparison categories. `BASIC` additionally runs the
    /// basic checks selected by [`BasicComparisons`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ComparisonTypes: u32 {
        const BASIC = 1 << 0;
        const CONTEXTS = 1 << 1;
        const FACTS = 1 << 2;
        const DOMAIN_NAMESPACES = 1 << 3;
        const UNITS = 1 << 4;
        const ENTITY = 1 << 5;
        const PERIOD = 1 << 6;
        const TAXONOMY_VERSION = 1 << 7;
        const SCHEMA_REFERENCE = 1 << 8;
        const FILING_INDICATORS = 1 << 9;
        const ALL = Self::BASIC.bits()
            | Self::CONTEXTS.bits()
            | Self::FACTS.bits()
            | Self::DOMAIN_NAMESPACES.bits()
            | Self::UNITS.bits()
            | Self::ENTITY.bits()
            | Self::PERIOD.bits()
            | Self::TAXONOMY_VERSION.bits()
            | Self::SCHEMA_REFERENCE.bits()
            | Self::FILING_INDICATORS.bits();
    }
}

bitflags! {
    /// Cheap yes/no checks run before the detailed categories.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BasicComparisons: u32 {
        const NULL_INSTANCES = 1 << 0;
        const SCHEMA_REFERENCE = 1 << 1;
        const UNITS = 1 << 2;
        const FILING_INDICATORS = 1 << 3;
        const CONTEXT_COUNT = 1 << 4;
        const FACT_COUNT = 1 << 5;
        const DOMAIN_NAMESPACES = 1 << 6;
        const ENTITY = 1 << 7;
        const PERIOD = 1 << 8;
        const ALL = Self::NULL_INSTANCES.bits()
            | Self::SCHEMA_REFERENCE.bits()
            | Self::UNITS.bits()
            | Self::FILING_INDICATORS.bits()
            | Self::CONTEXT_COUNT.bits()
            | Self::FACT_COUNT.bits()
            | Self::DOMAIN_NAMESPACES.bits()
            | Self::ENTITY.bits()
            | Self::PERIOD.bits();
    }
}

impl Default for ComparisonTypes {
    fn default() -> Self {
        Self::ALL
    }
}

impl Default for BasicComparisons {
    fn default() -> Self {
        Self::ALL
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parses a comma separated list of flag names. Matching ignores case,
/// `-` and `_`, so `domain-namespaces`, `DomainNamespaces` and
/// `DOMAIN_NAMESPACES` all select the same flag.
fn parse_selection<F: Flags + Copy>(input: &str) -> Result<F> {
    let mut selection = F::empty();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let wanted = normalize(token);
        let flag = F::FLAGS
            .iter()
            .find(|flag| normalize(flag.name()) == wanted)
            .ok_or_else(|| Error::InvalidSelection(token.to_string()))?;
        selection.insert(*flag.value());
    }
    Ok(selection)
}

impl FromStr for ComparisonTypes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_selection(s)
    }
}

impl FromStr for BasicComparisons {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_selection(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_union_of_every_flag() {
        let union = ComparisonTypes::FLAGS
            .iter()
            .fold(ComparisonTypes::empty(), |acc, f| acc | *f.value());
        assert_eq!(union, ComparisonTypes::ALL);
        assert_eq!(ComparisonTypes::ALL, ComparisonTypes::all());
        assert_eq!(BasicComparisons::ALL, BasicComparisons::all());
    }

    #[test]
    fn test_parse_selection_names() {
        let types: ComparisonTypes = "units, domain-namespaces,Facts".parse().unwrap();
        assert_eq!(
            types,
            ComparisonTypes::UNITS | ComparisonTypes::DOMAIN_NAMESPACES | ComparisonTypes::FACTS
        );

        let basics: BasicComparisons = "ContextCount,null_instances".parse().unwrap();
        assert_eq!(
            basics,
            BasicComparisons::CONTEXT_COUNT | BasicComparisons::NULL_INSTANCES
        );

        assert_eq!("all".parse::<BasicComparisons>().unwrap(), BasicComparisons::ALL);
        assert_eq!("".parse::<ComparisonTypes>().unwrap(), ComparisonTypes::empty());
    }

    #[test]
    fn test_parse_selection_rejects_unknown_names() {
        let err = "units,bogus".parse::<ComparisonTypes>().unwrap_err();
        assert!(matches!(err, Error::InvalidSelection(name) if name == "bogus"));
    }
}
