//! Basic checks: one predicate and one fixed message per category

use super::diff::content_equals;
use super::flags::BasicComparisons;
use crate::model::Instance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicCheck {
    NullInstances,
    SchemaReference,
    Units,
    FilingIndicators,
    ContextCount,
    FactCount,
    DomainNamespaces,
    Entity,
    Period,
}

impl BasicCheck {
    /// Every check, in the order messages are reported.
    pub const ALL: [BasicCheck; 9] = [
        BasicCheck::NullInstances,
        BasicCheck::SchemaReference,
        BasicCheck::Units,
        BasicCheck::FilingIndicators,
        BasicCheck::ContextCount,
        BasicCheck::FactCount,
        BasicCheck::DomainNamespaces,
        BasicCheck::Entity,
        BasicCheck::Period,
    ];

    pub fn flag(self) -> BasicComparisons {
        match self {
            BasicCheck::NullInstances => BasicComparisons::NULL_INSTANCES,
            BasicCheck::SchemaReference => BasicComparisons::SCHEMA_REFERENCE,
            BasicCheck::Units => BasicComparisons::UNITS,
            BasicCheck::FilingIndicators => BasicComparisons::FILING_INDICATORS,
            BasicCheck::ContextCount => BasicComparisons::CONTEXT_COUNT,
            BasicCheck::FactCount => BasicComparisons::FACT_COUNT,
            BasicCheck::DomainNamespaces => BasicComparisons::DOMAIN_NAMESPACES,
            BasicCheck::Entity => BasicComparisons::ENTITY,
            BasicCheck::Period => BasicComparisons::PERIOD,
        }
    }

    /// Message reported when the check fails.
    pub fn label(self) -> &'static str {
        match self {
            BasicCheck::NullInstances => "At least one the instances is null",
            BasicCheck::SchemaReference => "Different SchemaReference",
            BasicCheck::Units => "Different Units",
            BasicCheck::FilingIndicators => "Different FilingIndicators",
            BasicCheck::ContextCount => "Different number of Contexts",
            BasicCheck::FactCount => "Different number of Facts",
            BasicCheck::DomainNamespaces => "Different domain namespaces",
            BasicCheck::Entity => "Different Entity",
            BasicCheck::Period => "Different Period",
        }
    }

    /// Evaluates the check on two present instances.
    pub fn holds(self, a: &Instance, b: &Instance) -> bool {
        match self {
            // both instances are borrowed, so neither can be missing here
            BasicCheck::NullInstances => true,
            BasicCheck::SchemaReference => a.schema_reference == b.schema_reference,
            BasicCheck::Units => content_equals(&a.units, &b.units),
            BasicCheck::FilingIndicators => {
                content_equals(&a.filing_indicators, &b.filing_indicators)
            }
            BasicCheck::ContextCount => a.contexts.len() == b.contexts.len(),
            BasicCheck::FactCount => a.facts.len() == b.facts.len(),
            BasicCheck::DomainNamespaces => {
                a.used_domain_namespaces() == b.used_domain_namespaces()
            }
            // `b` is only consulted when `a` has a first context
            BasicCheck::Entity => match a.first_context() {
                Some(first) => {
                    first.entity.as_ref() == b.first_context().and_then(|c| c.entity.as_ref())
                }
                None => true,
            },
            BasicCheck::Period => match a.first_context() {
                Some(first) => {
                    first.period.as_ref() == b.first_context().and_then(|c| c.period.as_ref())
                }
                None => true,
            },
        }
    }
}

/// Labels of the selected checks that fail, in declaration order.
pub fn basic_messages(a: &Instance, b: &Instance, selection: BasicComparisons) -> Vec<String> {
    BasicCheck::ALL
        .iter()
        .filter(|check| selection.contains(check.flag()))
        .filter(|check| !check.holds(a, b))
        .map(|check| check.label().to_string())
        .collect()
}
