//! Detailed comparison categories
//!
//! Each category projects both instances onto a sequence, takes the
//! multiset difference and renders the leftovers as `(a) ...` / `(b) ...`
//! lines.

use ahash::AHashMap;
use log::trace;

use super::diff::{multiset_difference, multiset_difference_by};
use super::flags::ComparisonTypes;
use crate::model::{FactRef, Identifier, Instance, Period, Scenario};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Contexts,
    Facts,
    DomainNamespaces,
    Units,
    Entity,
    Period,
    TaxonomyVersion,
    SchemaReference,
    FilingIndicators,
}

impl Category {
    /// Every category, in the order messages are reported.
    pub const ALL: [Category; 9] = [
        Category::Contexts,
        Category::Facts,
        Category::DomainNamespaces,
        Category::Units,
        Category::Entity,
        Category::Period,
        Category::TaxonomyVersion,
        Category::SchemaReference,
        Category::FilingIndicators,
    ];

    pub fn flag(self) -> ComparisonTypes {
        match self {
            Category::Contexts => ComparisonTypes::CONTEXTS,
            Category::Facts => ComparisonTypes::FACTS,
            Category::DomainNamespaces => ComparisonTypes::DOMAIN_NAMESPACES,
            Category::Units => ComparisonTypes::UNITS,
            Category::Entity => ComparisonTypes::ENTITY,
            Category::Period => ComparisonTypes::PERIOD,
            Category::TaxonomyVersion => ComparisonTypes::TAXONOMY_VERSION,
            Category::SchemaReference => ComparisonTypes::SCHEMA_REFERENCE,
            Category::FilingIndicators => ComparisonTypes::FILING_INDICATORS,
        }
    }

    pub fn messages(self, a: &Instance, b: &Instance) -> Vec<String> {
        let messages = match self {
            Category::Contexts => scenario_messages(a, b),
            Category::Facts => fact_messages(a, b),
            Category::DomainNamespaces => domain_namespace_messages(a, b),
            Category::Units => multiset_difference(&a.units, &b.units).lines(|u| u.to_string()),
            Category::Entity => entity_messages(a, b),
            Category::Period => period_messages(a, b),
            Category::TaxonomyVersion => taxonomy_version_messages(a, b),
            Category::SchemaReference => schema_reference_messages(a, b),
            Category::FilingIndicators => filing_indicator_messages(a, b),
        };
        trace!("{:?}: {} differences", self, messages.len());
        messages
    }
}

/// Rendered scenario to context id. Contexts sharing a scenario overwrite
/// each other; the last one wins.
fn scenario_lookup(instance: &Instance) -> AHashMap<String, &str> {
    let mut lookup = AHashMap::with_capacity(instance.contexts.len());
    for context in &instance.contexts {
        lookup.insert(context.scenario_key(&instance.namespaces), context.id.as_str());
    }
    lookup
}

fn scenario_lines(
    side: &str,
    instance: &Instance,
    leftovers: &[&Option<&Scenario>],
    messages: &mut Vec<String>,
) {
    if leftovers.is_empty() {
        return;
    }
    let lookup = scenario_lookup(instance);
    for scenario in leftovers {
        let key = scenario
            .map(|s| s.render(&instance.namespaces))
            .unwrap_or_default();
        let context_id = lookup.get(key.as_str()).copied().unwrap_or_default();
        messages.push(format!("({}) {}: {}", side, context_id, key));
    }
}

fn scenario_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let scenarios_a: Vec<Option<&Scenario>> =
        a.contexts.iter().map(|c| c.scenario.as_ref()).collect();
    let scenarios_b: Vec<Option<&Scenario>> =
        b.contexts.iter().map(|c| c.scenario.as_ref()).collect();

    let diff = multiset_difference(&scenarios_a, &scenarios_b);
    let mut messages = Vec::with_capacity(diff.len());
    scenario_lines("a", a, &diff.only_in_a, &mut messages);
    scenario_lines("b", b, &diff.only_in_b, &mut messages);
    messages
}

fn fact_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let facts_a = a.fact_refs();
    let facts_b = b.fact_refs();
    let diff = multiset_difference_by(
        &facts_a,
        &facts_b,
        |f: &FactRef<'_>| (f.fact.metric.clone(), f.fact.value.clone()),
        |left, right| left.matches(right),
    );
    diff.lines(|f| format!("{} ({})", f.fact, f.scenario_key()))
}

fn domain_namespace_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let namespaces_a: Vec<&str> = a.used_domain_namespaces().into_iter().collect();
    let namespaces_b: Vec<&str> = b.used_domain_namespaces().into_iter().collect();
    let mut messages = multiset_difference(&namespaces_a, &namespaces_b).lines(|ns| ns.to_string());
    messages.sort();
    messages
}

fn first_identifier(instance: &Instance) -> Vec<&Identifier> {
    instance
        .first_context()
        .and_then(|c| c.entity.as_ref())
        .map(|e| &e.identifier)
        .into_iter()
        .collect()
}

fn entity_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let identifiers_a = first_identifier(a);
    let identifiers_b = first_identifier(b);
    multiset_difference(&identifiers_a, &identifiers_b).lines(|id| format!("Identifier={}", id))
}

fn first_period(instance: &Instance) -> Vec<&Period> {
    instance
        .first_context()
        .and_then(|c| c.period.as_ref())
        .into_iter()
        .collect()
}

fn period_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let periods_a = first_period(a);
    let periods_b = first_period(b);
    multiset_difference(&periods_a, &periods_b).lines(|p| p.to_string())
}

fn taxonomy_version_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let versions_a = [a.taxonomy_version.as_deref()];
    let versions_b = [b.taxonomy_version.as_deref()];
    multiset_difference(&versions_a, &versions_b)
        .lines(|v| format!("taxonomy-version: {}", v.unwrap_or_default()))
}

fn schema_reference_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let references_a = [a.schema_reference.as_ref()];
    let references_b = [b.schema_reference.as_ref()];
    multiset_difference(&references_a, &references_b)
        .lines(|r| r.map(ToString::to_string).unwrap_or_default())
}

fn filing_indicator_messages(a: &Instance, b: &Instance) -> Vec<String> {
    let filed_a: Vec<_> = a.filed_indicators().collect();
    let filed_b: Vec<_> = b.filed_indicators().collect();
    multiset_difference(&filed_a, &filed_b).lines(|fi| fi.to_string())
}
