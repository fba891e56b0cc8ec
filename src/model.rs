use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use ahash::AHashMap;
use chrono::NaiveDate;
use compact_str::CompactString;
use serde::Serialize;

use crate::{Error, Result};

// ============================================================================
// Well-known namespaces
// ============================================================================

pub mod ns {
    pub const XBRLI: &str = "http://www.xbrl.org/2003/instance";
    pub const LINK: &str = "http://www.xbrl.org/2003/linkbase";
    pub const XLINK: &str = "http://www.w3.org/1999/xlink";
    pub const XBRLDI: &str = "http://xbrl.org/2006/xbrldi";
    pub const FIND: &str = "http://www.eurofiling.info/xbrl/ext/filing-indicators";
    pub const ISO4217: &str = "http://www.xbrl.org/2003/iso4217";

    /// Prefixes written for the namespaces every instance needs.
    pub const STANDARD: [(&str, &str); 5] = [
        ("xbrli", XBRLI),
        ("link", LINK),
        ("xlink", XLINK),
        ("xbrldi", XBRLDI),
        ("find", FIND),
    ];
}

// ============================================================================
// Qualified names
// ============================================================================

/// An XML qualified name. Identity is the namespace and local name; the
/// prefix is carried only for rendering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QName {
    pub namespace: CompactString,
    pub local_name: CompactString,
    #[serde(skip_serializing_if = "CompactString::is_empty")]
    pub prefix: CompactString,
}

impl QName {
    pub fn new(namespace: &str, local_name: &str) -> Self {
        Self {
            namespace: CompactString::from(namespace),
            local_name: CompactString::from(local_name),
            prefix: CompactString::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = CompactString::from(prefix);
        self
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local_name == other.local_name
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local_name.hash(state);
    }
}

impl PartialOrd for QName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.namespace
            .cmp(&other.namespace)
            .then_with(|| self.local_name.cmp(&other.local_name))
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{}:{}", self.prefix, self.local_name)
        }
    }
}

/// Ordered prefix to namespace table of an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Namespaces(Vec<(CompactString, CompactString)>);

impl Namespaces {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Binds `prefix` to `namespace`, replacing an earlier binding of the prefix.
    pub fn insert(&mut self, prefix: &str, namespace: &str) {
        match self.0.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = CompactString::from(namespace),
            None => self
                .0
                .push((CompactString::from(prefix), CompactString::from(namespace))),
        }
    }

    pub fn namespace_of(&self, prefix: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, n)| n.as_str())
    }

    pub fn prefix_of(&self, namespace: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, n)| *n == namespace)
            .map(|(p, _)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Dimensions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExplicitMember {
    pub dimension: QName,
    pub value: QName,
}

impl ExplicitMember {
    pub fn new(dimension: QName, value: QName) -> Self {
        Self { dimension, value }
    }

    /// `prefix:local` form of the member value. A value built without a
    /// prefix takes the one `namespaces` binds to its namespace.
    pub fn member_code(&self, namespaces: &Namespaces) -> String {
        let prefix = match self.value.prefix.as_str() {
            "" => namespaces.prefix_of(&self.value.namespace).unwrap_or_default(),
            prefix => prefix,
        };
        format!("{}:{}", prefix, self.value.local_name)
    }

    /// `dimension=prefix:value`, the key explicit members are diffed by.
    pub fn render(&self, namespaces: &Namespaces) -> String {
        format!("{}={}", self.dimension.local_name, self.member_code(namespaces))
    }
}

impl PartialOrd for ExplicitMember {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExplicitMember {
    // Local names first (ordinal); namespaces only break ties so that the
    // ordering stays consistent with equality.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dimension
            .local_name
            .cmp(&other.dimension.local_name)
            .then_with(|| self.value.local_name.cmp(&other.value.local_name))
            .then_with(|| self.dimension.namespace.cmp(&other.dimension.namespace))
            .then_with(|| self.value.namespace.cmp(&other.value.namespace))
    }
}

impl fmt::Display for ExplicitMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&Namespaces::new()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypedMember {
    pub dimension: QName,
    pub domain: QName,
    pub value: String,
}

impl fmt::Display for TypedMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.dimension.local_name, self.value)
    }
}

fn sorted<T: Ord>(items: &[T]) -> Vec<&T> {
    let mut refs: Vec<&T> = items.iter().collect();
    refs.sort();
    refs
}

/// Dimensional qualifiers of a context. Member order is not significant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scenario {
    pub explicit_members: Vec<ExplicitMember>,
    pub typed_members: Vec<TypedMember>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_explicit(mut self, member: ExplicitMember) -> Self {
        self.explicit_members.push(member);
        self
    }

    pub fn with_typed(mut self, member: TypedMember) -> Self {
        self.typed_members.push(member);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.explicit_members.is_empty() && self.typed_members.is_empty()
    }

    /// Sorted members joined by `", "`, with explicit member prefixes
    /// resolved through `namespaces`.
    pub fn render(&self, namespaces: &Namespaces) -> String {
        let explicit = sorted(&self.explicit_members)
            .into_iter()
            .map(|m| m.render(namespaces));
        let typed = sorted(&self.typed_members)
            .into_iter()
            .map(ToString::to_string);
        explicit.chain(typed).collect::<Vec<_>>().join(", ")
    }
}

impl PartialEq for Scenario {
    fn eq(&self, other: &Self) -> bool {
        self.explicit_members.len() == other.explicit_members.len()
            && self.typed_members.len() == other.typed_members.len()
            && sorted(&self.explicit_members) == sorted(&other.explicit_members)
            && sorted(&self.typed_members) == sorted(&other.typed_members)
    }
}

impl Eq for Scenario {}

impl Hash for Scenario {
    fn hash<H: Hasher>(&self, state: &mut H) {
        sorted(&self.explicit_members).hash(state);
        sorted(&self.typed_members).hash(state);
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&Namespaces::new()))
    }
}

// ============================================================================
// Context
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub scheme: CompactString,
    pub value: CompactString,
}

impl Identifier {
    pub fn new(scheme: &str, value: &str) -> Self {
        Self {
            scheme: CompactString::from(scheme),
            value: CompactString::from(value),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.value)
    }
}

/// Entity segment. Like [`Scenario`], member order is not significant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Segment {
    pub explicit_members: Vec<ExplicitMember>,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.explicit_members.len() == other.explicit_members.len()
            && sorted(&self.explicit_members) == sorted(&other.explicit_members)
    }
}

impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        sorted(&self.explicit_members).hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entity {
    pub identifier: Identifier,
    pub segment: Option<Segment>,
}

impl Entity {
    pub fn new(scheme: &str, value: &str) -> Self {
        Self {
            identifier: Identifier::new(scheme, value),
            segment: None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Instant(NaiveDate),
    Duration { start: NaiveDate, end: NaiveDate },
    Forever,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Instant(date) => write!(f, "{}", date),
            Period::Duration { start, end } => write!(f, "{}--{}", start, end),
            Period::Forever => write!(f, "forever"),
        }
    }
}

/// Parses an `xs:date` or `xs:dateTime` value down to its date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    let date = text.split('T').next().unwrap_or(text);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| Error::Parse(format!("Invalid date '{}': {}", text, e)))
}

#[derive(Debug, Clone, Serialize)]
pub struct Context {
    pub id: CompactString,
    pub entity: Option<Entity>,
    pub period: Option<Period>,
    pub scenario: Option<Scenario>,
}

impl Context {
    pub fn new(id: &str) -> Self {
        Self {
            id: CompactString::from(id),
            entity: None,
            period: None,
            scenario: None,
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Structural match, ignoring ids.
    ///
    /// A missing entity or period on `self` matches anything on `other`.
    /// The reverse does not hold: `other` lacking a field that `self` has is
    /// a mismatch, so `a.matches(b)` and `b.matches(a)` can disagree.
    pub fn matches(&self, other: &Context) -> bool {
        (self.entity.is_none() || self.entity == other.entity)
            && (self.period.is_none() || self.period == other.period)
            && self.scenario == other.scenario
    }

    /// Rendered scenario, empty when the context has none.
    pub fn scenario_key(&self, namespaces: &Namespaces) -> String {
        self.scenario
            .as_ref()
            .map(|s| s.render(namespaces))
            .unwrap_or_default()
    }
}

// ============================================================================
// Units, facts, filing metadata
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// One or more measures multiplied together.
    Product(Vec<QName>),
    Divide {
        numerator: Vec<QName>,
        denominator: Vec<QName>,
    },
}

fn join_measures(measures: &[QName]) -> String {
    measures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("*")
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Product(measures) => write!(f, "{}", join_measures(measures)),
            Measure::Divide {
                numerator,
                denominator,
            } => write!(
                f,
                "{}/{}",
                join_measures(numerator),
                join_measures(denominator)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Unit {
    pub id: CompactString,
    pub measure: Measure,
}

impl Unit {
    pub fn new(id: &str, measure: QName) -> Self {
        Self {
            id: CompactString::from(id),
            measure: Measure::Product(vec![measure]),
        }
    }

    pub fn divide(id: &str, numerator: QName, denominator: QName) -> Self {
        Self {
            id: CompactString::from(id),
            measure: Measure::Divide {
                numerator: vec![numerator],
                denominator: vec![denominator],
            },
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.measure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fact {
    pub metric: QName,
    pub value: String,
    pub decimals: Option<CompactString>,
    pub unit_ref: Option<CompactString>,
    pub context_ref: CompactString,
}

impl Fact {
    pub fn new(metric: QName, context_ref: &str, value: &str) -> Self {
        Self {
            metric,
            value: value.to_string(),
            decimals: None,
            unit_ref: None,
            context_ref: CompactString::from(context_ref),
        }
    }

    pub fn with_unit(mut self, unit_ref: &str, decimals: &str) -> Self {
        self.unit_ref = Some(CompactString::from(unit_ref));
        self.decimals = Some(CompactString::from(decimals));
        self
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.metric, self.value)
    }
}

/// A fact together with the context and unit it references in its own
/// instance. Facts from different instances are compared through this view,
/// so that context and unit ids do not have to line up.
#[derive(Debug, Clone, Copy)]
pub struct FactRef<'a> {
    pub fact: &'a Fact,
    pub context: Option<&'a Context>,
    pub unit: Option<&'a Unit>,
    pub namespaces: &'a Namespaces,
}

impl<'a> FactRef<'a> {
    /// Same metric, value, decimals and unit, with `self`'s context
    /// matching `other`'s under [`Context::matches`].
    pub fn matches(&self, other: &FactRef<'_>) -> bool {
        self.fact.metric == other.fact.metric
            && self.fact.value == other.fact.value
            && self.fact.decimals == other.fact.decimals
            && self.unit == other.unit
            && match (self.context, other.context) {
                (Some(a), Some(b)) => a.matches(b),
                (None, None) => true,
                _ => false,
            }
    }

    pub fn scenario_key(&self) -> String {
        self.context
            .map(|c| c.scenario_key(self.namespaces))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaReference {
    pub href: String,
}

impl SchemaReference {
    pub fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
        }
    }
}

impl fmt::Display for SchemaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.href)
    }
}

/// Identity is the value and the filed flag. The context reference is
/// document-local and does not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct FilingIndicator {
    pub value: CompactString,
    pub filed: bool,
    pub context_ref: CompactString,
}

impl FilingIndicator {
    pub fn new(value: &str, filed: bool, context_ref: &str) -> Self {
        Self {
            value: CompactString::from(value),
            filed,
            context_ref: CompactString::from(context_ref),
        }
    }
}

impl PartialEq for FilingIndicator {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.filed == other.filed
    }
}

impl Eq for FilingIndicator {}

impl Hash for FilingIndicator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.filed.hash(state);
    }
}

impl fmt::Display for FilingIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filed {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} (not filed)", self.value)
        }
    }
}

// ============================================================================
// Instance
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct Instance {
    pub schema_reference: Option<SchemaReference>,
    pub taxonomy_version: Option<String>,
    pub namespaces: Namespaces,
    pub contexts: Vec<Context>,
    pub units: Vec<Unit>,
    pub filing_indicators: Vec<FilingIndicator>,
    pub facts: Vec<Fact>,
}

impl Instance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(facts: usize, contexts: usize, units: usize) -> Self {
        Self {
            contexts: Vec::with_capacity(contexts),
            units: Vec::with_capacity(units),
            facts: Vec::with_capacity(facts),
            ..Self::default()
        }
    }

    /// Resolves `prefix:local` against the namespace table.
    pub fn qname(&self, prefixed: &str) -> Result<QName> {
        let (prefix, local) = prefixed.split_once(':').unwrap_or(("", prefixed));
        let namespace = self.namespaces.namespace_of(prefix).ok_or_else(|| {
            Error::Parse(format!("Undeclared namespace prefix '{}'", prefix))
        })?;
        Ok(QName::new(namespace, local).with_prefix(prefix))
    }

    pub fn explicit_member(&self, dimension: &str, value: &str) -> Result<ExplicitMember> {
        Ok(ExplicitMember::new(self.qname(dimension)?, self.qname(value)?))
    }

    /// Facts resolved against this instance's contexts and units.
    pub fn fact_refs(&self) -> Vec<FactRef<'_>> {
        let contexts: AHashMap<&str, &Context> =
            self.contexts.iter().map(|c| (c.id.as_str(), c)).collect();
        let units: AHashMap<&str, &Unit> = self.units.iter().map(|u| (u.id.as_str(), u)).collect();

        self.facts
            .iter()
            .map(|fact| FactRef {
                fact,
                context: contexts.get(fact.context_ref.as_str()).copied(),
                unit: fact
                    .unit_ref
                    .as_deref()
                    .and_then(|id| units.get(id).copied()),
                namespaces: &self.namespaces,
            })
            .collect()
    }

    /// Namespaces of every explicit member value used in a context scenario.
    pub fn used_domain_namespaces(&self) -> BTreeSet<&str> {
        self.contexts
            .iter()
            .filter_map(|c| c.scenario.as_ref())
            .flat_map(|s| s.explicit_members.iter())
            .map(|m| m.value.namespace.as_str())
            .collect()
    }

    pub fn first_context(&self) -> Option<&Context> {
        self.contexts.first()
    }

    pub fn filed_indicators(&self) -> impl Iterator<Item = &FilingIndicator> {
        self.filing_indicators.iter().filter(|fi| fi.filed)
    }
}
