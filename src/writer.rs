// XBRL instance writer
use crate::model::*;
use crate::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use std::path::Path;

impl Instance {
    /// Serializes the instance as XBRL markup.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        InstanceWriter::new(self, sink).write()
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}

struct InstanceWriter<'a, W: Write> {
    writer: Writer<W>,
    instance: &'a Instance,
    prefixes: Namespaces,
}

impl<'a, W: Write> InstanceWriter<'a, W> {
    fn new(instance: &'a Instance, sink: W) -> Self {
        let mut prefixes = instance.namespaces.clone();
        for (prefix, namespace) in ns::STANDARD {
            if prefixes.prefix_of(namespace).is_none() && prefixes.namespace_of(prefix).is_none() {
                prefixes.insert(prefix, namespace);
            }
        }
        Self {
            writer: Writer::new_with_indent(sink, b' ', 2),
            instance,
            prefixes,
        }
    }

    fn prefix(&self, namespace: &str) -> Result<&str> {
        self.prefixes.prefix_of(namespace).ok_or_else(|| {
            Error::Serialization(format!("No prefix declared for namespace {}", namespace))
        })
    }

    fn name(&self, namespace: &str, local_name: &str) -> Result<String> {
        Ok(match self.prefix(namespace)? {
            "" => local_name.to_string(),
            prefix => format!("{}:{}", prefix, local_name),
        })
    }

    /// `prefix:local` form of a QName value. The name's own prefix is used
    /// when it is bound to the same namespace.
    fn qualified(&self, name: &QName) -> Result<String> {
        if !name.prefix.is_empty()
            && self.prefixes.namespace_of(&name.prefix) == Some(name.namespace.as_str())
        {
            return Ok(name.to_string());
        }
        self.name(&name.namespace, &name.local_name)
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attributes)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn write(mut self) -> Result<()> {
        let instance = self.instance;
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        if let Some(version) = &instance.taxonomy_version {
            self.writer.write_event(Event::PI(BytesPI::new(format!(
                "taxonomy-version {}",
                version
            ))))?;
        }

        let root = self.name(ns::XBRLI, "xbrl")?;
        let declarations: Vec<(String, String)> = self
            .prefixes
            .iter()
            .map(|(prefix, namespace)| {
                let key = match prefix {
                    "" => "xmlns".to_string(),
                    prefix => format!("xmlns:{}", prefix),
                };
                (key, namespace.to_string())
            })
            .collect();
        let attributes: Vec<(&str, &str)> = declarations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.start(&root, &attributes)?;

        if let Some(reference) = &instance.schema_reference {
            let name = self.name(ns::LINK, "schemaRef")?;
            let type_attr = self.name(ns::XLINK, "type")?;
            let href_attr = self.name(ns::XLINK, "href")?;
            self.empty(
                &name,
                &[(type_attr.as_str(), "simple"), (href_attr.as_str(), reference.href.as_str())],
            )?;
        }

        for unit in &instance.units {
            self.write_unit(unit)?;
        }
        if !instance.filing_indicators.is_empty() {
            self.write_filing_indicators(&instance.filing_indicators)?;
        }
        for context in &instance.contexts {
            self.write_context(context)?;
        }
        for fact in &instance.facts {
            self.write_fact(fact)?;
        }

        self.end(&root)?;
        self.writer.get_mut().flush()?;
        Ok(())
    }

    fn write_measures(&mut self, measures: &[QName]) -> Result<()> {
        let name = self.name(ns::XBRLI, "measure")?;
        for measure in measures {
            let value = self.qualified(measure)?;
            self.text_element(&name, &[], &value)?;
        }
        Ok(())
    }

    fn write_unit(&mut self, unit: &Unit) -> Result<()> {
        let name = self.name(ns::XBRLI, "unit")?;
        self.start(&name, &[("id", unit.id.as_str())])?;
        match &unit.measure {
            Measure::Product(measures) => self.write_measures(measures)?,
            Measure::Divide {
                numerator,
                denominator,
            } => {
                let divide = self.name(ns::XBRLI, "divide")?;
                let num = self.name(ns::XBRLI, "unitNumerator")?;
                let den = self.name(ns::XBRLI, "unitDenominator")?;
                self.start(&divide, &[])?;
                self.start(&num, &[])?;
                self.write_measures(numerator)?;
                self.end(&num)?;
                self.start(&den, &[])?;
                self.write_measures(denominator)?;
                self.end(&den)?;
                self.end(&divide)?;
            }
        }
        self.end(&name)
    }

    fn write_filing_indicators(&mut self, indicators: &[FilingIndicator]) -> Result<()> {
        let group = self.name(ns::FIND, "fIndicators")?;
        let name = self.name(ns::FIND, "filingIndicator")?;
        let filed_attr = self.name(ns::FIND, "filed")?;
        self.start(&group, &[])?;
        for indicator in indicators {
            let mut attributes = vec![("contextRef", indicator.context_ref.as_str())];
            if !indicator.filed {
                attributes.push((filed_attr.as_str(), "false"));
            }
            self.text_element(&name, &attributes, &indicator.value)?;
        }
        self.end(&group)
    }

    fn write_explicit_members(&mut self, members: &[ExplicitMember]) -> Result<()> {
        let name = self.name(ns::XBRLDI, "explicitMember")?;
        for member in members {
            let dimension = self.qualified(&member.dimension)?;
            let value = self.qualified(&member.value)?;
            self.text_element(&name, &[("dimension", dimension.as_str())], &value)?;
        }
        Ok(())
    }

    fn write_context(&mut self, context: &Context) -> Result<()> {
        let name = self.name(ns::XBRLI, "context")?;
        self.start(&name, &[("id", context.id.as_str())])?;

        if let Some(entity) = &context.entity {
            let entity_name = self.name(ns::XBRLI, "entity")?;
            let identifier = self.name(ns::XBRLI, "identifier")?;
            self.start(&entity_name, &[])?;
            self.text_element(
                &identifier,
                &[("scheme", entity.identifier.scheme.as_str())],
                &entity.identifier.value,
            )?;
            if let Some(segment) = &entity.segment {
                let segment_name = self.name(ns::XBRLI, "segment")?;
                self.start(&segment_name, &[])?;
                self.write_explicit_members(&segment.explicit_members)?;
                self.end(&segment_name)?;
            }
            self.end(&entity_name)?;
        }

        if let Some(period) = &context.period {
            let period_name = self.name(ns::XBRLI, "period")?;
            self.start(&period_name, &[])?;
            match period {
                Period::Instant(date) => {
                    let instant = self.name(ns::XBRLI, "instant")?;
                    self.text_element(&instant, &[], &date.to_string())?;
                }
                Period::Duration { start, end } => {
                    let start_name = self.name(ns::XBRLI, "startDate")?;
                    let end_name = self.name(ns::XBRLI, "endDate")?;
                    self.text_element(&start_name, &[], &start.to_string())?;
                    self.text_element(&end_name, &[], &end.to_string())?;
                }
                Period::Forever => {
                    let forever = self.name(ns::XBRLI, "forever")?;
                    self.empty(&forever, &[])?;
                }
            }
            self.end(&period_name)?;
        }

        if let Some(scenario) = context.scenario.as_ref().filter(|s| !s.is_empty()) {
            let scenario_name = self.name(ns::XBRLI, "scenario")?;
            self.start(&scenario_name, &[])?;
            self.write_explicit_members(&scenario.explicit_members)?;
            let typed_name = self.name(ns::XBRLDI, "typedMember")?;
            for member in &scenario.typed_members {
                let dimension = self.qualified(&member.dimension)?;
                let domain = self.qualified(&member.domain)?;
                self.start(&typed_name, &[("dimension", dimension.as_str())])?;
                self.text_element(&domain, &[], &member.value)?;
                self.end(&typed_name)?;
            }
            self.end(&scenario_name)?;
        }

        self.end(&name)
    }

    fn write_fact(&mut self, fact: &Fact) -> Result<()> {
        let name = self.qualified(&fact.metric)?;
        let mut attributes = vec![("contextRef", fact.context_ref.as_str())];
        if let Some(unit) = &fact.unit_ref {
            attributes.push(("unitRef", unit.as_str()));
        }
        if let Some(decimals) = &fact.decimals {
            attributes.push(("decimals", decimals.as_str()));
        }
        self.text_element(&name, &attributes, &fact.value)
    }
}
