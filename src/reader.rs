// XBRL instance reader
use crate::model::*;
use crate::{Error, Result};
use compact_str::CompactString;
use log::{debug, trace};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{BufRead, Read};
use std::path::Path;

impl Instance {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading instance from {}", path.display());
        Self::from_path(path)
    }

    #[cfg(feature = "mmap")]
    fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        // SAFETY: the mapping is only read, and dropped before returning.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    #[cfg(not(feature = "mmap"))]
    fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)?;
        Self::from_bytes(&content)
    }

    pub fn from_reader<R: Read>(mut source: R) -> Result<Self> {
        let mut content = Vec::new();
        source.read_to_end(&mut content)?;
        Self::from_bytes(&content)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        // Skip BOM if present
        let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);
        InstanceReader::new(data).read()
    }
}

// ============================================================================
// Events with resolved names
// ============================================================================

struct Attribute {
    name: QName,
    value: String,
}

struct Element {
    name: QName,
    attributes: Vec<Attribute>,
}

impl Element {
    fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.name.namespace == namespace && self.name.local_name == local_name
    }

    fn attr(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace == namespace && a.name.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    fn required_attr(&self, local_name: &str) -> Result<&str> {
        self.attr("", local_name).ok_or_else(|| {
            Error::Parse(format!(
                "{} is missing the '{}' attribute",
                self.name, local_name
            ))
        })
    }
}

enum Node {
    Start(Element),
    Empty(Element),
    End,
    Text(String),
    Instruction(String),
    Eof,
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::Parse(format!("Invalid UTF-8: {}", e)))
}

fn unescaped(bytes: &[u8]) -> Result<String> {
    let raw = utf8(bytes)?;
    unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| Error::Parse(format!("Invalid escape in '{}': {}", raw, e)))
}

fn parse_bool(text: &str) -> Result<bool> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::Parse(format!("Invalid boolean '{}'", other))),
    }
}

// ============================================================================
// Reader
// ============================================================================

struct InstanceReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    // In-scope xmlns declarations, one frame per open element.
    scopes: Vec<Vec<(CompactString, CompactString)>>,
    instance: Instance,
}

impl<R: BufRead> InstanceReader<R> {
    fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            scopes: Vec::new(),
            instance: Instance::new(),
        }
    }

    fn namespace_of(&self, prefix: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| *p == prefix)
            .map(|(_, n)| n.as_str())
    }

    /// Resolves a `prefix:local` name against the in-scope declarations.
    /// Unprefixed names take the default namespace when `use_default` is set.
    fn resolve(&self, prefixed: &str, use_default: bool) -> Result<QName> {
        match prefixed.split_once(':') {
            Some(("xml", local)) => Ok(QName::new("http://www.w3.org/XML/1998/namespace", local)
                .with_prefix("xml")),
            Some((prefix, local)) => {
                let namespace = self.namespace_of(prefix).ok_or_else(|| {
                    Error::Parse(format!("Undeclared namespace prefix '{}'", prefix))
                })?;
                Ok(QName::new(namespace, local).with_prefix(prefix))
            }
            None if use_default => {
                let namespace = self.namespace_of("").unwrap_or_default();
                Ok(QName::new(namespace, prefixed))
            }
            None => Ok(QName::new("", prefixed)),
        }
    }

    fn resolve_value(&self, text: &str) -> Result<QName> {
        self.resolve(text.trim(), true)
    }

    fn element(&mut self, start: &BytesStart<'_>) -> Result<Element> {
        let mut frame = Vec::new();
        let mut raw = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = unescaped(&attr.value)?;
            if key == "xmlns" {
                frame.push((CompactString::default(), CompactString::from(value)));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                frame.push((CompactString::from(prefix), CompactString::from(value)));
            } else {
                raw.push((key, value));
            }
        }
        self.scopes.push(frame);

        let name = self.resolve(utf8(start.name().as_ref())?, true)?;
        let attributes = raw
            .into_iter()
            .map(|(key, value)| {
                Ok(Attribute {
                    name: self.resolve(&key, false)?,
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Element { name, attributes })
    }

    fn next(&mut self) -> Result<Node> {
        loop {
            self.buf.clear();
            let node = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => {
                    let start = start.into_owned();
                    Node::Start(self.element(&start)?)
                }
                Event::Empty(start) => {
                    let start = start.into_owned();
                    let element = self.element(&start)?;
                    self.scopes.pop();
                    Node::Empty(element)
                }
                Event::End(_) => {
                    self.scopes.pop();
                    Node::End
                }
                Event::Text(text) => Node::Text(unescaped(&text)?),
                Event::CData(data) => Node::Text(utf8(&data)?.to_string()),
                Event::PI(pi) => Node::Instruction(utf8(&pi)?.to_string()),
                Event::Eof => Node::Eof,
                _ => continue,
            };
            return Ok(node);
        }
    }

    fn unexpected_eof(&self) -> Error {
        Error::Parse(format!(
            "Unexpected end of document at byte {}",
            self.reader.buffer_position()
        ))
    }

    /// Skips the rest of an element whose start was just read.
    fn skip_element(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next()? {
                Node::Start(_) => depth += 1,
                Node::End if depth == 0 => return Ok(()),
                Node::End => depth -= 1,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
    }

    /// Text content up to the end of the current element. Nested elements
    /// are skipped.
    fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next()? {
                Node::Text(chunk) => text.push_str(&chunk),
                Node::Start(_) => self.skip_element()?,
                Node::End => return Ok(text),
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
    }

    fn read(mut self) -> Result<Instance> {
        loop {
            match self.next()? {
                Node::Instruction(content) => self.read_instruction(&content),
                Node::Start(root) if root.is(ns::XBRLI, "xbrl") => {
                    if let Some(frame) = self.scopes.last() {
                        for (prefix, namespace) in frame {
                            self.instance.namespaces.insert(prefix, namespace);
                        }
                    }
                    self.read_root()?;
                }
                Node::Start(other) | Node::Empty(other) => {
                    return Err(Error::Parse(format!(
                        "Expected xbrli:xbrl root element, found {}",
                        other.name
                    )));
                }
                Node::Eof => break,
                _ => {}
            }
        }

        debug!(
            "Read instance: {} contexts, {} units, {} facts, {} filing indicators",
            self.instance.contexts.len(),
            self.instance.units.len(),
            self.instance.facts.len(),
            self.instance.filing_indicators.len()
        );
        Ok(self.instance)
    }

    fn read_instruction(&mut self, content: &str) {
        let (target, data) = content.split_once(char::is_whitespace).unwrap_or((content, ""));
        if target == "taxonomy-version" {
            self.instance.taxonomy_version = Some(data.trim().to_string());
        }
    }

    fn read_root(&mut self) -> Result<()> {
        loop {
            match self.next()? {
                Node::Start(el) => {
                    if el.is(ns::LINK, "schemaRef") {
                        self.read_schema_ref(&el);
                        self.skip_element()?;
                    } else if el.is(ns::XBRLI, "context") {
                        self.read_context(&el)?;
                    } else if el.is(ns::XBRLI, "unit") {
                        self.read_unit(&el)?;
                    } else if el.is(ns::FIND, "fIndicators") {
                        self.read_filing_indicators()?;
                    } else if el.attr("", "contextRef").is_some() {
                        let value = self.read_text()?;
                        self.push_fact(el, value)?;
                    } else {
                        trace!("Skipping {}", el.name);
                        self.skip_element()?;
                    }
                }
                Node::Empty(el) => {
                    if el.is(ns::LINK, "schemaRef") {
                        self.read_schema_ref(&el);
                    } else if el.attr("", "contextRef").is_some() {
                        self.push_fact(el, String::new())?;
                    }
                }
                Node::Instruction(content) => self.read_instruction(&content),
                Node::End => return Ok(()),
                Node::Eof => return Err(self.unexpected_eof()),
                Node::Text(_) => {}
            }
        }
    }

    fn read_schema_ref(&mut self, el: &Element) {
        if let Some(href) = el.attr(ns::XLINK, "href") {
            self.instance.schema_reference = Some(SchemaReference::new(href));
        }
    }

    fn push_fact(&mut self, el: Element, value: String) -> Result<()> {
        let context_ref = el.required_attr("contextRef")?;
        let fact = Fact {
            context_ref: CompactString::from(context_ref),
            unit_ref: el.attr("", "unitRef").map(CompactString::from),
            decimals: el.attr("", "decimals").map(CompactString::from),
            value,
            metric: el.name,
        };
        self.instance.facts.push(fact);
        Ok(())
    }

    fn read_context(&mut self, el: &Element) -> Result<()> {
        let mut context = Context::new(el.required_attr("id")?);

        loop {
            match self.next()? {
                Node::Start(child) if child.is(ns::XBRLI, "entity") => {
                    context.entity = Some(self.read_entity()?);
                }
                Node::Start(child) if child.is(ns::XBRLI, "period") => {
                    context.period = Some(self.read_period()?);
                }
                Node::Start(child) if child.is(ns::XBRLI, "scenario") => {
                    let (explicit_members, typed_members) = self.read_members()?;
                    let scenario = Scenario {
                        explicit_members,
                        typed_members,
                    };
                    // the writer omits empty scenarios
                    context.scenario = (!scenario.is_empty()).then_some(scenario);
                }
                Node::Start(_) => self.skip_element()?,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }

        self.instance.contexts.push(context);
        Ok(())
    }

    fn read_entity(&mut self) -> Result<Entity> {
        let mut identifier = None;
        let mut segment = None;

        loop {
            match self.next()? {
                Node::Start(child) if child.is(ns::XBRLI, "identifier") => {
                    let scheme = child.required_attr("scheme")?.to_string();
                    let value = self.read_text()?;
                    identifier = Some(Identifier::new(&scheme, value.trim()));
                }
                Node::Start(child) if child.is(ns::XBRLI, "segment") => {
                    let (explicit_members, _) = self.read_members()?;
                    segment = Some(Segment { explicit_members });
                }
                Node::Start(_) => self.skip_element()?,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }

        let identifier =
            identifier.ok_or_else(|| Error::Parse("Entity without identifier".to_string()))?;
        Ok(Entity {
            identifier,
            segment,
        })
    }

    fn read_period(&mut self) -> Result<Period> {
        let mut instant = None;
        let mut start = None;
        let mut end = None;
        let mut forever = false;

        loop {
            match self.next()? {
                Node::Start(child) => {
                    if child.is(ns::XBRLI, "forever") {
                        forever = true;
                        self.skip_element()?;
                        continue;
                    }
                    let slot = if child.is(ns::XBRLI, "instant") {
                        &mut instant
                    } else if child.is(ns::XBRLI, "startDate") {
                        &mut start
                    } else if child.is(ns::XBRLI, "endDate") {
                        &mut end
                    } else {
                        self.skip_element()?;
                        continue;
                    };
                    *slot = Some(parse_date(&self.read_text()?)?);
                }
                Node::Empty(child) if child.is(ns::XBRLI, "forever") => forever = true,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }

        match (instant, start, end) {
            (Some(date), _, _) => Ok(Period::Instant(date)),
            (None, Some(start), Some(end)) => Ok(Period::Duration { start, end }),
            _ if forever => Ok(Period::Forever),
            _ => Err(Error::Parse("Incomplete period".to_string())),
        }
    }

    /// Explicit and typed dimension members of a scenario or segment.
    fn read_members(&mut self) -> Result<(Vec<ExplicitMember>, Vec<TypedMember>)> {
        let mut explicit = Vec::new();
        let mut typed = Vec::new();

        loop {
            match self.next()? {
                Node::Start(child) if child.is(ns::XBRLDI, "explicitMember") => {
                    let dimension = self.resolve_value(child.required_attr("dimension")?)?;
                    // the value is resolved while the member's own scope is open
                    let text = self.read_member_text()?;
                    explicit.push(ExplicitMember::new(dimension, text));
                }
                Node::Start(child) if child.is(ns::XBRLDI, "typedMember") => {
                    let dimension = self.resolve_value(child.required_attr("dimension")?)?;
                    typed.push(self.read_typed_member(dimension)?);
                }
                Node::Start(_) => self.skip_element()?,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }

        Ok((explicit, typed))
    }

    fn read_member_text(&mut self) -> Result<QName> {
        let mut value = None;
        loop {
            match self.next()? {
                Node::Text(text) => value = Some(self.resolve_value(&text)?),
                Node::Start(_) => self.skip_element()?,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
        value.ok_or_else(|| Error::Parse("Explicit member without value".to_string()))
    }

    fn read_typed_member(&mut self, dimension: QName) -> Result<TypedMember> {
        let mut member = None;
        loop {
            match self.next()? {
                Node::Start(domain) => {
                    let value = self.read_text()?;
                    member = Some(TypedMember {
                        dimension: dimension.clone(),
                        domain: domain.name,
                        value,
                    });
                }
                Node::Empty(domain) => {
                    member = Some(TypedMember {
                        dimension: dimension.clone(),
                        domain: domain.name,
                        value: String::new(),
                    });
                }
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
        member.ok_or_else(|| Error::Parse(format!("Typed member {} without domain", dimension)))
    }

    fn read_unit(&mut self, el: &Element) -> Result<()> {
        let id = el.required_attr("id")?.to_string();
        let mut measures = Vec::new();
        let mut divide = None;

        loop {
            match self.next()? {
                Node::Start(child) if child.is(ns::XBRLI, "measure") => {
                    measures.push(self.read_measure()?);
                }
                Node::Start(child) if child.is(ns::XBRLI, "divide") => {
                    divide = Some(self.read_divide()?);
                }
                Node::Start(_) => self.skip_element()?,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }

        let measure = match divide {
            Some((numerator, denominator)) => Measure::Divide {
                numerator,
                denominator,
            },
            None => Measure::Product(measures),
        };
        self.instance.units.push(Unit {
            id: CompactString::from(id),
            measure,
        });
        Ok(())
    }

    fn read_measure(&mut self) -> Result<QName> {
        let mut measure = None;
        loop {
            match self.next()? {
                Node::Text(text) => measure = Some(self.resolve_value(&text)?),
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
        measure.ok_or_else(|| Error::Parse("Empty measure".to_string()))
    }

    fn read_measure_list(&mut self) -> Result<Vec<QName>> {
        let mut measures = Vec::new();
        loop {
            match self.next()? {
                Node::Start(child) if child.is(ns::XBRLI, "measure") => {
                    measures.push(self.read_measure()?);
                }
                Node::Start(_) => self.skip_element()?,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
        Ok(measures)
    }

    fn read_divide(&mut self) -> Result<(Vec<QName>, Vec<QName>)> {
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        loop {
            match self.next()? {
                Node::Start(child) if child.is(ns::XBRLI, "unitNumerator") => {
                    numerator = self.read_measure_list()?;
                }
                Node::Start(child) if child.is(ns::XBRLI, "unitDenominator") => {
                    denominator = self.read_measure_list()?;
                }
                Node::Start(_) => self.skip_element()?,
                Node::End => break,
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
        Ok((numerator, denominator))
    }

    fn read_filing_indicators(&mut self) -> Result<()> {
        loop {
            match self.next()? {
                Node::Start(child) if child.is(ns::FIND, "filingIndicator") => {
                    let context_ref = child.attr("", "contextRef").unwrap_or_default().to_string();
                    let filed = match child.attr(ns::FIND, "filed") {
                        Some(flag) => parse_bool(flag)?,
                        None => true,
                    };
                    let value = self.read_text()?;
                    self.instance.filing_indicators.push(FilingIndicator::new(
                        value.trim(),
                        filed,
                        &context_ref,
                    ));
                }
                Node::Start(_) => self.skip_element()?,
                Node::End => return Ok(()),
                Node::Eof => return Err(self.unexpected_eof()),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<?taxonomy-version 2.0.1?>
<xbrli:xbrl xmlns:xbrli="http://www.xbrl.org/2003/instance"
            xmlns:link="http://www.xbrl.org/2003/linkbase"
            xmlns:xlink="http://www.w3.org/1999/xlink"
            xmlns:xbrldi="http://xbrl.org/2006/xbrldi"
            xmlns:find="http://www.eurofiling.info/xbrl/ext/filing-indicators"
            xmlns:iso4217="http://www.xbrl.org/2003/iso4217"
            xmlns:s2c_dim="http://eiopa.europa.eu/xbrl/s2c/dict/dim"
            xmlns:s2c_AM="http://eiopa.europa.eu/xbrl/s2c/dict/dom/AM"
            xmlns:s2md_met="http://eiopa.europa.eu/xbrl/s2md/dict/met">"#;

    fn document(body: &str) -> String {
        format!("{}\n{}\n</xbrli:xbrl>", HEADER, body)
    }

    #[test]
    fn test_read_header_items() {
        let xml = document(
            r#"<link:schemaRef xlink:type="simple" xlink:href="http://eiopa.europa.eu/ars.xsd"/>"#,
        );
        let instance = Instance::from_bytes(xml.as_bytes()).unwrap();
        assert_eq!(instance.taxonomy_version.as_deref(), Some("2.0.1"));
        assert_eq!(
            instance.schema_reference,
            Some(SchemaReference::new("http://eiopa.europa.eu/ars.xsd"))
        );
        assert_eq!(
            instance.namespaces.namespace_of("s2c_AM"),
            Some("http://eiopa.europa.eu/xbrl/s2c/dict/dom/AM")
        );
    }

    #[test]
    fn test_read_context_with_scenario() {
        let xml = document(
            r#"<xbrli:context id="c1">
  <xbrli:entity><xbrli:identifier scheme="http://standards.iso.org/iso/17442">LEI123</xbrli:identifier></xbrli:entity>
  <xbrli:period><xbrli:startDate>2015-01-01</xbrli:startDate><xbrli:endDate>2015-12-31</xbrli:endDate></xbrli:period>
  <xbrli:scenario>
    <xbrldi:explicitMember dimension="s2c_dim:VG">s2c_AM:x80</xbrldi:explicitMember>
    <xbrldi:typedMember dimension="s2c_dim:NF"><s2c_typ:ID xmlns:s2c_typ="http://eiopa.europa.eu/xbrl/s2c/dict/typ">FUND-1</s2c_typ:ID></xbrldi:typedMember>
  </xbrli:scenario>
</xbrli:context>"#,
        );
        let instance = Instance::from_bytes(xml.as_bytes()).unwrap();
        let context = &instance.contexts[0];
        assert_eq!(context.id, "c1");
        assert_eq!(
            context.entity.as_ref().map(|e| e.identifier.to_string()),
            Some("http://standards.iso.org/iso/17442:LEI123".to_string())
        );
        assert_eq!(
            context.period.map(|p| p.to_string()),
            Some("2015-01-01--2015-12-31".to_string())
        );
        let scenario = context.scenario.as_ref().unwrap();
        assert_eq!(scenario.to_string(), "VG=s2c_AM:x80, NF=FUND-1");
        assert_eq!(
            scenario.typed_members[0].domain.namespace,
            "http://eiopa.europa.eu/xbrl/s2c/dict/typ"
        );
    }

    #[test]
    fn test_empty_scenario_reads_as_none() {
        let xml = document(
            r#"<xbrli:context id="c1">
  <xbrli:entity><xbrli:identifier scheme="LEI">A</xbrli:identifier></xbrli:entity>
  <xbrli:period><xbrli:instant>2015-12-31</xbrli:instant></xbrli:period>
  <xbrli:scenario></xbrli:scenario>
</xbrli:context>"#,
        );
        let instance = Instance::from_bytes(xml.as_bytes()).unwrap();
        assert_eq!(instance.contexts[0].scenario, None);
    }

    #[test]
    fn test_read_units_and_facts() {
        let xml = document(
            r#"<xbrli:unit id="uEUR"><xbrli:measure>iso4217:EUR</xbrli:measure></xbrli:unit>
<xbrli:unit id="uEPS"><xbrli:divide>
  <xbrli:unitNumerator><xbrli:measure>iso4217:EUR</xbrli:measure></xbrli:unitNumerator>
  <xbrli:unitDenominator><xbrli:measure>xbrli:shares</xbrli:measure></xbrli:unitDenominator>
</xbrli:divide></xbrli:unit>
<xbrli:context id="c1"><xbrli:entity><xbrli:identifier scheme="LEI">A</xbrli:identifier></xbrli:entity><xbrli:period><xbrli:instant>2015-12-31</xbrli:instant></xbrli:period></xbrli:context>
<s2md_met:mi363 contextRef="c1" unitRef="uEUR" decimals="-3">45000</s2md_met:mi363>
<s2md_met:si1 contextRef="c1">Fish &amp; chips</s2md_met:si1>"#,
        );
        let instance = Instance::from_bytes(xml.as_bytes()).unwrap();
        assert_eq!(instance.units[0].to_string(), "uEUR: iso4217:EUR");
        assert_eq!(instance.units[1].to_string(), "uEPS: iso4217:EUR/xbrli:shares");
        assert_eq!(instance.facts.len(), 2);
        assert_eq!(instance.facts[0].to_string(), "s2md_met:mi363=45000");
        assert_eq!(instance.facts[0].decimals.as_deref(), Some("-3"));
        assert_eq!(instance.facts[1].value, "Fish & chips");
        assert_eq!(instance.facts[1].unit_ref, None);
    }

    #[test]
    fn test_read_filing_indicators() {
        let xml = document(
            r#"<find:fIndicators>
  <find:filingIndicator contextRef="c1">S.01.01</find:filingIndicator>
  <find:filingIndicator contextRef="c1" find:filed="false">S.02.01</find:filingIndicator>
</find:fIndicators>"#,
        );
        let instance = Instance::from_bytes(xml.as_bytes()).unwrap();
        assert_eq!(
            instance.filing_indicators,
            vec![
                FilingIndicator::new("S.01.01", true, "c1"),
                FilingIndicator::new("S.02.01", false, "c1"),
            ]
        );
    }

    #[test]
    fn test_bom_is_skipped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(document("").as_bytes());
        let instance = Instance::from_bytes(&bytes).unwrap();
        assert!(instance.contexts.is_empty());
    }

    #[test]
    fn test_undeclared_prefix_is_an_error() {
        let xml = document(
            r#"<xbrli:context id="c1"><xbrli:scenario>
  <xbrldi:explicitMember dimension="s2c_dim:VG">nope:x80</xbrldi:explicitMember>
</xbrli:scenario></xbrli:context>"#,
        );
        assert!(matches!(
            Instance::from_bytes(xml.as_bytes()),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_wrong_root_is_an_error() {
        let xml = r#"<?xml version="1.0"?><html><body/></html>"#;
        assert!(matches!(
            Instance::from_bytes(xml.as_bytes()),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        let xml = format!("{}\n<xbrli:context id=\"c1\">", HEADER);
        assert!(Instance::from_bytes(xml.as_bytes()).is_err());
    }
}
