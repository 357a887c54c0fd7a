use std::io::BufRead;

use log::{debug, trace, warn};
use quick_xml::events::{BytesStart, Event};

use super::helpers::Attributes;
use super::{TandemStreamer, MODEL_GROUP_TYPE, ROOT_ELEMENT};
use crate::tandem::models::sanitize_label;
use crate::tandem::{
    AaModification, ChannelReading, Domain, IonChannel, ProteinMatch, SpectrumResult, TandemError,
};

impl<R: BufRead> TandemStreamer<R> {
    /// Read the next spectrum group from the stream
    ///
    /// Top-level elements that are not `<group type="model">` are skipped.
    pub fn next_group(&mut self) -> Result<Option<SpectrumResult>, TandemError> {
        if self.finished {
            return Ok(None);
        }
        if !self.root_seen {
            self.read_root()?;
        }

        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().as_ref() == b"group" && is_model_group(&e)? {
                        let group = self.parse_group(&e)?;
                        self.groups_read += 1;
                        return Ok(Some(group));
                    }
                    note_skipped(&e)?;
                    self.groups_skipped += 1;
                    self.skip_element(&e)?;
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == b"group" && is_model_group(&e)? {
                        self.groups_read += 1;
                        return Ok(Some(group_from_attributes(&e)?));
                    }
                    note_skipped(&e)?;
                    self.groups_skipped += 1;
                }
                Event::End(e) => {
                    if e.name().as_ref() == ROOT_ELEMENT {
                        self.finished = true;
                        return Ok(None);
                    }
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(None);
                }
                _ => {}
            }
            buf.clear();
        }
    }

    /// Consume the prolog and check that the document element is `bioml`
    fn read_root(&mut self) -> Result<(), TandemError> {
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().as_ref() != ROOT_ELEMENT {
                        return Err(not_bioml(e.name().as_ref()));
                    }
                    self.root_seen = true;
                    return Ok(());
                }
                Event::Empty(e) => {
                    if e.name().as_ref() != ROOT_ELEMENT {
                        return Err(not_bioml(e.name().as_ref()));
                    }
                    self.root_seen = true;
                    self.finished = true;
                    return Ok(());
                }
                Event::Eof => {
                    return Err(TandemError::InvalidStructure(
                        "document has no root element".to_string(),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }
    }

    /// Parse a `<group type="model">` element and its subtree
    fn parse_group(&mut self, start: &BytesStart) -> Result<SpectrumResult, TandemError> {
        let mut group = group_from_attributes(start)?;
        let mut current_protein: Option<ProteinMatch> = None;
        let mut current_domain: Option<Domain> = None;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"protein" => {
                        current_protein = Some(parse_protein(e)?);
                    }
                    b"domain" => {
                        current_domain = Some(parse_domain(e)?);
                    }
                    b"aa" => {
                        push_modification(current_domain.as_mut(), e)?;
                    }
                    b"group" => {
                        // fragment spectrum support data
                        self.skip_element(e)?;
                    }
                    _ => {}
                },
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"protein" => {
                        group.proteins.push(parse_protein(e)?);
                    }
                    b"domain" => {
                        let domain = parse_domain(e)?;
                        push_domain(current_protein.as_mut(), domain)?;
                    }
                    b"aa" => {
                        push_modification(current_domain.as_mut(), e)?;
                    }
                    _ => {}
                },
                Event::End(ref e) => match e.name().as_ref() {
                    b"domain" => {
                        if let Some(domain) = current_domain.take() {
                            push_domain(current_protein.as_mut(), domain)?;
                        }
                    }
                    b"protein" => {
                        if let Some(protein) = current_protein.take() {
                            group.proteins.push(protein);
                        }
                    }
                    b"group" => break,
                    _ => {}
                },
                Event::Eof => {
                    return Err(TandemError::InvalidStructure(format!(
                        "unexpected end of file inside group {}",
                        group.display_id()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        trace!(
            "Parsed group {} with {} proteins",
            group.display_id(),
            group.proteins.len()
        );
        Ok(group)
    }

    /// Skip an element and everything below it
    fn skip_element(&mut self, start: &BytesStart) -> Result<(), TandemError> {
        let end = start.to_end().into_owned();
        let mut buf = Vec::new();
        self.reader.read_to_end_into(end.name(), &mut buf)?;
        Ok(())
    }
}

fn not_bioml(name: &[u8]) -> TandemError {
    TandemError::InvalidStructure(format!(
        "root element is <{}>, expected <bioml>; not an X!Tandem output file",
        String::from_utf8_lossy(name)
    ))
}

fn is_model_group(e: &BytesStart) -> Result<bool, TandemError> {
    let attrs = Attributes::read("group", e)?;
    Ok(attrs.get("type") == Some(MODEL_GROUP_TYPE))
}

/// Group types X!Tandem writes besides spectrum results
const KNOWN_GROUP_TYPES: [&str; 2] = ["parameters", "support"];

fn note_skipped(e: &BytesStart) -> Result<(), TandemError> {
    if e.name().as_ref() != b"group" {
        return Ok(());
    }
    let attrs = Attributes::read("group", e)?;
    match attrs.get("type") {
        Some(kind) if KNOWN_GROUP_TYPES.contains(&kind) => {}
        kind => warn!(
            "Skipping group {} of unknown type {:?}",
            attrs.get("label").unwrap_or("<unlabelled>"),
            kind
        ),
    }
    Ok(())
}

fn group_from_attributes(e: &BytesStart) -> Result<SpectrumResult, TandemError> {
    let attrs = Attributes::read("group", e)?;
    Ok(SpectrumResult {
        id: attrs.string("id"),
        mh: attrs.parse("mh")?,
        z: attrs.parse("z")?,
        sum_i: attrs.parse("sumI")?,
        max_i: attrs.parse("maxI")?,
        f_i: attrs.parse("fI")?,
        proteins: Vec::new(),
    })
}

fn parse_protein(e: &BytesStart) -> Result<ProteinMatch, TandemError> {
    let attrs = Attributes::read("protein", e)?;
    Ok(ProteinMatch {
        label: sanitize_label(attrs.get("label").unwrap_or_default()),
        domains: Vec::new(),
    })
}

fn parse_domain(e: &BytesStart) -> Result<Domain, TandemError> {
    let attrs = Attributes::read("domain", e)?;
    let mut domain = Domain {
        id: attrs.string("id"),
        seq: attrs.string("seq"),
        mh: attrs.parse("mh")?,
        delta: attrs.parse("delta")?,
        hyperscore: attrs.parse("hyperscore")?,
        nextscore: attrs.parse("nextscore")?,
        pre: attrs.string("pre"),
        post: attrs.string("post"),
        start: attrs.parse("start")?,
        end: attrs.parse("end")?,
        ..Default::default()
    };

    for channel in IonChannel::ALL {
        let reading = ChannelReading {
            score: attrs.parse(channel.score_attribute())?,
            ions: attrs.parse(channel.ions_attribute())?,
        };
        if reading.score.is_none() && reading.ions.is_none() {
            continue;
        }
        if !reading.is_complete() {
            debug!(
                "Domain {} reports only one of {}/{}",
                domain.id.as_deref().unwrap_or("<unknown>"),
                channel.score_attribute(),
                channel.ions_attribute()
            );
        }
        domain.channels[channel.index()] = Some(reading);
    }

    Ok(domain)
}

fn push_domain(protein: Option<&mut ProteinMatch>, domain: Domain) -> Result<(), TandemError> {
    match protein {
        Some(protein) => {
            protein.domains.push(domain);
            Ok(())
        }
        None => Err(TandemError::InvalidStructure(
            "domain element outside of a protein element".to_string(),
        )),
    }
}

fn push_modification(domain: Option<&mut Domain>, e: &BytesStart) -> Result<(), TandemError> {
    let attrs = Attributes::read("aa", e)?;
    let Some(domain) = domain else {
        return Err(TandemError::InvalidStructure(
            "aa element outside of a domain element".to_string(),
        ));
    };
    let at = attrs.parse("at")?.ok_or_else(|| TandemError::MissingAttribute {
        element: "aa",
        attribute: "at",
        spectrum: domain.id.clone().unwrap_or_default(),
    })?;
    domain.modifications.push(AaModification {
        residue: attrs.get("type").and_then(|t| t.chars().next()),
        at,
        modified: attrs.string("modified").unwrap_or_default(),
    });
    Ok(())
}
