use std::str::FromStr;

use quick_xml::events::BytesStart;

use crate::tandem::TandemError;

/// Attributes of one element, unescaped
pub(super) struct Attributes {
    element: &'static str,
    values: Vec<(String, String)>,
}

impl Attributes {
    pub(super) fn read(element: &'static str, e: &BytesStart) -> Result<Self, TandemError> {
        let mut values = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(quick_xml::Error::from)?
                .into_owned();
            values.push((key, value));
        }
        Ok(Self { element, values })
    }

    pub(super) fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(super) fn string(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// Parse an optional attribute; blank values count as absent
    pub(super) fn parse<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, TandemError> {
        match self.get(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| TandemError::InvalidAttributeValue {
                    element: self.element,
                    attribute: name,
                    value: raw.to_string(),
                }),
        }
    }
}
