use crate::error::{PaymentError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::BTreeMap;

/// `return_code` value reported by the platform on success.
pub const RETURN_CODE_SUCCESS: &str = "SUCCESS";

/// Generic accessor over the platform's flat XML response envelope.
///
/// Responses are a single `<xml>` element whose children are string
/// key/value pairs, e.g. `<return_code><![CDATA[SUCCESS]]></return_code>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    values: BTreeMap<String, String>,
}

impl Envelope {
    /// Parses a response body.
    ///
    /// Values may be plain text or CDATA. Anything nested below the first
    /// level is ignored; the platform never emits it.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut values = BTreeMap::new();
        let mut current: Option<String> = None;
        let mut depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    depth += 1;
                    if depth == 2 {
                        current =
                            Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                    }
                }
                Event::End(_) => {
                    if depth == 2 {
                        current = None;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Text(text) => {
                    if let Some(field) = current.as_deref() {
                        let value = text.unescape()?;
                        let value = value.trim();
                        if !value.is_empty() {
                            values.insert(field.to_string(), value.to_string());
                        }
                    }
                }
                Event::CData(cdata) => {
                    if let Some(field) = current.as_deref() {
                        let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                        values.insert(field.to_string(), value);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Like [`Envelope::get`], but a missing field is an error.
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field)
            .ok_or_else(|| PaymentError::MissingField(field.to_string()))
    }

    pub fn return_code(&self) -> Option<&str> {
        self.get("return_code")
    }

    pub fn is_success(&self) -> bool {
        self.return_code() == Some(RETURN_CODE_SUCCESS)
    }

    /// Human-readable error message, empty when the platform sent none.
    pub fn return_msg(&self) -> &str {
        self.get("return_msg").unwrap_or_default()
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Builds a request body: one element per pair under an `<xml>` root, values
/// CDATA-wrapped as the platform expects.
pub fn to_xml(values: &BTreeMap<String, String>) -> String {
    let mut body = String::from("<xml>");
    for (field, value) in values {
        body.push_str(&format!("<{field}><![CDATA[{value}]]></{field}>"));
    }
    body.push_str("</xml>");
    body
}
