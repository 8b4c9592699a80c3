//! Initial payload embedded in prerendered documents.
//!
//! The payload travels inside
//! `<script type="application/json" id="__VITRINA_DATA__">`. Markup-significant
//! characters are escaped as JSON unicode escapes, so the block cannot be
//! closed early by content and still parses as the same JSON.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::snapshot::ContentSnapshot;

/// Element id of the payload script block.
pub const PAYLOAD_ELEMENT_ID: &str = "__VITRINA_DATA__";

/// The snapshot a prerender pass loaded, keyed by the pathname it was
/// loaded for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialPayload {
    pub pathname: String,
    pub snapshot: ContentSnapshot,
}

impl InitialPayload {
    pub fn new(pathname: impl Into<String>, snapshot: ContentSnapshot) -> Self {
        Self {
            pathname: pathname.into(),
            snapshot,
        }
    }

    /// Whether this payload was produced for `pathname`, which must already
    /// be normalized (as in [`RouteMatch::pathname`](crate::RouteMatch)).
    /// Both sides are compared as they are; decoding them again would let
    /// `%25` escapes collide.
    pub fn matches(&self, pathname: &str) -> bool {
        self.pathname == pathname
    }

    /// JSON safe to place verbatim inside a script element.
    pub fn to_script_json(&self) -> Result<String, PayloadError> {
        let json = serde_json::to_string(self)?;
        Ok(escape_script_json(&json))
    }

    /// Parse the contents of a payload script block.
    pub fn from_script_json(text: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(text.trim())?)
    }
}

fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Find the payload block in a rendered document and decode it.
pub fn extract_payload(document: &str) -> Result<InitialPayload, PayloadError> {
    let marker = format!("id=\"{PAYLOAD_ELEMENT_ID}\"");
    let at = document.find(&marker).ok_or(PayloadError::Missing)?;
    let rest = &document[at..];
    let open_end = rest.find('>').ok_or(PayloadError::Missing)?;
    let body = &rest[open_end + 1..];
    let close = body.find("</script>").ok_or(PayloadError::Missing)?;
    InitialPayload::from_script_json(&body[..close])
}
