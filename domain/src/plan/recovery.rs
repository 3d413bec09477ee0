//! Recovery parsing
//!
//! Engines wrap their JSON in prose, code fences or leave trailing commas
//! behind. Recovery applies an ordered list of pure text transforms until one
//! yields a JSON object.

use crate::core::error::DomainError;
use crate::util::preview;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid"));

/// Bytes of the raw response quoted in error messages
const PREVIEW_BYTES: usize = 120;

/// One transform in the recovery pipeline.
///
/// Each step transforms the output of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    /// The response as received
    Direct,
    /// From the first `{` to the last `}`, across newlines
    ExtractObjectSpan,
    /// Commas immediately before `}` or `]` removed
    StripTrailingCommas,
}

impl RecoveryStep {
    pub const PIPELINE: [RecoveryStep; 3] = [
        RecoveryStep::Direct,
        RecoveryStep::ExtractObjectSpan,
        RecoveryStep::StripTrailingCommas,
    ];

    /// Apply this step; `None` means the step found nothing to work with
    pub fn apply(&self, text: &str) -> Option<String> {
        match self {
            RecoveryStep::Direct => Some(text.to_string()),
            RecoveryStep::ExtractObjectSpan => extract_object_span(text).map(str::to_string),
            RecoveryStep::StripTrailingCommas => Some(strip_trailing_commas(text)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryStep::Direct => "direct",
            RecoveryStep::ExtractObjectSpan => "object_span",
            RecoveryStep::StripTrailingCommas => "trailing_commas",
        }
    }
}

impl std::fmt::Display for RecoveryStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Greedy span from the first `{` to the last `}`
///
/// ```
/// use packvote_domain::plan::extract_object_span;
///
/// assert_eq!(extract_object_span("Plan: {\"a\": {\"b\": 1}} done"), Some("{\"a\": {\"b\": 1}}"));
/// assert_eq!(extract_object_span("no braces here"), None);
/// ```
pub fn extract_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Remove commas that directly precede a closing brace or bracket
///
/// ```
/// use packvote_domain::plan::strip_trailing_commas;
///
/// assert_eq!(strip_trailing_commas("{\"a\": [1, 2,], }"), "{\"a\": [1, 2]}");
/// ```
pub fn strip_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// Run the recovery pipeline over a raw engine response.
///
/// Returns the first JSON object produced and the step that produced it.
pub fn recover_document(raw: &str) -> Result<(Map<String, Value>, RecoveryStep), DomainError> {
    let mut candidate = raw.to_string();
    let mut last_error = String::from("response is not a JSON object");

    for step in RecoveryStep::PIPELINE {
        let Some(next) = step.apply(&candidate) else {
            return Err(DomainError::MalformedResponse(format!(
                "no JSON object found in response: {:?}",
                preview(raw, PREVIEW_BYTES)
            )));
        };
        candidate = next;

        match serde_json::from_str::<Value>(&candidate) {
            Ok(Value::Object(document)) => return Ok((document, step)),
            Ok(_) => last_error = "response is not a JSON object".to_string(),
            Err(e) => last_error = e.to_string(),
        }
    }

    Err(DomainError::MalformedResponse(format!(
        "{} in {:?}",
        last_error,
        preview(&candidate, PREVIEW_BYTES)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_direct_parse() {
        let (document, step) = recover_document(r#"{"destination": "Goa"}"#).unwrap();
        assert_eq!(step, RecoveryStep::Direct);
        assert_eq!(document["destination"], "Goa");
    }

    #[test]
    fn test_code_fenced_json() {
        let raw = "```json\n{\"destination\": \"Goa\"}\n```";
        let (document, step) = recover_document(raw).unwrap();
        assert_eq!(step, RecoveryStep::ExtractObjectSpan);
        assert_eq!(document["destination"], "Goa");
    }

    #[test]
    fn test_prose_with_trailing_comma() {
        let raw = "Here is the plan:\n{\n  \"destination\": \"Goa\",\n  \"tips\": [\"a\", \"b\",],\n}\nEnjoy!";
        let (document, step) = recover_document(raw).unwrap();
        assert_eq!(step, RecoveryStep::StripTrailingCommas);
        assert_eq!(document["tips"][1], "b");
    }

    #[test]
    fn test_no_object_span() {
        let err = recover_document("Sorry, I cannot help with that.").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.to_string().contains("no JSON object"));

        assert!(recover_document("} backwards {").is_err());
    }

    #[test]
    fn test_unrepairable_object() {
        let err = recover_document("Plan: {\"destination\": Goa}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_non_object_json_is_malformed() {
        assert!(recover_document("[1, 2, 3]").is_err());
        assert!(recover_document("42").is_err());
    }

    #[test]
    fn test_pipeline_order() {
        assert_eq!(
            RecoveryStep::PIPELINE,
            [
                RecoveryStep::Direct,
                RecoveryStep::ExtractObjectSpan,
                RecoveryStep::StripTrailingCommas
            ]
        );
        assert_eq!(RecoveryStep::ExtractObjectSpan.apply("x"), None);
    }
}
