//! Response envelope — the decoded model response, classified once at the boundary.
//!
//! Everything downstream of [`ResponseEnvelope::classify`] works on a guaranteed shape:
//! either a non-empty content sequence or an explicit defect.

use serde_json::Value;
use thiserror::Error;

/// Text used when the first content element carries no string `text`.
pub const MISSING_TEXT_PLACEHOLDER: &str = "No output text found.";

/// Why an envelope could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeDefect {
    #[error("response has no `content` key")]
    MissingContent,

    #[error("response `content` is not a sequence")]
    ContentNotSequence,

    #[error("response `content` is empty")]
    EmptyContent,
}

/// One element of the `content` sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentElement {
    pub text: Option<String>,
}

impl ContentElement {
    fn from_value(value: &Value) -> Self {
        Self {
            text: value.get("text").and_then(Value::as_str).map(String::from),
        }
    }

    /// The element's text, or [`MISSING_TEXT_PLACEHOLDER`].
    pub fn text_or_placeholder(&self) -> &str {
        self.text.as_deref().unwrap_or(MISSING_TEXT_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEnvelope {
    Valid {
        first: ContentElement,
        rest: Vec<ContentElement>,
    },
    Invalid(EnvelopeDefect),
}

impl ResponseEnvelope {
    pub fn classify(response: &Value) -> Self {
        let Some(content) = response.get("content") else {
            return ResponseEnvelope::Invalid(EnvelopeDefect::MissingContent);
        };
        let Some(items) = content.as_array() else {
            return ResponseEnvelope::Invalid(EnvelopeDefect::ContentNotSequence);
        };

        let mut elements = items.iter().map(ContentElement::from_value);
        match elements.next() {
            Some(first) => ResponseEnvelope::Valid {
                first,
                rest: elements.collect(),
            },
            None => ResponseEnvelope::Invalid(EnvelopeDefect::EmptyContent),
        }
    }

    /// Content elements after the first; they are never parsed.
    pub fn ignored_elements(&self) -> usize {
        match self {
            ResponseEnvelope::Valid { rest, .. } => rest.len(),
            ResponseEnvelope::Invalid(_) => 0,
        }
    }

    /// Text of the first content element; the defect when the envelope is unusable.
    pub fn primary_text(&self) -> Result<&str, EnvelopeDefect> {
        match self {
            ResponseEnvelope::Valid { first, .. } => Ok(first.text_or_placeholder()),
            ResponseEnvelope::Invalid(defect) => Err(*defect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_envelope_takes_first_element() {
        let response = json!({
            "content": [
                {"type": "text", "text": "first"},
                {"type": "text", "text": "second"}
            ]
        });
        let envelope = ResponseEnvelope::classify(&response);
        assert_eq!(envelope.primary_text(), Ok("first"));
        assert_eq!(envelope.ignored_elements(), 1);
    }

    #[test]
    fn test_missing_content_key() {
        let envelope = ResponseEnvelope::classify(&json!({"id": "msg_1"}));
        assert_eq!(
            envelope,
            ResponseEnvelope::Invalid(EnvelopeDefect::MissingContent)
        );
    }

    #[test]
    fn test_content_not_a_sequence() {
        for content in [json!("text"), json!({"text": "x"}), json!(null), json!(3)] {
            let envelope = ResponseEnvelope::classify(&json!({ "content": content }));
            assert_eq!(
                envelope,
                ResponseEnvelope::Invalid(EnvelopeDefect::ContentNotSequence)
            );
        }
    }

    #[test]
    fn test_empty_content_sequence() {
        let envelope = ResponseEnvelope::classify(&json!({"content": []}));
        assert_eq!(envelope.primary_text(), Err(EnvelopeDefect::EmptyContent));
    }

    #[test]
    fn test_non_object_response_is_missing_content() {
        for response in [json!([]), json!("content"), json!(null)] {
            assert_eq!(
                ResponseEnvelope::classify(&response),
                ResponseEnvelope::Invalid(EnvelopeDefect::MissingContent)
            );
        }
    }

    #[test]
    fn test_absent_text_uses_placeholder() {
        let envelope = ResponseEnvelope::classify(&json!({"content": [{"type": "tool_use"}]}));
        assert_eq!(envelope.primary_text(), Ok(MISSING_TEXT_PLACEHOLDER));
    }

    #[test]
    fn test_non_string_text_uses_placeholder() {
        let envelope = ResponseEnvelope::classify(&json!({"content": [{"text": 42}]}));
        assert_eq!(envelope.primary_text(), Ok(MISSING_TEXT_PLACEHOLDER));
    }

    #[test]
    fn test_non_object_element_uses_placeholder() {
        let envelope = ResponseEnvelope::classify(&json!({"content": ["bare string"]}));
        assert_eq!(envelope.primary_text(), Ok(MISSING_TEXT_PLACEHOLDER));
    }
}
