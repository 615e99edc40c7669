//! Wire types for the `/research` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ResearchError;

/// Number of research iterations requested per question. The UI always asks for one.
pub const MAX_ITERATION: u32 = 1;

/// Request body: `{"question": "...", "max_iteration": 1}`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResearchRequest {
    pub question: String,
    pub max_iteration: u32,
}

impl ResearchRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            max_iteration: MAX_ITERATION,
        }
    }
}

/// Success body. Only `answer` matters; other fields are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ResearchResponse {
    pub answer: String,
}

impl ResearchResponse {
    /// Parse a response body, requiring a string `answer` field.
    ///
    /// The service sometimes replies `{"message": "no results found ..."}` with
    /// a 200 status; that is a shape failure, same as `{}` or invalid JSON.
    pub fn from_body(body: &str) -> Result<Self, ResearchError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ResearchError::Parse(format!("invalid JSON: {e}")))?;

        match value.get("answer") {
            Some(Value::String(answer)) => Ok(Self {
                answer: answer.clone(),
            }),
            Some(other) => Err(ResearchError::Parse(format!(
                "`answer` is not a string: {other}"
            ))),
            None => Err(ResearchError::Parse("missing `answer` field".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_fixed_iteration() {
        let req = ResearchRequest::new("What is 2+2?");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"question": "What is 2+2?", "max_iteration": 1})
        );
    }

    #[test]
    fn parses_answer() {
        let resp = ResearchResponse::from_body(r#"{"answer": "4"}"#).unwrap();
        assert_eq!(resp.answer, "4");
    }

    #[test]
    fn ignores_extra_fields() {
        let resp =
            ResearchResponse::from_body(r#"{"answer": "**bold**", "sources": []}"#).unwrap();
        assert_eq!(resp.answer, "**bold**");
    }

    #[test]
    fn empty_object_is_parse_error() {
        let err = ResearchResponse::from_body("{}").unwrap_err();
        assert!(matches!(err, ResearchError::Parse(_)));
    }

    #[test]
    fn no_results_message_is_parse_error() {
        let err =
            ResearchResponse::from_body(r#"{"message": "no results found for x"}"#).unwrap_err();
        assert!(matches!(err, ResearchError::Parse(_)));
    }

    #[test]
    fn null_answer_is_parse_error() {
        let err = ResearchResponse::from_body(r#"{"answer": null}"#).unwrap_err();
        assert!(matches!(err, ResearchError::Parse(_)));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = ResearchResponse::from_body("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ResearchError::Parse(_)));
    }
}
