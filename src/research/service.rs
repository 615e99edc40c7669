use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while asking the research service a question.
///
/// The TUI never shows these to the user: every variant collapses into the same
/// failure placeholder in the transcript. They are kept distinct for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum ResearchError {
    /// Client misconfigured (unparseable endpoint URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The body was not JSON or carried no usable `answer`.
    Parse(String),
}

impl fmt::Display for ResearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResearchError::Config(msg) => write!(f, "config error: {msg}"),
            ResearchError::Network(msg) => write!(f, "network error: {msg}"),
            ResearchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ResearchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ResearchError {}

/// The external collaborator that turns a question into an answer.
#[async_trait]
pub trait AnsweringService: Send + Sync {
    /// Short name used in logs and the title bar.
    fn name(&self) -> &str;

    /// Asks a single question. Exactly one outbound request per call.
    async fn ask(&self, question: &str) -> Result<String, ResearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_for_api_errors() {
        let err = ResearchError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 503): unavailable");
    }

    #[test]
    fn display_prefixes_kind() {
        assert_eq!(
            ResearchError::Network("refused".to_string()).to_string(),
            "network error: refused"
        );
        assert_eq!(
            ResearchError::Parse("missing answer".to_string()).to_string(),
            "parse error: missing answer"
        );
        assert_eq!(
            ResearchError::Config("bad url".to_string()).to_string(),
            "config error: bad url"
        );
    }

    #[test]
    fn trait_object_records_each_question() {
        use crate::test_support::ScriptedService;
        use std::sync::Arc;

        let scripted = Arc::new(ScriptedService::answering("4"));
        let service: Arc<dyn AnsweringService> = scripted.clone();

        let answer = tokio_test::block_on(service.ask("What is 2+2?"));

        assert_eq!(answer, Ok("4".to_string()));
        assert_eq!(service.name(), "scripted");
        assert_eq!(scripted.questions(), vec!["What is 2+2?".to_string()]);
    }
}
