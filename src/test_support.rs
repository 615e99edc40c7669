//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::research::{AnsweringService, ResearchError};

/// An answering service that replies with a fixed result and records every question.
pub struct ScriptedService {
    reply: Result<String, ResearchError>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn answering(answer: &str) -> Self {
        Self {
            reply: Ok(answer.to_string()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ResearchError) -> Self {
        Self {
            reply: Err(error),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Questions received so far, in order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnsweringService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn ask(&self, question: &str) -> Result<String, ResearchError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.reply.clone()
    }
}
