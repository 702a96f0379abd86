use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::anthropic;

use crate::domain::{ports::Answerer, DomainError};

const SYSTEM_PREAMBLE: &str = "You answer questions about the document below. \
Answer only from the document text; say so when the document does not \
contain the answer.";

pub struct AnthropicAnswerer {
    model: String,
}

impl AnthropicAnswerer {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn default_model() -> Self {
        Self::new("claude-3-opus-20240229")
    }
}

#[async_trait]
impl Answerer for AnthropicAnswerer {
    async fn answer(&self, document_text: &str, question: &str) -> Result<String, DomainError> {
        let client = anthropic::Client::from_env();
        let system = format!("{}\n\n<document>\n{}\n</document>", SYSTEM_PREAMBLE, document_text);
        let agent = client.agent(&self.model).preamble(&system).build();
        agent
            .prompt(question)
            .await
            .map_err(|e| DomainError::retryable(e.to_string()))
    }
}
