//! Request and response bodies of the chat-completion endpoint

use serde::{Deserialize, Serialize};

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// JSON body POSTed to the endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatPayload {
    /// Two-message conversation: system persona then user instruction
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system.into(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user.into(),
                },
            ],
            temperature,
            max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if any
    pub fn into_first_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}
