//! Checks a new message must pass before it is written.

use crate::config::DEFAULT_MAX_MESSAGE_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostValidator {
    pub max_message_length: usize,
}

impl Default for PostValidator {
    fn default() -> Self {
        Self {
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
        }
    }
}

impl PostValidator {
    pub fn new(max_message_length: usize) -> Self {
        Self { max_message_length }
    }

    /// One message per failed check; empty means the message may be saved.
    pub fn validate(&self, message: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if message.trim().is_empty() {
            errors.push("Please enter a valid message.".to_string());
        }
        let len = message.chars().count();
        if len > self.max_message_length {
            errors.push(format!(
                "The message is too long ({len} characters); the maximum is {}.",
                self.max_message_length
            ));
        }
        errors
    }
}
