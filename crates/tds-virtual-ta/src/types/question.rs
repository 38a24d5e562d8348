//! Question request types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wire body of `POST /api`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    /// The student's question
    #[serde(default)]
    pub question: String,

    /// Optional screenshot, base64 encoded
    #[serde(default)]
    pub image: Option<String>,
}

/// A validated question, one per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    image: Option<String>,
}

impl Question {
    /// Create a question without an image. Blank text is rejected.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(Error::EmptyQuestion);
        }
        Ok(Self { text, image: None })
    }

    /// Attach a base64 image payload. An empty payload means no image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        self.image = (!image.is_empty()).then_some(image);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl TryFrom<AskRequest> for Question {
    type Error = Error;

    fn try_from(request: AskRequest) -> Result<Self> {
        let question = Question::new(request.question)?;
        Ok(match request.image {
            Some(image) => question.with_image(image),
            None => question,
        })
    }
}
