//! Response types returned to callers

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Home page of the course forum
pub const FORUM_HOME_URL: &str = "https://discourse.onlinedegree.iitm.ac.in/";

/// Reference link attached to an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL
    pub url: String,
    /// Display label
    pub text: String,
}

impl Link {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }

    /// Link to the forum home page with the given label
    pub fn forum_home(text: impl Into<String>) -> Self {
        Self::new(FORUM_HOME_URL, text)
    }
}

/// Final answer payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Answer text
    pub answer: String,
    /// Reference links, never empty
    pub links: Vec<Link>,
}

impl AnswerResult {
    pub fn new(answer: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            answer: answer.into(),
            links,
        }
    }

    /// Serialize to JSON, proving the payload can be sent as-is
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
