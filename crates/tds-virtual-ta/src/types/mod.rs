//! Core types for the virtual TA

pub mod question;
pub mod response;

pub use question::{AskRequest, Question};
pub use response::{AnswerResult, Link};
