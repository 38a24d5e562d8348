//! Last-resort answer

use crate::types::response::{AnswerResult, Link};

pub const EMERGENCY_ANSWER: &str =
    "I'm currently experiencing issues. Please post your TDS question on the discourse forum where TAs and fellow students can help.";

/// Fixed apology pointing at the forum. Has no dependencies and cannot fail.
pub fn emergency_fallback() -> AnswerResult {
    AnswerResult::new(EMERGENCY_ANSWER, vec![Link::forum_home("TDS Course Forum")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::response::FORUM_HOME_URL;

    #[test]
    fn test_emergency_fallback_shape() {
        let result = emergency_fallback();
        assert_eq!(result.answer, EMERGENCY_ANSWER);
        assert_eq!(result.links, vec![Link::new(FORUM_HOME_URL, "TDS Course Forum")]);
        assert_eq!(result, emergency_fallback());
    }
}
