//! Keyword context retrieval

use std::fmt;
use std::sync::Arc;

use super::{EntrySource, KnowledgeBase, KnowledgeEntry};

/// Default cap on snippets per bundle
pub const DEFAULT_MAX_SNIPPETS: usize = 3;

/// One retrieved context fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSnippet {
    /// Course material
    Course { content: String },
    /// Forum post, rendered with its URL so links can be found later
    Forum {
        title: String,
        content: String,
        url: String,
    },
    /// Placeholder used when nothing matched
    General,
}

impl ContextSnippet {
    fn from_entry(entry: &KnowledgeEntry) -> Self {
        match &entry.source {
            EntrySource::Course => Self::Course {
                content: entry.content.clone(),
            },
            EntrySource::Forum { title, url } => Self::Forum {
                title: title.clone(),
                content: entry.content.clone(),
                url: url.clone(),
            },
        }
    }
}

impl fmt::Display for ContextSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course { content } => write!(f, "Course Material: {}", content),
            Self::Forum {
                title,
                content,
                url,
            } => write!(f, "Discourse: {} - {} (URL: {})", title, content, url),
            Self::General => f.write_str("General TDS course information available."),
        }
    }
}

/// Ordered snippets retrieved for one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBundle {
    snippets: Vec<ContextSnippet>,
}

impl ContextBundle {
    /// Bundle holding only the general placeholder
    pub fn general() -> Self {
        Self {
            snippets: vec![ContextSnippet::General],
        }
    }

    pub fn snippets(&self) -> &[ContextSnippet] {
        &self.snippets
    }

    /// True when nothing in the knowledge base matched
    pub fn is_general(&self) -> bool {
        matches!(self.snippets.as_slice(), [ContextSnippet::General])
    }

    /// Content of the first course-material snippet
    pub fn first_course_material(&self) -> Option<&str> {
        self.snippets.iter().find_map(|snippet| match snippet {
            ContextSnippet::Course { content } => Some(content.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for ContextBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, snippet) in self.snippets.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{}", snippet)?;
        }
        Ok(())
    }
}

/// Substring keyword matcher over the knowledge base
///
/// Every entry with at least one keyword hit is kept, in declaration order,
/// and the list is cut at `max_snippets`. Hit counts do not affect ordering.
#[derive(Debug, Clone)]
pub struct ContextRetriever {
    knowledge_base: Arc<KnowledgeBase>,
    max_snippets: usize,
}

impl ContextRetriever {
    pub fn new(knowledge_base: Arc<KnowledgeBase>, max_snippets: usize) -> Self {
        Self {
            knowledge_base,
            max_snippets,
        }
    }

    /// Retrieve context snippets for a question
    pub fn retrieve(&self, question: &str) -> ContextBundle {
        let question_lower = question.to_lowercase();

        let snippets: Vec<ContextSnippet> = self
            .knowledge_base
            .entries()
            .iter()
            .filter(|entry| entry.keyword_hits(&question_lower) > 0)
            .take(self.max_snippets)
            .map(ContextSnippet::from_entry)
            .collect();

        if snippets.is_empty() {
            tracing::debug!("No knowledge base match, using general context");
            return ContextBundle::general();
        }

        tracing::debug!("Retrieved {} context snippets", snippets.len());
        ContextBundle { snippets }
    }
}

impl Default for ContextRetriever {
    fn default() -> Self {
        Self::new(KnowledgeBase::tds(), DEFAULT_MAX_SNIPPETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(bundle: &ContextBundle) -> Vec<String> {
        bundle
            .snippets()
            .iter()
            .map(|s| match s {
                ContextSnippet::Course { content } => {
                    content.split(':').next().unwrap().to_string()
                }
                ContextSnippet::Forum { title, .. } => title.clone(),
                ContextSnippet::General => "general".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_python_setup_question() {
        let bundle = ContextRetriever::default().retrieve("How do I set up Python for TDS?");

        assert_eq!(ids(&bundle), vec!["Python setup for TDS", "Python Environment Setup"]);
        let text = bundle.to_string();
        assert!(text.starts_with("Course Material: Python setup for TDS"));
        assert!(text.contains("\n\nDiscourse: Python Environment Setup - "));
        assert!(text
            .contains("(URL: https://discourse.onlinedegree.iitm.ac.in/t/python-setup/156001)"));
    }

    #[test]
    fn test_no_match_returns_placeholder() {
        let bundle = ContextRetriever::default().retrieve("What is the meaning of life?");

        assert!(bundle.is_general());
        assert_eq!(bundle.to_string(), "General TDS course information available.");
    }

    #[test]
    fn test_declaration_order_beats_hit_count() {
        // git_version_control has six hits, python_setup only "pip"
        let bundle = ContextRetriever::default()
            .retrieve("pip error: git commit push branch github version control fails with api");

        assert_eq!(
            ids(&bundle),
            vec!["Python setup for TDS", "Git for TDS", "API usage in TDS"]
        );
    }

    #[test]
    fn test_retrieval_is_idempotent() {
        let retriever = ContextRetriever::default();
        let question = "How should I submit the GA5 assignment using the OpenAI API?";
        assert_eq!(retriever.retrieve(question), retriever.retrieve(question));
    }

    #[test]
    fn test_case_insensitive() {
        let bundle = ContextRetriever::default().retrieve("GIT");
        assert_eq!(ids(&bundle), vec!["Git for TDS"]);
    }

    #[test]
    fn test_custom_limit() {
        let retriever = ContextRetriever::new(KnowledgeBase::tds(), 1);
        let bundle = retriever.retrieve("python git api");
        assert_eq!(bundle.snippets().len(), 1);
        assert_eq!(bundle.first_course_material().map(|c| &c[..6]), Some("Python"));
    }
}
