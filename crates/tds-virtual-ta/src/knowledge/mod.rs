//! Embedded knowledge base and keyword retrieval
//!
//! The knowledge base is a fixed table of course topics followed by forum
//! posts. It is built once per process and never mutated.

mod data;
pub mod retriever;

use once_cell::sync::Lazy;
use std::sync::Arc;

pub use retriever::{ContextBundle, ContextRetriever, ContextSnippet};

static TDS_KNOWLEDGE_BASE: Lazy<Arc<KnowledgeBase>> =
    Lazy::new(|| Arc::new(KnowledgeBase::new(data::course_topics(), data::forum_posts())));

/// Where an entry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// Hand-written course material
    Course,
    /// Forum post with its canonical topic URL
    Forum { title: String, url: String },
}

/// A single knowledge base entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub id: String,
    pub content: String,
    /// Lower-case keywords, matched as substrings of the question
    pub keywords: Vec<String>,
    pub source: EntrySource,
}

impl KnowledgeEntry {
    /// Course topic entry
    pub fn course(id: &str, content: &str, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            source: EntrySource::Course,
        }
    }

    /// Forum post entry
    pub fn forum(id: &str, title: &str, url: &str, content: &str, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            source: EntrySource::Forum {
                title: title.to_string(),
                url: url.to_string(),
            },
        }
    }

    /// Number of keywords contained in an already lower-cased question
    pub fn keyword_hits(&self, question_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| question_lower.contains(keyword.as_str()))
            .count()
    }
}

/// Immutable, ordered knowledge base
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Course topics are always ordered before forum posts
    pub fn new(course_topics: Vec<KnowledgeEntry>, forum_posts: Vec<KnowledgeEntry>) -> Self {
        let mut entries = course_topics;
        entries.extend(forum_posts);
        Self { entries }
    }

    /// The built-in TDS knowledge base, shared process-wide
    pub fn tds() -> Arc<Self> {
        Arc::clone(&TDS_KNOWLEDGE_BASE)
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
