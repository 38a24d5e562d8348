//! Forum link extraction and labelling

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::response::Link;

/// Maximum links attached to an answer
pub const MAX_LINKS: usize = 2;

static TOPIC_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://discourse\.onlinedegree\.iitm\.ac\.in/t/[^/\s)]+/\d+(?:/\d+)?")
        .expect("Invalid topic URL regex")
});

static TOPIC_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/t/([^/]+)/").expect("Invalid topic slug regex"));

/// Extract forum links from context, or fall back to one default link
///
/// URLs are deduplicated in discovery order and capped at [`MAX_LINKS`].
pub fn extract_links(context: &str, question: &str) -> Vec<Link> {
    let mut urls: Vec<&str> = Vec::new();
    for found in TOPIC_URL.find_iter(context) {
        if !urls.contains(&found.as_str()) {
            urls.push(found.as_str());
        }
    }

    let links: Vec<Link> = urls
        .into_iter()
        .take(MAX_LINKS)
        .enumerate()
        .map(|(i, url)| Link::new(url, topic_label(url, i + 1)))
        .collect();

    if links.is_empty() {
        return vec![default_link(question)];
    }

    links
}

/// Label for a topic URL, from its slug when possible
fn topic_label(url: &str, position: usize) -> String {
    TOPIC_SLUG
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|slug| format!("{} Discussion", title_case(&slug.as_str().replace('-', " "))))
        .unwrap_or_else(|| format!("Related Discussion {}", position))
}

/// Forum home link labelled by what the question is about
fn default_link(question: &str) -> Link {
    let question_lower = question.to_lowercase();

    let label = if contains_any(&question_lower, &["assignment", "homework"]) {
        "TDS Assignment Help"
    } else if contains_any(&question_lower, &["python", "code"]) {
        "TDS Programming Help"
    } else {
        "TDS Course Forum"
    };

    Link::forum_home(label)
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}
