//! Topic labels for research sessions (conversations with no file activity)

use std::sync::LazyLock;

use regex::Regex;

const MAX_TOPIC_WORDS: usize = 3;

static COMMAND_WRAPPERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^<command-message>.*?</command-message>\s*",
        r"^<command-name>.*?</command-name>\s*",
        r"^<command-args>\s*",
        r"</command-args>\s*$",
    ])
});

// Applied once each, in order, so "can you research x" loses both prefixes
static LEADING_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^i'?d? like (?:for )?you to ",
        r"^i want (?:you )?to ",
        r"^can you ",
        r"^please ",
        r"^do (?:all )?(?:the )?research (?:you can )?on ",
        r"^research ",
        r"^help me (?:with |understand )?",
        r"^let'?s? ",
    ])
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z][a-z0-9]*\b").expect("valid word regex"));

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "need",
    "about", "all", "also", "any", "because", "before", "between", "both", "each", "few",
    "first", "how", "into", "it", "its", "just", "last", "like", "make", "many", "more", "most",
    "new", "no", "not", "now", "only", "other", "our", "out", "over", "own", "same", "so",
    "some", "still", "such", "than", "that", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "too", "under", "up", "very", "what", "when", "where", "which",
    "while", "who", "why", "you", "your", "i", "me", "my", "we", "us",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).expect("valid research regex")).collect()
}

/// Title-cased topic from the opening message, empty when nothing meaningful remains.
///
/// # Examples
///
/// ```
/// use goldfish::classifier::research::research_topic;
///
/// assert_eq!(research_topic("Can you research quantum error correction codes"),
///            "Quantum Error Correction");
/// ```
pub fn research_topic(message: &str) -> String {
    let mut text = message.trim().to_lowercase();
    for pattern in COMMAND_WRAPPERS.iter().chain(LEADING_PHRASES.iter()) {
        text = pattern.replace(&text, "").into_owned();
    }

    WORD.find_iter(&text)
        .map(|m| m.as_str())
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .take(MAX_TOPIC_WORDS)
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Project name for a research session: `<topic>-research`, or `research`
pub fn research_project_name(topic: &str) -> String {
    let name = if topic.is_empty() { "research".to_string() } else { format!("{topic}-research") };
    name.to_lowercase().replace(' ', "-")
}

/// Uppercase every letter that follows a non-letter, lowercase the rest
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut after_letter = false;
    for c in word.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}
