use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-*]\s*").expect("Invalid bullet regex"));

pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

pub fn non_whitespace_length(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub words: usize,
    pub characters: usize,
    pub characters_without_spaces: usize,
}

pub fn word_count(text: &str) -> WordCount {
    WordCount {
        words: text.split_whitespace().count(),
        characters: text_length(text),
        characters_without_spaces: non_whitespace_length(text),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCount {
    pub total: usize,
    pub without_spaces: usize,
    pub spaces: usize,
}

pub fn character_count(text: &str) -> CharacterCount {
    let total = text_length(text);
    let without_spaces = non_whitespace_length(text);
    CharacterCount {
        total,
        without_spaces,
        spaces: total - without_spaces,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedText {
    pub text: String,
    /// Characters dropped by whitespace collapsing and trimming.
    pub removed: usize,
}

pub fn clean_text(text: &str) -> CleanedText {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    CleanedText {
        removed: text_length(text) - text_length(&cleaned),
        text: cleaned,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    Upper,
    Lower,
}

impl CaseMode {
    pub fn parse(mode: &str) -> Option<Self> {
        match mode {
            "upper" => Some(CaseMode::Upper),
            "lower" => Some(CaseMode::Lower),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::Upper => "upper",
            CaseMode::Lower => "lower",
        }
    }
}

pub fn convert_case(text: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Upper => text.to_uppercase(),
        CaseMode::Lower => text.to_lowercase(),
    }
}

/// Joins bullet lines into one sentence-per-line paragraph.
pub fn bullets_to_paragraph(text: &str) -> String {
    let sentences = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| BULLET_MARKER.replace(line, "").into_owned())
        .collect::<Vec<_>>();

    sentences.join(". ") + "."
}
