//! Tool execution engine.
//!
//! Maps a tool id, its payload and an optional mode to a structured
//! [`ToolOutput`]. Pure: no storage, no logging, no clock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date::{self, DateDifference};
use super::text::{self, CaseMode, CharacterCount, CleanedText, WordCount};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),
    #[error("Invalid mode: expected \"upper\" or \"lower\"")]
    InvalidMode(Option<String>),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    WordCounter,
    CharacterCounter,
    TextCleaner,
    DateDifference,
    CaseConverter,
    BulletParagraph,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::WordCounter,
        ToolKind::CharacterCounter,
        ToolKind::TextCleaner,
        ToolKind::DateDifference,
        ToolKind::CaseConverter,
        ToolKind::BulletParagraph,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ToolKind::WordCounter => "word-counter",
            ToolKind::CharacterCounter => "character-counter",
            ToolKind::TextCleaner => "text-cleaner",
            ToolKind::DateDifference => "date-difference",
            ToolKind::CaseConverter => "case-converter",
            ToolKind::BulletParagraph => "bullet-paragraph",
        }
    }

    pub fn takes_dates(&self) -> bool {
        matches!(self, ToolKind::DateDifference)
    }

    pub fn takes_mode(&self) -> bool {
        matches!(self, ToolKind::CaseConverter)
    }

    pub fn execute(&self, payload: &Payload, mode: Option<&str>) -> Result<ToolOutput, ToolError> {
        match self {
            ToolKind::WordCounter => Ok(ToolOutput::WordCount(text::word_count(
                payload.as_text(*self)?,
            ))),
            ToolKind::CharacterCounter => Ok(ToolOutput::CharacterCount(text::character_count(
                payload.as_text(*self)?,
            ))),
            ToolKind::TextCleaner => Ok(ToolOutput::CleanedText(text::clean_text(
                payload.as_text(*self)?,
            ))),
            ToolKind::DateDifference => {
                let (start, end) = payload.parse_dates()?;
                Ok(ToolOutput::DateDifference(date::date_difference(start, end)))
            }
            ToolKind::CaseConverter => {
                let input = payload.as_text(*self)?;
                let mode = mode
                    .and_then(CaseMode::parse)
                    .ok_or_else(|| ToolError::InvalidMode(mode.map(str::to_string)))?;
                Ok(ToolOutput::ConvertedCase {
                    text: text::convert_case(input, mode),
                    mode,
                })
            }
            ToolKind::BulletParagraph => Ok(ToolOutput::Paragraph {
                text: text::bullets_to_paragraph(payload.as_text(*self)?),
            }),
        }
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| ToolError::NotFound(id.to_string()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Raw user input for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Text { text: String },
    Dates { start: String, end: String },
}

impl Payload {
    pub fn text(text: impl Into<String>) -> Self {
        Payload::Text { text: text.into() }
    }

    pub fn dates(start: impl Into<String>, end: impl Into<String>) -> Self {
        Payload::Dates {
            start: start.into(),
            end: end.into(),
        }
    }

    fn as_text(&self, kind: ToolKind) -> Result<&str, ToolError> {
        match self {
            Payload::Text { text } => Ok(text),
            Payload::Dates { .. } => Err(ToolError::InvalidInput(format!(
                "{} expects text input",
                kind
            ))),
        }
    }

    fn parse_dates(&self) -> Result<(chrono::NaiveDate, chrono::NaiveDate), ToolError> {
        let (start, end) = match self {
            Payload::Dates { start, end } => (start, end),
            Payload::Text { .. } => {
                return Err(ToolError::InvalidInput(
                    "date-difference expects a start and end date".to_string(),
                ))
            }
        };
        let parse = |raw: &str| {
            date::parse_date(raw).ok_or_else(|| {
                ToolError::InvalidInput(format!("unparseable date {:?}, expected YYYY-MM-DD", raw))
            })
        };
        Ok((parse(start.as_str())?, parse(end.as_str())?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutput {
    WordCount(WordCount),
    CharacterCount(CharacterCount),
    CleanedText(CleanedText),
    DateDifference(DateDifference),
    ConvertedCase { text: String, mode: CaseMode },
    Paragraph { text: String },
}

/// Runs the tool named `tool_id` over `payload`.
pub fn execute(tool_id: &str, payload: &Payload, mode: Option<&str>) -> Result<ToolOutput, ToolError> {
    tool_id.parse::<ToolKind>()?.execute(payload, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.id().parse::<ToolKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_tool_is_not_found() {
        assert_eq!(
            execute("pdf-merger", &Payload::text("x"), None),
            Err(ToolError::NotFound("pdf-merger".to_string()))
        );
        assert!(matches!(
            execute("", &Payload::text(""), None),
            Err(ToolError::NotFound(_))
        ));
    }

    #[test]
    fn test_word_counter() {
        let output = execute("word-counter", &Payload::text("one two  three"), None).unwrap();
        assert_eq!(
            output,
            ToolOutput::WordCount(WordCount {
                words: 3,
                characters: 14,
                characters_without_spaces: 11,
            })
        );
    }

    #[test]
    fn test_mode_ignored_by_other_tools() {
        let with_mode = execute("character-counter", &Payload::text("a b"), Some("upper"));
        let without = execute("character-counter", &Payload::text("a b"), None);
        assert_eq!(with_mode, without);
    }

    #[test]
    fn test_case_converter_requires_mode() {
        assert_eq!(
            execute("case-converter", &Payload::text("abc"), None),
            Err(ToolError::InvalidMode(None))
        );
        assert_eq!(
            execute("case-converter", &Payload::text("abc"), Some("title")),
            Err(ToolError::InvalidMode(Some("title".to_string())))
        );
    }

    #[test]
    fn test_case_converter_modes() {
        assert_eq!(
            execute("case-converter", &Payload::text("MiXeD"), Some("upper")).unwrap(),
            ToolOutput::ConvertedCase {
                text: "MIXED".to_string(),
                mode: CaseMode::Upper,
            }
        );
        assert_eq!(
            execute("case-converter", &Payload::text("MiXeD"), Some("lower")).unwrap(),
            ToolOutput::ConvertedCase {
                text: "mixed".to_string(),
                mode: CaseMode::Lower,
            }
        );
    }

    #[test]
    fn test_date_difference() {
        let output = execute(
            "date-difference",
            &Payload::dates("2024-01-01", "2024-01-10"),
            None,
        )
        .unwrap();
        match output {
            ToolOutput::DateDifference(diff) => assert_eq!(diff.days, 9),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_date_difference_rejects_bad_dates() {
        assert!(matches!(
            execute("date-difference", &Payload::dates("", "2024-01-10"), None),
            Err(ToolError::InvalidInput(_))
        ));
        assert!(matches!(
            execute("date-difference", &Payload::dates("2024-01-01", "soon"), None),
            Err(ToolError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_payload_shape_mismatch() {
        assert!(matches!(
            execute("date-difference", &Payload::text("2024-01-01"), None),
            Err(ToolError::InvalidInput(_))
        ));
        assert!(matches!(
            execute("text-cleaner", &Payload::dates("2024-01-01", "2024-01-02"), None),
            Err(ToolError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_payload_is_not_mutated() {
        let payload = Payload::text("  keep   me  ");
        let before = payload.clone();
        execute("text-cleaner", &payload, None).unwrap();
        assert_eq!(payload, before);
    }

    #[test]
    fn test_output_serializes_with_kind_tag() {
        let output = execute("bullet-paragraph", &Payload::text("- a\n- b"), None).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["kind"], "paragraph");
        assert_eq!(json["text"], "a. b.");
    }
}
