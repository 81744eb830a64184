//! Property-based tests for the tool execution engine.

use chrono::{Duration, NaiveDate};
use microtools_hub::tools::{execute, Payload, ToolError, ToolOutput};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \t\na-zA-Z0-9]{0,64}",
        any::<String>(),
        "[ •*\\-]{0,3}[a-zé ]{0,12}(\n[ •*\\-]{0,3}[a-zé ]{0,12}){0,5}",
    ]
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (-50_000i64..50_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn run(tool: &str, text: &str, mode: Option<&str>) -> ToolOutput {
    execute(tool, &Payload::text(text), mode).unwrap()
}

fn run_text(tool: &str, text: &str, mode: Option<&str>) -> String {
    match run(tool, text, mode) {
        ToolOutput::ConvertedCase { text, .. } => text,
        ToolOutput::CleanedText(cleaned) => cleaned.text,
        ToolOutput::Paragraph { text } => text,
        other => panic!("unexpected output: {:?}", other),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn word_counter_counts_every_char(s in arb_text()) {
        match run("word-counter", &s, None) {
            ToolOutput::WordCount(count) => {
                prop_assert_eq!(count.characters, s.chars().count());
                prop_assert!(count.characters_without_spaces <= count.characters);
                prop_assert_eq!(count.words, s.split_whitespace().count());
            }
            other => prop_assert!(false, "unexpected output: {:?}", other),
        }
    }

    #[test]
    fn character_counter_parts_sum_to_total(s in arb_text()) {
        match run("character-counter", &s, None) {
            ToolOutput::CharacterCount(count) => {
                prop_assert_eq!(count.without_spaces + count.spaces, s.chars().count());
                prop_assert_eq!(count.total, s.chars().count());
            }
            other => prop_assert!(false, "unexpected output: {:?}", other),
        }
    }

    #[test]
    fn text_cleaner_is_idempotent(s in arb_text()) {
        let once = run_text("text-cleaner", &s, None);
        let twice = run_text("text-cleaner", &once, None);
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn upper_has_no_lowercase(s in arb_text()) {
        let upper = run_text("case-converter", &s, Some("upper"));
        prop_assert!(!upper.chars().any(|c| c.is_lowercase() && c.to_uppercase().any(|u| u != c)));
    }

    #[test]
    fn lower_after_upper_is_lowercase_normalized(s in "[ \ta-zA-Z0-9.,!]{0,64}") {
        let upper = run_text("case-converter", &s, Some("upper"));
        let lower = run_text("case-converter", &upper, Some("lower"));
        prop_assert_eq!(lower, s.to_lowercase());
    }

    #[test]
    fn bullet_paragraph_ends_with_single_period_join(s in arb_text()) {
        let paragraph = run_text("bullet-paragraph", &s, None);
        prop_assert!(paragraph.ends_with('.'));
        let lines = s.split('\n').filter(|l| !l.trim().is_empty()).count();
        if lines > 0 {
            prop_assert!(paragraph.matches(". ").count() >= lines - 1);
        } else {
            prop_assert_eq!(paragraph, ".");
        }
    }

    #[test]
    fn date_difference_is_antisymmetric(a in arb_date(), b in arb_date()) {
        let days = |start: NaiveDate, end: NaiveDate| {
            let payload = Payload::dates(
                start.format("%Y-%m-%d").to_string(),
                end.format("%Y-%m-%d").to_string(),
            );
            match execute("date-difference", &payload, None) {
                Ok(ToolOutput::DateDifference(diff)) => diff.days,
                other => panic!("unexpected output: {:?}", other),
            }
        };
        prop_assert_eq!(days(a, b), -days(b, a));
        prop_assert_eq!(days(a, b), (b - a).num_days());
    }

    #[test]
    fn unknown_ids_are_not_found(id in "[a-z\\-]{0,24}") {
        prop_assume!(![
            "word-counter",
            "character-counter",
            "text-cleaner",
            "date-difference",
            "case-converter",
            "bullet-paragraph",
        ]
        .contains(&id.as_str()));
        prop_assert_eq!(
            execute(&id, &Payload::text("anything"), None),
            Err(ToolError::NotFound(id.clone()))
        );
    }
}
