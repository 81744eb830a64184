//! Display text for tool results, as shown in the result modal and
//! returned as RPC text content.

use crate::tools::date::format_long_date;
use crate::tools::ToolOutput;

pub fn format_output(output: &ToolOutput) -> String {
    match output {
        ToolOutput::WordCount(count) => format!(
            "📊 Word Count Result:\n\n• Words: {}\n• Characters (with spaces): {}\n• Characters (without spaces): {}",
            count.words, count.characters, count.characters_without_spaces
        ),
        ToolOutput::CharacterCount(count) => format!(
            "🔤 Character Count Result:\n\n• Total Characters: {}\n• Without Spaces: {}\n• Space Count: {}",
            count.total, count.without_spaces, count.spaces
        ),
        ToolOutput::CleanedText(cleaned) => format!(
            "✨ Cleaned Text:\n\n{}\n\n📈 Reduced {} extra characters",
            cleaned.text, cleaned.removed
        ),
        ToolOutput::DateDifference(diff) => format!(
            "📅 Date Difference:\n\n• From: {}\n• To: {}\n• Difference: {} {}",
            format_long_date(diff.start),
            format_long_date(diff.end),
            diff.days,
            diff.day_label()
        ),
        ToolOutput::ConvertedCase { text, .. } => text.clone(),
        ToolOutput::Paragraph { text } => text.clone(),
    }
}
