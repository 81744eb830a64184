use once_cell::sync::Lazy;
use serde::Serialize;

use crate::tools::ToolKind;

#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub id: &'static str,
    #[serde(skip)]
    pub kind: ToolKind,
    pub name: &'static str,
    pub icon: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub keywords: &'static [&'static str],
}

impl ToolDescriptor {
    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self
                .keywords
                .iter()
                .any(|kw| kw.to_lowercase().contains(query))
    }
}

pub static TOOL_REGISTRY: Lazy<Vec<ToolDescriptor>> = Lazy::new(|| {
    vec![
        ToolDescriptor {
            id: "word-counter",
            kind: ToolKind::WordCounter,
            name: "Word Counter Online - Free Word & Character Count Tool",
            icon: "fas fa-font",
            version: "v1",
            description: "Free online word counter tool to count words and characters instantly. No registration needed. Perfect for writers, students, and professionals.",
            color: "#3b82f6",
            keywords: &["word counter", "character count", "text length", "word count tool"],
        },
        ToolDescriptor {
            id: "character-counter",
            kind: ToolKind::CharacterCounter,
            name: "Character Counter - Count Characters Online Free",
            icon: "fas fa-text-width",
            version: "v1",
            description: "Free character counter tool to count characters with and without spaces. Check text length for social media, essays, and documents.",
            color: "#8b5cf6",
            keywords: &["character counter", "text length", "character count", "string length"],
        },
        ToolDescriptor {
            id: "text-cleaner",
            kind: ToolKind::TextCleaner,
            name: "Text Cleaner Tool - Remove Extra Spaces Online",
            icon: "fas fa-broom",
            version: "v1",
            description: "Free text cleaner tool to remove extra spaces, clean messy text, and format paragraphs. No login required.",
            color: "#10b981",
            keywords: &["text cleaner", "remove spaces", "clean text", "format text"],
        },
        ToolDescriptor {
            id: "date-difference",
            kind: ToolKind::DateDifference,
            name: "Date Difference Calculator - Calculate Days Between Dates",
            icon: "fas fa-calendar-alt",
            version: "v1",
            description: "Free date calculator to calculate days between two dates. Perfect for project planning, event counting, and date calculations.",
            color: "#f59e0b",
            keywords: &["date calculator", "days between dates", "date difference", "day counter"],
        },
        ToolDescriptor {
            id: "case-converter",
            kind: ToolKind::CaseConverter,
            name: "Case Converter - UPPERCASE lowercase Online Tool",
            icon: "fas fa-exchange-alt",
            version: "v1",
            description: "Free case converter tool to change text to uppercase or lowercase. Convert text case instantly with one click.",
            color: "#ef4444",
            keywords: &["case converter", "uppercase", "lowercase", "text case"],
        },
        ToolDescriptor {
            id: "bullet-paragraph",
            kind: ToolKind::BulletParagraph,
            name: "Bullet to Paragraph Converter - Free Online Tool",
            icon: "fas fa-list-ul",
            version: "v1",
            description: "Free bullet to paragraph converter tool. Transform bullet points into a proper paragraph instantly.",
            color: "#06b6d4",
            keywords: &["bullet to paragraph", "convert bullets", "list to paragraph", "text converter"],
        },
    ]
});

pub fn list_tools() -> &'static [ToolDescriptor] {
    &TOOL_REGISTRY
}

pub fn find_tool(id: &str) -> Option<&'static ToolDescriptor> {
    TOOL_REGISTRY.iter().find(|tool| tool.id == id)
}

pub fn descriptor_for(kind: ToolKind) -> Option<&'static ToolDescriptor> {
    TOOL_REGISTRY.iter().find(|tool| tool.kind == kind)
}

/// Case-insensitive substring search over name, description and keywords.
pub fn search_tools(query: &str) -> Vec<&'static ToolDescriptor> {
    let query = query.trim().to_lowercase();
    TOOL_REGISTRY
        .iter()
        .filter(|tool| query.is_empty() || tool.matches(&query))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogFilter {
    All,
    Version(String),
}

impl CatalogFilter {
    pub fn parse(filter: &str) -> Self {
        match filter.trim() {
            "all" => CatalogFilter::All,
            version => CatalogFilter::Version(version.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CatalogFilter::All => "all",
            CatalogFilter::Version(version) => version,
        }
    }

    pub fn admits(&self, tool: &ToolDescriptor) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::Version(version) => tool.version == version,
        }
    }
}

pub fn filter_tools(filter: &CatalogFilter) -> Vec<&'static ToolDescriptor> {
    TOOL_REGISTRY.iter().filter(|tool| filter.admits(tool)).collect()
}

/// Tools visible under both a catalog filter and a search query.
pub fn visible_tools(filter: &CatalogFilter, query: &str) -> Vec<&'static ToolDescriptor> {
    search_tools(query)
        .into_iter()
        .filter(|tool| filter.admits(tool))
        .collect()
}

pub struct PageMeta {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub static PAGE_REGISTRY: Lazy<Vec<PageMeta>> = Lazy::new(|| {
    vec![
        PageMeta {
            key: "home",
            title: "MicroToolsHub - Free Online Tools Collection",
            description: "MicroToolsHub offers 100% free online tools: Word Counter, Character Counter, Text Cleaner, Date Calculator, Case Converter. No login required.",
        },
        PageMeta {
            key: "v1",
            title: "Toolsv1 - Free Online Tools | MicroToolsHub",
            description: "Use our free Toolsv1 tools: Word Counter, Character Counter, Text Cleaner, Date Calculator, Case Converter, Bullet to Paragraph. All completely free.",
        },
        PageMeta {
            key: "v2",
            title: "Toolsv2 - Coming Soon | MicroToolsHub",
            description: "Toolsv2 coming soon with more advanced tools. Get notified when new tools launch.",
        },
        PageMeta {
            key: "v3",
            title: "Toolsv3 - Future Tools | MicroToolsHub",
            description: "Toolsv3 planned with AI-powered tools and advanced features. Join waitlist for updates.",
        },
        PageMeta {
            key: "all",
            title: "All Tools - Free Online Utilities | MicroToolsHub",
            description: "Browse all free online tools at MicroToolsHub. Word counter, character counter, text cleaner, date calculator and more.",
        },
    ]
});

/// Page metadata for a filter key; unknown keys fall back to `home`.
pub fn page_meta(key: &str) -> &'static PageMeta {
    PAGE_REGISTRY
        .iter()
        .find(|page| page.key == key)
        .unwrap_or(&PAGE_REGISTRY[0])
}

pub fn page_title(key: &str) -> &'static str {
    page_meta(key).title
}

pub fn meta_description(key: &str) -> &'static str {
    page_meta(key).description
}
