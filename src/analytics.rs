use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::registries::find_tool;
use crate::storage::{get_json, set_json, StoreError, UsageStore};

pub const TOOL_USAGE_KEY: &str = "tool_usage";

/// Search queries shorter than this are not logged.
const MIN_TRACKED_QUERY_LEN: usize = 2;

pub struct Analytics {
    store: Arc<dyn UsageStore>,
}

impl Analytics {
    pub fn new(store: Arc<dyn UsageStore>) -> Self {
        Self { store }
    }

    pub fn tool_usage(&self) -> BTreeMap<String, u64> {
        get_json(self.store.as_ref(), TOOL_USAGE_KEY).unwrap_or_default()
    }

    /// Bumps the per-tool invocation count and returns the new value.
    pub fn track_tool_usage(&self, tool_id: &str) -> Result<u64, StoreError> {
        let name = find_tool(tool_id).map(|t| t.name).unwrap_or(tool_id);
        info!(tool = tool_id, "Tool used: {}", name);

        let mut usage = self.tool_usage();
        let count = usage.entry(tool_id.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        set_json(self.store.as_ref(), TOOL_USAGE_KEY, &usage)?;
        Ok(count)
    }

    pub fn track_page_view(&self, page: &str) {
        info!(page, "Page view");
    }

    pub fn track_filter_usage(&self, filter: &str) {
        info!(filter, "Filter used");
    }

    /// Returns whether the query was long enough to be logged.
    pub fn track_search_query(&self, query: &str) -> bool {
        let query = query.trim();
        if query.chars().count() < MIN_TRACKED_QUERY_LEN {
            return false;
        }
        info!(query, "Search query");
        true
    }

    pub fn track_modal_open(&self, modal: &str) {
        info!(modal, "Modal opened");
    }

    pub fn track_notification_signup(&self, email: &str, interests: &[String]) {
        info!(email, interests = %interests.join(", "), "Notification signup");
    }
}
