//! Gated tool invocation shared by the page and RPC handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::analytics::Analytics;
use crate::registries::{find_tool, ToolDescriptor};
use crate::storage::{StoreError, UsageStore};
use crate::tools::{Payload, ToolError, ToolOutput};
use crate::usage::{DailyUsage, UsageGate};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Daily free limit reached. Pro coming soon!")]
    LimitReached { limit: u32 },
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct ToolRun {
    pub tool: &'static ToolDescriptor,
    pub output: ToolOutput,
    pub usage: DailyUsage,
}

#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub daily: DailyUsage,
    pub tools: BTreeMap<String, u64>,
}

pub struct ToolService {
    gate: UsageGate,
    analytics: Arc<Analytics>,
    // Serializes check, execute and record so concurrent requests can't overshoot the limit.
    invoke_lock: Mutex<()>,
}

impl ToolService {
    pub fn new(store: Arc<dyn UsageStore>, daily_limit: u32, analytics: Arc<Analytics>) -> Self {
        Self {
            gate: UsageGate::new(store, daily_limit),
            analytics,
            invoke_lock: Mutex::new(()),
        }
    }

    /// Runs one tool if today's free allowance permits. Only successful runs
    /// consume the allowance.
    pub fn run(
        &self,
        tool_id: &str,
        payload: &Payload,
        mode: Option<&str>,
        today: NaiveDate,
    ) -> Result<ToolRun, RunError> {
        let tool = find_tool(tool_id).ok_or_else(|| ToolError::NotFound(tool_id.to_string()))?;

        let _guard = self.invoke_lock.lock();
        if !self.gate.can_invoke(today) {
            warn!("Daily limit of {} reached, refusing {}", self.gate.limit(), tool.id);
            return Err(RunError::LimitReached {
                limit: self.gate.limit(),
            });
        }

        let output = tool.kind.execute(payload, mode)?;
        let usage = self.gate.record_invocation(today)?;
        if let Err(e) = self.analytics.track_tool_usage(tool.id) {
            warn!("Failed to track usage of {}: {}", tool.id, e);
        }
        info!("Ran {} ({} runs left today)", tool.id, usage.remaining);

        Ok(ToolRun {
            tool,
            output,
            usage,
        })
    }

    pub fn usage_report(&self, today: NaiveDate) -> UsageReport {
        UsageReport {
            daily: self.gate.status(today),
            tools: self.analytics.tool_usage(),
        }
    }
}
