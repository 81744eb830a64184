//! Daily free-use gate.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::storage::{get_json, set_json, StoreError, UsageStore};

pub const DAILY_USED_KEY: &str = "daily_used";
pub const DEFAULT_DAILY_LIMIT: u32 = 5;
pub const LIMIT_REACHED_MESSAGE: &str = "Daily free limit reached. Pro coming soon!";

/// Stored under [`DAILY_USED_KEY`]. A record for an earlier day counts as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DailyCounter {
    date: NaiveDate,
    count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct UsageGate {
    store: Arc<dyn UsageStore>,
    limit: u32,
}

impl UsageGate {
    pub fn new(store: Arc<dyn UsageStore>, limit: u32) -> Self {
        Self { store, limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    fn used_on(&self, today: NaiveDate) -> u32 {
        match get_json::<DailyCounter>(self.store.as_ref(), DAILY_USED_KEY) {
            Some(counter) if counter.date == today => counter.count,
            _ => 0,
        }
    }

    pub fn can_invoke(&self, today: NaiveDate) -> bool {
        self.used_on(today) < self.limit
    }

    pub fn record_invocation(&self, today: NaiveDate) -> Result<DailyUsage, StoreError> {
        let counter = DailyCounter {
            date: today,
            count: self.used_on(today).saturating_add(1),
        };
        set_json(self.store.as_ref(), DAILY_USED_KEY, &counter)?;
        info!("Daily usage {}: {}/{}", today, counter.count, self.limit);
        Ok(self.status(today))
    }

    pub fn status(&self, today: NaiveDate) -> DailyUsage {
        let used = self.used_on(today);
        DailyUsage {
            date: today,
            used,
            limit: self.limit,
            remaining: self.limit.saturating_sub(used),
        }
    }
}
