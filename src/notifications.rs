//! "Notify me" sign-ups for upcoming tool versions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::storage::{get_json, set_json, StoreError, UsageStore};

pub const NOTIFICATIONS_KEY: &str = "microtools_notifications";
pub const DEFAULT_SOURCE: &str = "notify_modal";
pub const ANONYMOUS: &str = "Anonymous";

/// Checkbox choices offered by the sign-up form, as (field, label).
pub const INTEREST_OPTIONS: [(&str, &str); 3] = [
    ("interest_v2", "Toolsv2 advanced tools"),
    ("interest_v3", "Toolsv3 AI-powered tools"),
    ("interest_pro", "Pro plan launch"),
];

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSignup {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub interests: Vec<String>,
    pub date: DateTime<Utc>,
    pub source: String,
}

impl NotificationSignup {
    pub fn thank_you_message(&self) -> String {
        let greeting = if self.name == ANONYMOUS {
            String::new()
        } else {
            format!(" {}", self.name)
        };
        format!(
            "Thank you{}! We'll notify you at {} when new tools are available.",
            greeting, self.email
        )
    }
}

pub struct Notifications {
    store: Arc<dyn UsageStore>,
    // Held across read, append and write of the stored list.
    append_lock: Mutex<()>,
}

impl Notifications {
    pub fn new(store: Arc<dyn UsageStore>) -> Self {
        Self {
            store,
            append_lock: Mutex::new(()),
        }
    }

    pub fn list(&self) -> Vec<NotificationSignup> {
        get_json(self.store.as_ref(), NOTIFICATIONS_KEY).unwrap_or_default()
    }

    pub fn subscribe(
        &self,
        request: NotificationRequest,
        now: DateTime<Utc>,
    ) -> Result<NotificationSignup, NotificationError> {
        let email = request.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(NotificationError::InvalidEmail);
        }
        let name = match request.name.trim() {
            "" => ANONYMOUS.to_string(),
            name => name.to_string(),
        };

        let signup = NotificationSignup {
            id: Uuid::new_v4(),
            name,
            email: email.to_string(),
            interests: request
                .interests
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            date: now,
            source: request.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        };

        let _guard = self.append_lock.lock();
        let mut signups = self.list();
        signups.push(signup.clone());
        set_json(self.store.as_ref(), NOTIFICATIONS_KEY, &signups)?;
        Ok(signup)
    }
}
