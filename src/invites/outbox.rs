//! Outbox delivery: one JSON line per submission
//!
//! The outbox file is picked up by the sync service, which posts the
//! invites to the configured API.

use super::{Invite, InviteReceipt, InviteSender, InviteSubmission};
use crate::environment::ApiTarget;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// A queued submission as written to the outbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxRecord {
    pub id: Uuid,
    pub queued_at: DateTime<Utc>,
    pub api: String,
    pub invites: Vec<Invite>,
    pub from: String,
}

/// Appends submissions to a JSON-lines outbox file
#[derive(Debug, Clone)]
pub struct OutboxSender {
    path: PathBuf,
    api: ApiTarget,
}

impl OutboxSender {
    pub fn new(path: PathBuf, api: ApiTarget) -> Self {
        Self { path, api }
    }

    /// Outbox in the user data directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "invite", "invite-tui")
            .map(|dirs| dirs.data_dir().join("outbox.jsonl"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn api(&self) -> ApiTarget {
        self.api
    }
}

#[async_trait]
impl InviteSender for OutboxSender {
    async fn send(&mut self, submission: &InviteSubmission) -> Result<InviteReceipt> {
        let receipt = InviteReceipt::new(submission.invites.len());
        let record = OutboxRecord {
            id: receipt.id,
            queued_at: receipt.queued_at,
            api: self.api.base_url().to_string(),
            invites: submission.invites.clone(),
            from: submission.from.clone(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open outbox {}", self.path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(
            id = %receipt.id,
            count = receipt.count,
            api = %self.api,
            "queued invites"
        );
        Ok(receipt)
    }
}
