//! Conversation session: identity and in-memory transcript.
//!
//! A session lives for one process run. Its identifier is a random UUID v4,
//! which is what scopes multi-turn context on the service side. The
//! transcript is never persisted unless the user asks for a JSON export.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChatError;

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A single conversation with the agent.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub turns: Vec<Turn>,
}

#[derive(Serialize)]
struct TranscriptFile<'a> {
    session_id: &'a str,
    created_at: DateTime<Utc>,
    exported_at: DateTime<Utc>,
    turns: &'a [Turn],
}

impl Session {
    /// Fresh session with a random identifier.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            turns: Vec::new(),
        }
    }

    pub fn record(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    /// Write the transcript as pretty-printed JSON to `path`.
    pub fn export(&self, path: &Path) -> Result<(), ChatError> {
        let file = TranscriptFile {
            session_id: &self.id,
            created_at: self.created_at,
            exported_at: Utc::now(),
            turns: &self.turns,
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
