//! Mock support chat.
//!
//! There is no backend: every submitted message schedules one canned
//! acknowledgement that is appended to the log once the configured delay has
//! passed. Callers drive time explicitly through [`ChatSession::poll`].

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ChatConfig;
use crate::error::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Support,
}

/// A single file attached to a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub name: String,
    pub size_bytes: u64,
}

impl Attachment {
    /// Describe the file at `path` from its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Attachment`] if the path is missing, unreadable,
    /// or not a regular file.
    pub fn from_path(path: &Path) -> Result<Self, ChatError> {
        let metadata = std::fs::metadata(path).map_err(|source| ChatError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(ChatError::Attachment {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            name,
            size_bytes: metadata.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message has no text and no attachment")]
    EmptyMessage,

    #[error("cannot attach {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChatError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyMessage => ErrorCode::EmptyChatMessage,
            Self::Attachment { .. } => ErrorCode::AttachmentUnreadable,
        }
    }
}

/// One conversation with the (simulated) support desk.
#[derive(Debug)]
pub struct ChatSession {
    log: Vec<ChatMessage>,
    pending: VecDeque<Instant>,
    reply_delay: Duration,
    reply: String,
}

impl ChatSession {
    /// Open a session; the log starts with the support greeting.
    #[must_use]
    pub fn new(config: &ChatConfig) -> Self {
        let mut log = Vec::new();
        if !config.greeting.trim().is_empty() {
            log.push(support_message(&config.greeting));
        }
        Self {
            log,
            pending: VecDeque::new(),
            reply_delay: config.reply_delay(),
            reply: config.reply.clone(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.log
    }

    /// Append a user message and schedule its acknowledgement.
    ///
    /// Text is trimmed; a message needs text, an attachment, or both.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyMessage`] if there is nothing to send.
    pub fn submit(
        &mut self,
        text: &str,
        attachment: Option<Attachment>,
        now: Instant,
    ) -> Result<&ChatMessage, ChatError> {
        let text = Some(text.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if text.is_none() && attachment.is_none() {
            return Err(ChatError::EmptyMessage);
        }

        tracing::debug!(
            has_text = text.is_some(),
            has_attachment = attachment.is_some(),
            "chat message submitted"
        );
        self.pending.push_back(now + self.reply_delay);
        self.log.push(ChatMessage {
            sender: Sender::User,
            text,
            attachment,
            sent_at: Utc::now(),
        });
        Ok(&self.log[self.log.len() - 1])
    }

    /// When the next canned reply is due, if any is pending.
    #[must_use]
    pub fn next_reply_due(&self) -> Option<Instant> {
        self.pending.front().copied()
    }

    /// Deliver every reply due at or before `now`; returns what was appended.
    pub fn poll(&mut self, now: Instant) -> &[ChatMessage] {
        let start = self.log.len();
        while self.pending.front().is_some_and(|due| *due <= now) {
            self.pending.pop_front();
            self.log.push(support_message(&self.reply));
        }
        &self.log[start..]
    }
}

fn support_message(text: &str) -> ChatMessage {
    ChatMessage {
        sender: Sender::Support,
        text: Some(text.to_string()),
        attachment: None,
        sent_at: Utc::now(),
    }
}
