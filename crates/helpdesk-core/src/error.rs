use std::fmt;

/// Machine-readable error codes for scripts and agents driving `hd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    TicketNotFound,
    DuplicateTicketId,
    EmptyField,
    CorruptStore,
    EmptyChatMessage,
    AttachmentUnreadable,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::TicketNotFound => "E2001",
            Self::DuplicateTicketId => "E2002",
            Self::EmptyField => "E2004",
            Self::CorruptStore => "E3001",
            Self::EmptyChatMessage => "E4001",
            Self::AttachmentUnreadable => "E4002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::TicketNotFound => "Ticket not found",
            Self::DuplicateTicketId => "Duplicate ticket ID",
            Self::EmptyField => "Required field is empty",
            Self::CorruptStore => "Corrupt ticket store",
            Self::EmptyChatMessage => "Empty chat message",
            Self::AttachmentUnreadable => "Attachment could not be read",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `hd init` to create the ticket store."),
            Self::ConfigParseError => Some("Fix syntax in .helpdesk/config.toml and retry."),
            Self::TicketNotFound => Some("Run `hd list` to see available ticket IDs."),
            Self::DuplicateTicketId => Some("Every ticket in a source must have a distinct ID."),
            Self::EmptyField => Some("Provide both a title and a description."),
            Self::CorruptStore => Some("Move the store aside and run `hd init` again."),
            Self::EmptyChatMessage => Some("Type a message or attach a file before sending."),
            Self::AttachmentUnreadable => Some("Check that the file exists and is readable."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Domain failures raised by the view, store, and chat layers.
#[derive(Debug, thiserror::Error)]
pub enum HelpdeskError {
    #[error("ticket store not found at {path}")]
    NotInitialized { path: String },

    #[error("invalid config {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    #[error("ticket {id} not found")]
    TicketNotFound { id: String },

    #[error("ticket id {id} appears more than once")]
    DuplicateTicketId { id: String },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("corrupt ticket store: {reason}")]
    CorruptStore { reason: String },
}

impl HelpdeskError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized { .. } => ErrorCode::NotInitialized,
            Self::InvalidConfig { .. } => ErrorCode::ConfigParseError,
            Self::TicketNotFound { .. } => ErrorCode::TicketNotFound,
            Self::DuplicateTicketId { .. } => ErrorCode::DuplicateTicketId,
            Self::EmptyField { .. } => ErrorCode::EmptyField,
            Self::CorruptStore { .. } => ErrorCode::CorruptStore,
        }
    }

    /// Remediation text, falling back to the code's generic summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or(code.message()).to_string()
    }
}
