use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Remote operations exposed by the AI service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Upload,
    Chat,
    Status,
    Health,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Upload => "upload",
            Operation::Chat => "chat",
            Operation::Status => "status",
            Operation::Health => "health",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-operation timeouts, sized by the expected remote processing cost.
///
/// Uploads are parsed, chunked and embedded on the remote side and can take
/// minutes. Chat runs retrieval plus generation. Status and health are cheap
/// lookups that must fail fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub upload: Duration,
    pub chat: Duration,
    pub status: Duration,
    pub health: Duration,
}

impl TimeoutPolicy {
    pub const DEFAULT_UPLOAD: Duration = Duration::from_secs(300);
    pub const DEFAULT_CHAT: Duration = Duration::from_secs(60);
    pub const DEFAULT_STATUS: Duration = Duration::from_secs(10);
    pub const DEFAULT_HEALTH: Duration = Duration::from_secs(5);

    /// Timeout applied to `operation`
    #[must_use]
    pub const fn for_operation(&self, operation: Operation) -> Duration {
        match operation {
            Operation::Upload => self.upload,
            Operation::Chat => self.chat,
            Operation::Status => self.status,
            Operation::Health => self.health,
        }
    }

    /// Check `upload > chat >= status >= health > 0`.
    ///
    /// # Errors
    /// Returns [`ConfigError::TimeoutOrdering`] when the ordering does not hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.upload > self.chat
            && self.chat >= self.status
            && self.status >= self.health
            && !self.health.is_zero();

        if ordered {
            Ok(())
        } else {
            Err(ConfigError::TimeoutOrdering {
                upload: self.upload,
                chat: self.chat,
                status: self.status,
                health: self.health,
            })
        }
    }
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            upload: Self::DEFAULT_UPLOAD,
            chat: Self::DEFAULT_CHAT,
            status: Self::DEFAULT_STATUS,
            health: Self::DEFAULT_HEALTH,
        }
    }
}
