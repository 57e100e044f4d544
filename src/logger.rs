//! Optional leveled logging hook.
//!
//! The client always reports through `tracing`. A [`Logger`] supplied on the
//! builder additionally receives every diagnostic event, which lets callers
//! route client events into an existing logging system.

use std::fmt;
use std::sync::Arc;

/// Severity levels, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured logger with one method per level.
///
/// Only [`log`](Self::log) is required; the per-level methods forward to it.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn emergency(&self, message: &str) {
        self.log(LogLevel::Emergency, message);
    }

    fn alert(&self, message: &str) {
        self.log(LogLevel::Alert, message);
    }

    fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn notice(&self, message: &str) {
        self.log(LogLevel::Notice, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

/// Fan-out of diagnostic events to `tracing` and the optional hook.
#[derive(Clone, Default)]
pub(crate) struct Diagnostics {
    hook: Option<Arc<dyn Logger>>,
}

impl Diagnostics {
    pub(crate) fn new(hook: Option<Arc<dyn Logger>>) -> Self {
        Self { hook }
    }

    pub(crate) fn emit(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical | LogLevel::Error => {
                tracing::error!(level = %level, "{message}")
            }
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Notice | LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
        }

        if let Some(hook) = &self.hook {
            match level {
                LogLevel::Emergency => hook.emergency(message),
                LogLevel::Alert => hook.alert(message),
                LogLevel::Critical => hook.critical(message),
                LogLevel::Error => hook.error(message),
                LogLevel::Warning => hook.warning(message),
                LogLevel::Notice => hook.notice(message),
                LogLevel::Info => hook.info(message),
                LogLevel::Debug => hook.debug(message),
            }
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
