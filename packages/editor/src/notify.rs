//! Operator notices raised after an export attempt

use tracing::{info, warn};

/// Outcome of an export, as shown to the operator
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Report reached the clipboard
    Copied { entries: usize },

    /// Neither clipboard path worked
    Failed { reason: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Copied { .. } => "Page copy copied to clipboard!".to_string(),
            Notice::Failed { reason } => format!("Could not copy page copy: {}", reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Copied { .. })
    }
}

/// Shows export notices to the operator
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

impl<F: Fn(&Notice)> Notifier for F {
    fn notify(&self, notice: &Notice) {
        self(notice)
    }
}

/// Notifier that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Copied { entries } => info!(entries, "{}", notice.message()),
            Notice::Failed { .. } => warn!("{}", notice.message()),
        }
    }
}
