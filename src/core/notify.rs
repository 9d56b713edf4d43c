use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// User-facing notices raised by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A search was attempted without a location
    MissingLocation,
    /// The search call failed; `reason` is for logs, not for display
    SearchFailed { reason: String },
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::MissingLocation => "Please enter a location to search for restaurants.",
            Notice::SearchFailed { .. } => "Error searching restaurants. Please try again.",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::SearchFailed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives notices; presentation decides how to show them
pub trait NoticeSink {
    fn notify(&self, notice: Notice);
}

impl<T: NoticeSink + ?Sized> NoticeSink for Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Forwards notices over an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NoticeSink for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.tx.send(notice) {
            tracing::warn!("Notice dropped, receiver gone: {}", e.0);
        }
    }
}
