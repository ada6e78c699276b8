//! Shopper notice port.
//!
//! Reconciliation surfaces short shopper-facing messages (payment received,
//! amount mismatch, ...) regardless of where the shopper lands next. The
//! storefront decides how to render them; the default adapter logs them.

/// Severity of a shopper-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Port for queueing shopper-facing notices.
pub trait NoticeSink: Send + Sync {
    fn push(&self, level: NoticeLevel, message: &str);
}
