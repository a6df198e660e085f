//! Reporting of faults that are recovered from rather than returned.
//!
//! When a [`Response`][crate::Response] cannot be serialized,
//! a fallback response is written in its place and the original fault is handed
//! to a [`DiagnosticSink`]. Such a fault indicates a bug in whatever built the response,
//! so it should end up somewhere a developer will see it.

use std::error::Error;

/// Receives reports of recovered faults.
///
/// Reporting is fire-and-forget: implementations should not block for long
/// and cannot influence what gets written.
///
/// Closures taking `(&str, &(dyn Error + 'static))` implement this trait,
/// which is convenient for capturing reports in tests.
pub trait DiagnosticSink {
    /// `message` describes what was being done, `cause` is the underlying failure.
    fn report(&self, message: &str, cause: &(dyn Error + 'static));
}

/// Emits reports through the [`log`] facade at `error` level.
///
/// Nothing is printed unless the host program installs a logger, such as `env_logger`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn report(&self, message: &str, cause: &(dyn Error + 'static)) {
        log::error!("{message}: {cause}");
        let mut source = cause.source();
        while let Some(inner) = source {
            log::debug!("  caused by: {inner}");
            source = inner.source();
        }
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str, &(dyn Error + 'static)),
{
    fn report(&self, message: &str, cause: &(dyn Error + 'static)) {
        self(message, cause)
    }
}
