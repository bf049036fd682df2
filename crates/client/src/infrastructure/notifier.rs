use crate::domain::Notifier;

/// Notifier that only logs, for headless callers
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}
