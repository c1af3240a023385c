use spotless_applier_core::interfaces::{Notification, NotificationLevel, NotificationSink};
use std::sync::atomic::{AtomicBool, Ordering};

/// Prints notifications to stderr and remembers whether any was an error.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    had_error: AtomicBool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error.load(Ordering::SeqCst)
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let icon = match notification.level {
            NotificationLevel::Info => "✅",
            NotificationLevel::Warning => "⚠️ ",
            NotificationLevel::Error => {
                self.had_error.store(true, Ordering::SeqCst);
                "❌"
            }
        };
        eprintln!("{} {}", icon, notification.message);
    }
}
