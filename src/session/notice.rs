//! User-facing notices and navigation requests raised by the session layer

use colored::Colorize;

use crate::router;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A short message meant for the person at the keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: None,
        }
    }
}

/// Surfaces notices (toast equivalent)
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Performs redirects requested by the session layer
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Writes notices to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        let title = match notice.level {
            NoticeLevel::Success => format!("✓ {}", notice.title).green(),
            NoticeLevel::Info => format!("○ {}", notice.title).cyan(),
            NoticeLevel::Error => format!("✗ {}", notice.title).red().bold(),
        };
        eprintln!("{}", title);
        if let Some(ref description) = notice.description {
            eprintln!("  {}", description);
        }
    }
}

/// Translates redirects into a hint on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, location: &str) {
        log::debug!("Redirect requested: {}", location);

        if location.starts_with(router::LOGIN_PATH) {
            let hint = match router::redirect_target(location) {
                Some(target) => format!("aerocast login --redirect-to {}", target),
                None => "aerocast login".to_string(),
            };
            eprintln!("  → Run '{}' to continue", hint.cyan());
        }
    }
}

#[cfg(test)]
pub use recorder::Recorder;

#[cfg(test)]
mod recorder {
    use std::sync::{Arc, Mutex};

    use super::{Navigator, Notice, Notifier};

    /// Captures notices and redirects for assertions
    #[derive(Debug, Default, Clone)]
    pub struct Recorder {
        notices: Arc<Mutex<Vec<Notice>>>,
        locations: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }

        pub fn locations(&self) -> Vec<String> {
            self.locations.lock().unwrap().clone()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    impl Navigator for Recorder {
        fn navigate(&self, location: &str) {
            self.locations.lock().unwrap().push(location.to_string());
        }
    }
}
