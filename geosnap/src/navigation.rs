//! Screen selection.

use crate::store::LoggedRecord;

/// A screen the user can be on.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Current snapshot.
    Home,
    /// Saved record list.
    Log,
    /// One saved record.
    LogDetail(LoggedRecord),
    Settings,
}

impl Screen {
    /// Screen reached by navigating back.
    pub fn back(&self) -> Screen {
        match self {
            Screen::Home | Screen::Log | Screen::Settings => Screen::Home,
            Screen::LogDetail(_) => Screen::Log,
        }
    }

    /// Display title.
    pub fn title(&self) -> String {
        match self {
            Screen::Home => "Geo Snapshot".to_string(),
            Screen::Log => "Saved Records".to_string(),
            Screen::LogDetail(record) => format!("Record #{}: {}", record.id, record.name),
            Screen::Settings => "Settings".to_string(),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Home
    }
}
