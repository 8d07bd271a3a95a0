use chrono::{DateTime, Local};

/// State of a watched listing, passed explicitly from tick to tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub last_refresh: Option<DateTime<Local>>,
    pub refreshes: u32,
}

impl ViewState {
    /// The snapshot was fetched from the store (not served from cache).
    pub fn on_refreshed(self, at: DateTime<Local>) -> Self {
        Self {
            last_refresh: Some(at),
            refreshes: self.refreshes + 1,
        }
    }

    /// `HH:MM:SS` of the last refresh, or `never`.
    pub fn last_refresh_label(&self) -> String {
        self.last_refresh
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
    }
}
