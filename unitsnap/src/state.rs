//! Application state: theme, open converter and history
//!
//! State lives in one owned value and is written through a [`Storage`]
//! after every change that should survive a restart.

use crate::convert::{Conversion, ConversionRequest};
use crate::history::{History, HistoryEntry};
use crate::storage::{Storage, StorageError, HISTORY_KEY, THEME_KEY};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use unitsnap_core::SnapError;
use unitsnap_units::{ConverterDescriptor, CATALOG};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(SnapError::parse_error(format!("unknown theme '{}'", other))
                .with_suggestion("Use \"light\" or \"dark\"")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a front end remembers between interactions
#[derive(Debug)]
pub struct AppState<S: Storage> {
    storage: S,
    theme: Theme,
    current: Option<&'static ConverterDescriptor>,
    history: History,
}

impl<S: Storage> AppState<S> {
    /// Restore theme and history. Unreadable or corrupt values fall back
    /// to the defaults.
    pub fn load(storage: S) -> Self {
        let theme = match storage.load(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: SnapError| {
                warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "cannot read stored theme");
                Theme::default()
            }
        };

        let history = match storage.load(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => History::from_entries(entries),
                Err(e) => {
                    warn!(error = %e, "discarding corrupt history");
                    History::new()
                }
            },
            Ok(None) => History::new(),
            Err(e) => {
                warn!(error = %e, "cannot read stored history");
                History::new()
            }
        };

        debug!(theme = %theme, entries = history.len(), "loaded app state");
        Self { storage, theme, current: None, history }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.theme = theme;
        self.storage.save(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Converter currently open, if any
    pub fn current(&self) -> Option<&'static ConverterDescriptor> {
        self.current
    }

    pub fn open(&mut self, id: &str) -> Result<&'static ConverterDescriptor, SnapError> {
        let descriptor = CATALOG.get(id).ok_or_else(|| SnapError::not_found("converter", id))?;
        self.current = Some(descriptor);
        Ok(descriptor)
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Record a successful conversion. Only converters with a unit table
    /// are recorded; returns whether an entry was added.
    pub fn record(
        &mut self,
        descriptor: &ConverterDescriptor,
        request: &ConversionRequest,
        conversion: &Conversion,
    ) -> Result<bool, StorageError> {
        if descriptor.kind.units().is_none() || conversion.text.is_empty() {
            return Ok(false);
        }

        self.history.push(HistoryEntry::new(
            descriptor.short_title(),
            format!("{} {}", request.input.trim(), request.from),
            format!("{} {}", conversion.text, request.to),
            Local::now().time(),
        ));
        self.save_history()?;
        Ok(true)
    }

    pub fn clear_history(&mut self) -> Result<(), StorageError> {
        self.history.clear();
        self.save_history()
    }

    pub fn export_csv(&self) -> String {
        self.history.to_csv()
    }

    fn save_history(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.history)?;
        self.storage.save(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{run_conversion, ConvertParams};
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;
    use unitsnap_plugin::EvalContext;

    fn convert(state: &mut AppState<impl Storage>, id: &str, input: &str, from: &str, to: &str) -> bool {
        let descriptor = state.open(id).unwrap();
        let request = ConversionRequest::new(id, input, from, to);
        let conversion =
            run_conversion(descriptor, &request, &ConvertParams::default(), &EvalContext::default()).unwrap();
        state.record(descriptor, &request, &conversion).unwrap()
    }

    #[test]
    fn test_defaults() {
        let state = AppState::load(MemoryStorage::new());
        assert_eq!(state.theme(), Theme::Light);
        assert!(state.history().is_empty());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut state = AppState::load(MemoryStorage::new());
        assert_eq!(state.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(state.storage().load(THEME_KEY).unwrap().as_deref(), Some("dark"));

        let reloaded = AppState::load(state.storage().clone());
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_only_linear_conversions_are_recorded() {
        let mut state = AppState::load(MemoryStorage::new());
        assert!(convert(&mut state, "length", "10", "kilometer", "mile"));
        assert!(!convert(&mut state, "temperature", "0", "celsius", "fahrenheit"));
        assert!(convert(&mut state, "currency", "1", "usd", "inr"));

        let entries: Vec<_> = state.history().iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].converter, "Currency (Approx)");
        assert_eq!(entries[0].from, "1 usd");
        assert_eq!(entries[0].to, "83 inr");
        assert_eq!(entries[1].converter, "Length");
        assert_eq!(entries[1].to, "6.21371 mile");
    }

    #[test]
    fn test_history_survives_restart() {
        let temp = TempDir::new().unwrap();
        let mut state = AppState::load(FileStorage::new(temp.path()));
        convert(&mut state, "weight", "1", "kilogram", "gram");
        state.set_theme(Theme::Dark).unwrap();

        let reloaded = AppState::load(FileStorage::new(temp.path()));
        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert!(reloaded.export_csv().contains("\"1 kilogram\",\"1000 gram\""));
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let mut storage = MemoryStorage::new();
        storage.save(HISTORY_KEY, "{not json").unwrap();
        storage.save(THEME_KEY, "sepia").unwrap();

        let state = AppState::load(storage);
        assert!(state.history().is_empty());
        assert_eq!(state.theme(), Theme::Light);
    }

    #[test]
    fn test_clear_history() {
        let mut state = AppState::load(MemoryStorage::new());
        convert(&mut state, "time", "1", "hour", "minute");
        state.clear_history().unwrap();
        assert!(state.history().is_empty());
        assert_eq!(state.storage().load(HISTORY_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_open_unknown_converter() {
        let mut state = AppState::load(MemoryStorage::new());
        assert_eq!(state.open("warp").unwrap_err().code, "NOT_FOUND");
        state.open("area").unwrap();
        assert_eq!(state.current().unwrap().id, "area");
        state.close();
        assert!(state.current().is_none());
    }
}
