//! Centralized handle to backend services.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::llm::GoogleProvider;
use crate::core::profiler::Profiler;
use crate::core::store::{CharacterStore, StoreError};

use super::events::{AppEvent, Notification, NotificationLevel};

/// Backend services, created once at startup and passed (by ref) to views.
///
/// The profiler is optional: when the API key is absent the app still
/// runs — trait generation and analysis surface the configuration error
/// instead of attempting a request.
pub struct Services {
    pub store: CharacterStore,
    profiler: Option<Arc<Profiler>>,
    llm_unavailable: Option<String>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize all services from config.
    ///
    /// A store failure is fatal — the app cannot run without its data
    /// directory. A missing LLM credential is not.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, StoreError> {
        let data_dir = config.data_dir();
        log::info!("Initializing services with data dir: {}", data_dir.display());

        let store = CharacterStore::open(&data_dir)?;

        let (profiler, llm_unavailable) =
            match GoogleProvider::from_env(&config.llm.api_key_env, config.llm.model.clone()) {
                Ok(provider) => {
                    log::info!("LLM provider ready (model {})", config.llm.model);
                    (Some(Arc::new(Profiler::new(Arc::new(provider)))), None)
                }
                Err(e) => {
                    log::warn!("LLM provider unavailable: {e}");
                    (None, Some(e.to_string()))
                }
            };

        Ok(Self {
            store,
            profiler,
            llm_unavailable,
            event_tx,
        })
    }

    /// The profiler, or the configuration error explaining its absence.
    pub fn profiler(&self) -> Result<Arc<Profiler>, String> {
        match &self.profiler {
            Some(profiler) => Ok(profiler.clone()),
            None => Err(self
                .llm_unavailable
                .clone()
                .unwrap_or_else(|| "LLM provider not configured".to_string())),
        }
    }

    pub fn llm_ready(&self) -> bool {
        self.profiler.is_some()
    }

    /// Push a notification through the event channel.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self
            .event_tx
            .send(AppEvent::Notification(Notification::new(message, level)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(dir.path().to_path_buf());
        // Point at a variable that cannot exist so init never finds a key
        config.llm.api_key_env = "TRAITCLOUD_TEST_NO_SUCH_VAR".to_string();
        config
    }

    #[test]
    fn test_init_without_api_key_still_runs() {
        let dir = TempDir::new().unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let services = Services::init(&test_config(&dir), tx).unwrap();

        assert!(!services.llm_ready());
        let err = services.profiler().err().unwrap();
        assert!(err.contains("TRAITCLOUD_TEST_NO_SUCH_VAR"));
    }

    #[test]
    fn test_notify_sends_event() {
        let dir = TempDir::new().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let services = Services::init(&test_config(&dir), tx).unwrap();

        services.notify("hello", NotificationLevel::Info);
        match rx.try_recv().unwrap() {
            AppEvent::Notification(n) => assert_eq!(n.message, "hello"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
