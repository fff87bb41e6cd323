//! Application state management for menucache.
//!
//! This module contains the core `App` struct that ties the pieces together:
//! config, API client, the menu store, the dialog state machine, and the
//! background-fetch channel. All state transitions happen on input callbacks
//! or when a completed fetch is drained from the channel; nothing here needs
//! locking.

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::cache::CacheManager;
use crate::config::Config;
use crate::controller::{apply, Action, ControllerState, Effect};
use crate::models::MenuItem;
use crate::store::MenuStore;

/// Buffer size for the background fetch channel.
/// Restores are one-shot; a handful of slots covers overlapping requests.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Overall application state outside the dialog state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    Quitting,
}

/// Result of a background menu fetch.
enum RefreshResult {
    Menu(Vec<MenuItem>),
    Error(String),
}

/// Main application state container
pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub store: MenuStore,

    // UI state
    pub state: AppState,
    pub controller: ControllerState,
    pub selection: usize,
    pub status_message: Option<String>,
    pub cache_age: Option<String>,

    // Background task channel
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        let cache = CacheManager::new(cache_dir)?;
        let api = ApiClient::new()?;
        let store = MenuStore::new(cache);

        Ok(Self::with_parts(config, api, store))
    }

    fn with_parts(config: Config, api: ApiClient, store: MenuStore) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            api,
            store,

            state: AppState::Normal,
            controller: ControllerState::Idle,
            selection: 0,
            status_message: None,
            cache_age: None,

            refresh_rx: rx,
            refresh_tx: tx,
        }
    }

    // =========================================================================
    // Data Loading
    // =========================================================================

    /// Initial load: use the cache slot when it is fresh and non-empty,
    /// otherwise fall back to a single background fetch.
    pub fn initial_load(&mut self) {
        if self.store.hydrate_from_cache() {
            self.cache_age = self.store.cache_age();
            info!(count = self.store.len(), "Menu loaded from cache");
        } else {
            info!("Menu cache empty or expired, fetching from API");
            self.restore_from_api();
        }
    }

    /// Fetch the canonical list in the background. When it lands the whole
    /// list is replaced, local edits included. A second restore while one is
    /// in flight is not cancelled; last write wins on the cache slot.
    pub fn restore_from_api(&mut self) {
        let api = self.api.clone();
        let url = self.config.menu_url();
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            let result = match api.fetch_menu(&url).await {
                Ok(items) => RefreshResult::Menu(items),
                Err(e) => {
                    error!(error = %e, url = %url, "Menu fetch failed");
                    RefreshResult::Error(e.to_string())
                }
            };
            if let Err(e) = tx.send(result).await {
                error!(error = %e, "Failed to send fetch result - channel closed");
            }
        });

        self.status_message = Some("Restoring menu from API...".to_string());
    }

    /// Drain completed background fetches without blocking.
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.refresh_rx.try_recv() {
            match result {
                RefreshResult::Menu(items) => {
                    let count = items.len();
                    self.store.replace_all(items);
                    self.cache_age = self.store.cache_age();
                    self.clamp_selection();
                    self.status_message = Some(format!("Menu restored ({} items)", count));
                    info!(count, "Menu restored from API");
                }
                RefreshResult::Error(message) => {
                    // The fetch failure is already logged; the list stays as-is
                    self.status_message = Some(format!("Restore failed: {}", message));
                }
            }
        }
    }

    // =========================================================================
    // Controller dispatch
    // =========================================================================

    /// Run a controller action through the reducer and apply the resulting
    /// store mutation.
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::replace(&mut self.controller, ControllerState::Idle);
        let (next, effect) = apply(state, action, self.store.items());
        self.controller = next;

        match effect {
            Effect::None => {}
            Effect::Append(item) => {
                self.status_message = Some(format!("Added \"{}\"", item.name));
                self.store.append(item);
                // Newest-first ordering puts the new item at the top
                self.selection = 0;
                self.cache_age = self.store.cache_age();
            }
            Effect::Update { id, item } => {
                self.store.update_by_id(id, item);
                self.cache_age = self.store.cache_age();
                self.status_message = Some("Item updated".to_string());
            }
            Effect::Remove { id } => {
                self.store.remove_by_id(id);
                self.clamp_selection();
                self.cache_age = self.store.cache_age();
                self.status_message = Some("Item deleted".to_string());
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.store.items().get(self.selection)
    }

    pub fn select_next(&mut self) {
        if self.selection + 1 < self.store.len() {
            self.selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selection >= self.store.len() {
            self.selection = self.store.len().saturating_sub(1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::MenuChoice;

    fn test_app(dir: &std::path::Path) -> App {
        let cache = CacheManager::new(dir.to_path_buf()).unwrap();
        let store = MenuStore::new(cache);
        App::with_parts(Config::default(), ApiClient::new().unwrap(), store)
    }

    fn add_item(app: &mut App, name: &str, price: &str) {
        app.dispatch(Action::OpenAddDialog);
        for c in name.chars() {
            app.dispatch(Action::Input(c));
        }
        app.dispatch(Action::NextField);
        app.dispatch(Action::NextField);
        for c in price.chars() {
            app.dispatch(Action::Input(c));
        }
        app.dispatch(Action::Confirm);
    }

    #[test]
    fn test_add_flow_appends_and_selects_newest() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        add_item(&mut app, "Burger", "150");
        add_item(&mut app, "Fries", "80");

        assert_eq!(app.store.len(), 2);
        assert_eq!(app.selection, 0);
        // Newest first
        assert_eq!(app.selected_item().unwrap().name, "Fries");
        assert_eq!(app.selected_item().unwrap().price, 80.0);
        assert_eq!(app.controller, ControllerState::Idle);
    }

    #[test]
    fn test_delete_flow_clamps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        add_item(&mut app, "Burger", "150");
        add_item(&mut app, "Fries", "80");

        app.selection = 1;
        let id = app.selected_item().unwrap().id;
        app.dispatch(Action::OpenItemMenu { id });
        app.dispatch(Action::MoveChoice);
        assert!(matches!(
            app.controller,
            ControllerState::ItemMenuOpen {
                choice: MenuChoice::Delete,
                ..
            }
        ));
        app.dispatch(Action::Confirm);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selection, 0);
        assert_eq!(app.selected_item().unwrap().name, "Fries");
    }

    #[test]
    fn test_edit_flow_keeps_length() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        add_item(&mut app, "Burger", "150");

        let id = app.selected_item().unwrap().id;
        app.dispatch(Action::OpenItemMenu { id });
        app.dispatch(Action::ChooseEdit);
        app.dispatch(Action::Input('s'));
        app.dispatch(Action::Confirm);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selected_item().unwrap().name, "Burgers");
        assert_eq!(app.selected_item().unwrap().id, id);
    }
}
