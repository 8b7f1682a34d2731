use crate::persistence::{load_or_default, save_snapshot, StateStore, THEME_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub dark_mode: bool,
}

/// Dark-mode flag with a single toggle operation
pub struct ThemeStore {
    state: ThemeState,
    store: Arc<dyn StateStore>,
}

impl ThemeStore {
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let state = load_or_default(store.as_ref(), THEME_KEY);
        Self { state, store }
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    pub fn toggle_dark_mode(&mut self) {
        self.state.dark_mode = !self.state.dark_mode;
        save_snapshot(self.store.as_ref(), THEME_KEY, &self.state);
    }
}
