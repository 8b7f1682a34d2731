use crate::persistence::StateStore;
use crate::providers::{Authenticator, WeatherProvider, DEFAULT_CITY};
use crate::store::{AuthStore, TaskStore, ThemeStore};
use std::sync::Arc;

/// Application root: owns the three independent state containers.
///
/// The containers share a store but never read each other's state; tests
/// can build an `AppState` over an in-memory store and stub collaborators.
pub struct AppState {
    pub auth: AuthStore,
    pub tasks: TaskStore,
    pub theme: ThemeStore,
}

impl AppState {
    /// Rehydrate all containers from their persisted snapshots.
    pub fn load(
        store: Arc<dyn StateStore>,
        authenticator: Arc<dyn Authenticator>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            auth: AuthStore::load(store.clone(), authenticator),
            tasks: TaskStore::load(store.clone(), weather, DEFAULT_CITY),
            theme: ThemeStore::load(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::persistence::MemoryStore;
    use crate::providers::{LocalAuthenticator, WeatherError, WeatherProvider};
    use crate::domain::Weather;
    use async_trait::async_trait;

    struct NoWeather;

    #[async_trait]
    impl WeatherProvider for NoWeather {
        async fn current_weather(&self, _city: &str) -> Result<Weather, WeatherError> {
            Err(WeatherError::Unavailable("offline".to_string()))
        }
    }

    fn new_app(store: Arc<MemoryStore>) -> AppState {
        AppState::load(store, Arc::new(LocalAuthenticator), Arc::new(NoWeather))
    }

    #[tokio::test]
    async fn test_containers_are_independent() {
        let store = Arc::new(MemoryStore::new());
        let mut app = new_app(store.clone());

        // A failed login does not disturb tasks or theme
        app.auth.login("ada@example.com", "nope").await;
        app.tasks.add_task("unaffected", Priority::Medium, None).await;
        app.theme.toggle_dark_mode();

        assert!(!app.auth.is_authenticated());
        assert_eq!(app.tasks.tasks().len(), 1);
        assert!(app.theme.dark_mode());
    }

    #[tokio::test]
    async fn test_full_session_survives_reload() {
        let store = Arc::new(MemoryStore::new());
        let mut app = new_app(store.clone());

        app.auth.login("ada@example.com", "secret1").await;
        app.tasks.add_task("remember me", Priority::Medium, None).await;
        app.theme.toggle_dark_mode();

        let reloaded = new_app(store);
        assert!(reloaded.auth.is_authenticated());
        assert_eq!(reloaded.tasks.tasks()[0].title, "remember me");
        assert!(reloaded.theme.dark_mode());
    }
}
