use crate::domain::{filter_tasks, is_outdoor_title, Filter, Priority, Task, Weather};
use crate::persistence::{load_or_default, save_snapshot, StateStore, TASKS_KEY};
use crate::providers::WeatherProvider;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of the assemble step of an add; surfaced through the container's
/// `error` field, never thrown past it.
#[derive(Debug, Error)]
enum TaskAddError {
    #[error("Failed to add task: title is empty")]
    EmptyTitle,
}

/// Tasks container state. `tasks` and `filter` persist; `loading` and
/// `error` only track the in-flight add.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasksState {
    pub tasks: Vec<Task>,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
    pub filter: Filter,
}

/// Holds the task collection and the active filter. Every mutation writes a
/// fresh snapshot to the store. Weather enrichment on add is best-effort: a
/// provider failure never fails the add.
pub struct TaskStore {
    state: TasksState,
    store: Arc<dyn StateStore>,
    weather: Arc<dyn WeatherProvider>,
    city: String,
}

impl TaskStore {
    /// Rehydrate the container from the persisted snapshot, falling back to
    /// an empty collection with the `all` filter.
    pub fn load(
        store: Arc<dyn StateStore>,
        weather: Arc<dyn WeatherProvider>,
        city: impl Into<String>,
    ) -> Self {
        let state = load_or_default(store.as_ref(), TASKS_KEY);
        Self {
            state,
            store,
            weather,
            city: city.into(),
        }
    }

    pub fn state(&self) -> &TasksState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn filter(&self) -> Filter {
        self.state.filter
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Tasks visible under the active filter at the given reference time
    pub fn visible(&self, now: DateTime<Local>) -> Vec<&Task> {
        filter_tasks(&self.state.tasks, self.state.filter, now)
    }

    /// Add a task, attaching a weather snapshot when the title looks
    /// outdoor-related. Returns the appended task, or `None` when the add
    /// was rejected (the reason lands in `error`).
    pub async fn add_task(
        &mut self,
        title: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Option<&Task> {
        self.state.loading = true;
        self.state.error = None;

        match self.assemble(title, priority, due_date).await {
            Ok(task) => {
                debug!(id = %task.id, "task added");
                self.state.loading = false;
                self.state.tasks.push(task);
                self.persist();
                self.state.tasks.last()
            }
            Err(e) => {
                self.state.loading = false;
                self.state.error = Some(e.to_string());
                None
            }
        }
    }

    async fn assemble(
        &self,
        title: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<Task, TaskAddError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskAddError::EmptyTitle);
        }

        let weather = if is_outdoor_title(title) {
            self.fetch_weather().await
        } else {
            None
        };

        let mut task = Task::new(self.mint_id(), title.to_string(), priority, due_date);
        task.weather = weather;
        Ok(task)
    }

    /// Best-effort enrichment: a lookup failure is logged and treated as
    /// "no weather data"
    async fn fetch_weather(&self) -> Option<Weather> {
        match self.weather.current_weather(&self.city).await {
            Ok(weather) => Some(weather),
            Err(e) => {
                warn!(city = %self.city, error = %e, "weather lookup failed");
                None
            }
        }
    }

    /// Millisecond-timestamp id, bumped until unique within the collection
    fn mint_id(&self) -> String {
        let mut candidate = Local::now().timestamp_millis();
        while self
            .state
            .tasks
            .iter()
            .any(|t| t.id == candidate.to_string())
        {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Flip `completed` on the matching task; unknown ids are a no-op
    pub fn toggle_task(&mut self, id: &str) {
        if let Some(task) = self.state.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            self.persist();
        }
    }

    /// Remove the matching task; unknown ids are a no-op
    pub fn delete_task(&mut self, id: &str) {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.id != id);
        if self.state.tasks.len() != before {
            self.persist();
        }
    }

    /// Flip `is_important` on the matching task; unknown ids are a no-op
    pub fn toggle_important(&mut self, id: &str) {
        if let Some(task) = self.state.tasks.iter_mut().find(|t| t.id == id) {
            task.is_important = !task.is_important;
            self.persist();
        }
    }

    /// Replace the active filter
    pub fn set_filter(&mut self, filter: Filter) {
        self.state.filter = filter;
        self.persist();
    }

    fn persist(&self) {
        save_snapshot(self.store.as_ref(), TASKS_KEY, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::providers::WeatherError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    /// Provider returning a fixed reading
    struct FixedWeather;

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current_weather(&self, _city: &str) -> Result<Weather, WeatherError> {
            Ok(Weather {
                temp: 18.0,
                condition: "Sunny".to_string(),
            })
        }
    }

    /// Provider that always fails
    struct BrokenWeather;

    #[async_trait]
    impl WeatherProvider for BrokenWeather {
        async fn current_weather(&self, _city: &str) -> Result<Weather, WeatherError> {
            Err(WeatherError::Unavailable("connection refused".to_string()))
        }
    }

    fn store_with(provider: Arc<dyn WeatherProvider>) -> (Arc<MemoryStore>, TaskStore) {
        let store = Arc::new(MemoryStore::new());
        let tasks = TaskStore::load(store.clone(), provider, "London");
        (store, tasks)
    }

    #[tokio::test]
    async fn test_add_task_plain_title_gets_no_weather() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        let task = tasks.add_task("Write report", Priority::Medium, None).await.unwrap();
        assert!(task.weather.is_none());
        assert!(!task.completed);
        assert!(!task.is_important);
    }

    #[tokio::test]
    async fn test_add_task_outdoor_title_gets_weather() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        let task = tasks.add_task("Walk the dog", Priority::Medium, None).await.unwrap();
        let weather = task.weather.as_ref().unwrap();
        assert_eq!(weather.temp, 18.0);
        assert_eq!(weather.condition, "Sunny");
    }

    #[tokio::test]
    async fn test_weather_failure_does_not_fail_add() {
        let (_store, mut tasks) = store_with(Arc::new(BrokenWeather));
        let task = tasks.add_task("WALK to the park", Priority::Medium, None).await.unwrap();
        assert!(task.weather.is_none());
        assert!(tasks.error().is_none());
        assert_eq!(tasks.tasks().len(), 1);
    }

    #[tokio::test]
    async fn test_add_task_trims_title() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        let task = tasks.add_task("  Buy milk  ", Priority::Low, None).await.unwrap();
        assert_eq!(task.title, "Buy milk");
    }

    #[tokio::test]
    async fn test_add_task_empty_title_rejected() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        let result = tasks.add_task("   ", Priority::Medium, None).await;
        assert!(result.is_none());
        assert!(tasks.error().is_some());
        assert!(tasks.tasks().is_empty());
        assert!(!tasks.state().loading);
    }

    #[tokio::test]
    async fn test_add_task_ids_are_unique() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        tasks.add_task("one", Priority::Medium, None).await;
        tasks.add_task("two", Priority::Medium, None).await;
        tasks.add_task("three", Priority::Medium, None).await;

        let mut ids: Vec<_> = tasks.tasks().iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_toggle_task_twice_is_idempotent_pair() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        let id = tasks.add_task("task", Priority::Medium, None).await.unwrap().id.clone();

        tasks.toggle_task(&id);
        assert!(tasks.tasks()[0].completed);
        tasks.toggle_task(&id);
        assert!(!tasks.tasks()[0].completed);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_noop() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        tasks.add_task("task", Priority::Medium, None).await;

        tasks.toggle_task("nope");
        assert!(!tasks.tasks()[0].completed);
        assert!(tasks.error().is_none());
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        let id = tasks.add_task("doomed", Priority::Medium, None).await.unwrap().id.clone();

        tasks.delete_task(&id);
        assert!(tasks.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_leaves_collection_unchanged() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        tasks.add_task("survivor", Priority::Medium, None).await;

        tasks.delete_task("nope");
        assert_eq!(tasks.tasks().len(), 1);
        assert!(tasks.error().is_none());
    }

    #[tokio::test]
    async fn test_toggle_important() {
        let (_store, mut tasks) = store_with(Arc::new(FixedWeather));
        let id = tasks.add_task("task", Priority::Medium, None).await.unwrap().id.clone();

        tasks.toggle_important(&id);
        assert!(tasks.tasks()[0].is_important);
        // Importance flips independently of completion
        assert!(!tasks.tasks()[0].completed);
    }

    #[tokio::test]
    async fn test_mutations_survive_reload() {
        let (store, mut tasks) = store_with(Arc::new(FixedWeather));
        let id = tasks.add_task("persisted", Priority::High, None).await.unwrap().id.clone();
        tasks.toggle_task(&id);
        tasks.set_filter(Filter::Important);

        let reloaded = TaskStore::load(store, Arc::new(FixedWeather), "London");
        assert_eq!(reloaded.tasks().len(), 1);
        assert!(reloaded.tasks()[0].completed);
        assert_eq!(reloaded.tasks()[0].priority, Priority::High);
        assert_eq!(reloaded.filter(), Filter::Important);
    }

    #[test]
    fn test_tasks_state_round_trip() {
        let mut state = TasksState::default();
        state.tasks.push(Task::new(
            "1700000000000".to_string(),
            "No extras".to_string(),
            Priority::Medium,
            None,
        ));
        state.filter = Filter::Planned;

        let json = serde_json::to_string(&state).unwrap();
        let restored: TasksState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
