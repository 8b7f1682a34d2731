pub mod auth;
pub mod tasks;
pub mod theme;

pub use auth::{AuthState, AuthStore};
pub use tasks::{TaskStore, TasksState};
pub use theme::{ThemeState, ThemeStore};
