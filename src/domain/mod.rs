pub mod filter;
pub mod task;
pub mod user;

pub use filter::{filter_tasks, partition_completed, Filter};
pub use task::{is_outdoor_title, Priority, Task, Weather};
pub use user::User;
