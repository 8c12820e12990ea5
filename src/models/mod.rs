pub mod task;
pub mod user;

pub use task::{Task, TaskFields, TaskInput};
pub use user::{User, UserProfile};
