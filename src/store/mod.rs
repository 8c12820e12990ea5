//! Row-level persistence for the two entities. Stores own a handle to the shared
//! connection pool and are cheap to clone.

pub mod tasks;
pub mod users;

pub use tasks::TaskStore;
pub use users::UserStore;
