pub mod models;
pub mod session;
pub mod tasks;

pub use models::{
    filter_by_priority, format_timestamp, NewTask, NewUser, Priority, Task, UnknownPriority, User,
};
pub use session::SessionStore;
pub use tasks::TaskStore;
