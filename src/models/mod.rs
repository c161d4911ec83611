pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};
pub use user::User;
