/// Database models for Cadence
///
/// This module contains all database models and their CRUD operations.
/// Every habit/todo query is scoped to the owning user; cross-user access
/// is indistinguishable from a missing record.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `habit`: Habits with completion history
/// - `todo`: Todos, including nested subtasks via parent_id

pub mod habit;
pub mod todo;
pub mod user;
