/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `habits`: Habit CRUD, history toggling, and stats
/// - `todos`: Todo CRUD and the filtered/sorted tree view

pub mod auth;
pub mod habits;
pub mod health;
pub mod todos;
