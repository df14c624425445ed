//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Navigation types (Page, Screen, Focus, etc.)
//! - Form editing types (AuthMode, BookingField, SessionFilter, etc.)
//! - Pure filtering helpers for the mentor directory and session list
//! - State error handling

mod error;
pub mod filters;
mod form;
mod navigation;

#[allow(unused_imports)]
pub use error::StateError;
pub use form::{AuthField, AuthMode, BookingField, FeedbackField, SessionFilter};
pub use navigation::{Focus, Page, PendingFeedback, Screen};

// Re-export implementation from state_impl.rs
// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

// Re-export State
pub use state_impl::State;
