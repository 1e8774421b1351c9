//! Core library for the taskdeck client
//!
//! This crate contains the client-side core, including:
//! - Task and session models with local validation
//! - The `TaskApi` seam and its HTTP implementation
//! - `ClientTaskStore`, the state the presentation layer renders from

pub mod api;
pub mod error;
pub mod session;
pub mod store;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
