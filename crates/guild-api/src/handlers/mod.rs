//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod ai;
pub mod auth;
pub mod builds;
pub mod catalog;
pub mod guild;
pub mod health;
pub mod users;
