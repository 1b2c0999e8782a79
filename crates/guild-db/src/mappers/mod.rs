//! Entity <-> model mappers
//!
//! Text columns holding enum values are parsed here; a value the domain does
//! not know surfaces as a `DatabaseError` instead of a panic.

mod activity;
mod audit_log;
mod build;
mod catalog;
mod user;

use guild_core::DomainError;

fn corrupt_column(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("invalid value in column {column}: {err}"))
}
