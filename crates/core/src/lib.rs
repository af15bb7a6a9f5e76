//! `splitledger-core` — shared domain primitives.
//!
//! Strongly-typed identifiers and the domain error model. No IO, no
//! framework concerns.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ExpenseId, GroupId, UserId};
