//! Expense-sharing domain objects.
//!
//! Plain value types mirroring what the persistence collaborator stores:
//! categories, groups, expenses, and per-user shares. This crate owns the
//! share invariants and the snapshots the settlement engine consumes;
//! storage and HTTP stay outside.

pub mod expense;

pub use expense::{group_balances, normalize_expense, Category, Expense, ExpenseShare, Group};
