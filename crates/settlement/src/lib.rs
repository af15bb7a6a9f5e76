//! Debt settlement (balance netting + minimal transfer sweep).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Money is
//! exact fixed-point (`rust_decimal`); binary floats never appear.

pub mod balance;
pub mod engine;

pub use balance::{LedgerEntry, NetBalances};
pub use engine::{position_for, settle, Transfer};
