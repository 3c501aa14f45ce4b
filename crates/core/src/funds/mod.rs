//! Budget-ceiling and available-funds accounting.
//!
//! The rules that decide whether a project can absorb another expense or
//! payment. All checks are pure functions over `Decimal` sums; the db
//! crate runs them against aggregates read inside a transaction.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod props;

pub use error::FundsError;
pub use service::FundsService;
pub use types::ProjectFunds;
