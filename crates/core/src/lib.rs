//! `revline-core` — shared primitives for the RevLine print documents.
//!
//! Pure values and the error model; no IO.

pub mod error;
pub mod money;
pub mod month;

pub use error::{AssetKind, DocumentError, DocumentResult};
pub use money::Money;
pub use month::YearMonth;
