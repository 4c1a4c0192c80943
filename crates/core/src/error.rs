//! Document error model.

use thiserror::Error;

/// Result type used across record normalization and rendering.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Which image asset a failure refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Logo,
    Watermark,
}

impl core::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AssetKind::Logo => f.write_str("logo"),
            AssetKind::Watermark => f.write_str("watermark"),
        }
    }
}

/// Failure while turning a source record into a printable document.
///
/// Only `AssetLoadFailure` is recoverable: renderers record it and keep going.
/// Everything else aborts the render and reaches the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The record lacks a field every document needs (customer/employee name, id).
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// The payload could not be interpreted (malformed shape, bad amounts).
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A payslip was requested for a salary record the employee may not see yet.
    #[error("salary record for employee {0} is not published")]
    NotPublished(String),

    /// An image asset could not be loaded or decoded.
    #[error("{asset} asset unavailable: {reason}")]
    AssetLoadFailure { asset: AssetKind, reason: String },

    /// The output backend failed while building the document.
    #[error("document generation failed: {0}")]
    GenerationFailure(String),

    /// The record could not be fetched from its source.
    #[error("record source failed: {0}")]
    Source(String),
}

impl DocumentError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    pub fn asset(asset: AssetKind, reason: impl Into<String>) -> Self {
        Self::AssetLoadFailure {
            asset,
            reason: reason.into(),
        }
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::GenerationFailure(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Whether a render may continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AssetLoadFailure { .. })
    }
}
