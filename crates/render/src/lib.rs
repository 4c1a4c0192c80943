//! `revline-render` — printable documents for the RevLine shop.
//!
//! Records from `revline-records` are laid out as a [`Document`] (pages of
//! draw instructions in top-left millimetres), then encoded by a
//! [`DocumentBackend`] into an [`Artifact`] the caller can save or serve.

pub mod artifact;
pub mod assets;
pub mod backend;
pub mod builder;
pub mod config;
pub mod document;
pub mod layout;
pub mod metrics;
pub mod renderer;
pub mod table;

pub use artifact::Artifact;
pub use assets::AssetStore;
pub use backend::{DocumentBackend, PdfBackend, Rendered, TranscriptBackend};
pub use config::{ConfigError, InvoiceVariant, RenderConfig, ZeroQuantityDisplay};
pub use document::{Document, DrawOp, Page, PageSize};
pub use renderer::Renderer;
