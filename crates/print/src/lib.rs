//! `revline-print` — command-line front end for the RevLine document renderer.

pub mod cli;
pub mod http;

pub use cli::{Cli, Command, SourceSpec, run};
pub use http::HttpSource;
