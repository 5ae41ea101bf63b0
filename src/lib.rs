//! Smart-home energy management decision engine.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
