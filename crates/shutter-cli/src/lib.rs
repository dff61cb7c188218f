//! Shutter CLI - build pipeline for the camera front-end.
//!
//! The binary wires the configuration and pipeline crates to a small command
//! surface: `shutter build` runs one production pass, `shutter dev` runs the
//! development loop with file watching, live reload, and the app's own dev
//! server.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watcher;
