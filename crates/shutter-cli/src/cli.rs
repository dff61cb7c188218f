//! Command-line interface definition.
//!
//! clap v4 derive surface. Both commands share the project-location flags;
//! the mode is implied by the command itself, never by an environment probe
//! at use sites.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Shutter - build pipeline for the camera front-end
#[derive(Parser, Debug)]
#[command(
    name = "shutter",
    version,
    about = "Bundles the camera app: components in, one script and stylesheet out",
    long_about = "Shutter bundles the camera front-end from src/main.js into a single\n\
                  IIFE script and an extracted stylesheet under public/. The dev command\n\
                  watches the project, rebuilds on change, and starts the app's own dev\n\
                  server after the first successful build."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Production build: minified bundle, no dev server, no live reload
    Build(BuildArgs),
    /// Development loop: watch, rebuild, live reload, app dev server
    Dev(DevArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to shutter.toml in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DevArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to shutter.toml in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip launching the app's dev server after the first build
    #[arg(long)]
    pub no_serve: bool,
}
