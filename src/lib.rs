//! helmtui - A Terminal User Interface (TUI) for helm
//!
//! This library drives the `helm` command line and the Artifact Hub catalog
//! from a tabbed terminal interface built with Ratatui: installed releases,
//! chart repositories, catalog search and plugins.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`catalog`] - Artifact Hub client
//! * [`config`] - Application configuration management
//! * [`helm`] - helm invocations, output parsing and the error taxonomy
//! * [`logger`] - In-memory and file logging
//! * [`ui`] - Terminal user interface components
//! * [`workspace`] - Working directory for values files

/// Artifact Hub catalog client
pub mod catalog;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// helm command model, runner and output parsing
pub mod helm;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Terminal user interface components and rendering
pub mod ui;

/// Working directory under the home directory
pub mod workspace;
