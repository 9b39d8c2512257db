//! docsmith: project documentation generator.
//!
//! Layers, innermost first:
//! - `domain`: export manifest, documentation tree, naming rules
//! - `application`: templates, rendering, document generation services
//! - `infrastructure`: filesystem and process boundaries, service wiring
//! - `cli`: argument parsing, command handlers, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
