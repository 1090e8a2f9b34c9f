//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Converts one audio file through the engine.
pub mod convert;

/// Reports whether the engine can be started.
pub mod check;

/// Prints the filter graph for a parameter set.
pub mod graph;
