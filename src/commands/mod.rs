//! # CLI Command Implementations
//!
//! The tool has a single command, `generate`, which is what runs when the
//! binary is invoked with the two edition roots.
//!
//! ## Structure
//!
//! A command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `tb_rest_merge` library to perform the core logic.

pub mod generate;
