//! # formgate-cli — Command-Line Interface
//!
//! Provides the `formgate` binary.
//!
//! ## Subcommands
//!
//! - `formgate login` — Run the guest login form against the backend and
//!   print the routed action.
//! - `formgate check` — Validate a JSON/YAML document against a JSON Schema
//!   plus not-blank refinement rules.
//!
//! ```bash
//! formgate login --username alex --api-url http://localhost:8000
//! formgate check --schema login.schema.json --document login.yaml --not-blank username
//! ```
//!
//! Every subcommand returns 0 on success, 1 on a validation or submission
//! failure, and 2 on an operational error.

pub mod check;
pub mod console;
pub mod login;
