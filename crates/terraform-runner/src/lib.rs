//! # Terraform Runner
//!
//! Drives the Terraform executable as a subprocess for a single configuration
//! directory: locating the executable, running the `get`, `validate`, `apply`,
//! `refresh`, `destroy` and `output` verbs, writing the `tfvars.json`
//! variables file and parsing the outputs Terraform reports.

#![warn(missing_docs)]

pub mod error;
pub mod handle;
pub mod outputs;
pub mod terraformer;
pub mod variables;

pub use error::{Error, Result};
pub use handle::{EXECUTABLE_NAME, ToolHandle};
pub use outputs::{OutputRecord, Outputs, parse_outputs};
pub use terraformer::Terraformer;
pub use variables::{VARIABLES_FILE_NAME, VariableMap, VariableValue};
