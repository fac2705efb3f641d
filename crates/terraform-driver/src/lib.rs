//! Terraform machine driver
//!
//! Creates a machine by applying a Terraform configuration, reads the
//! machine's address back from Terraform's outputs and destroys it again on
//! removal. Terraform itself is driven through [`terraform_runner`].

pub mod driver;
pub mod logging;
pub mod report;

pub use driver::Driver;
