//! Backend implementations for different execution contexts
//!
//! Only local execution is provided. Other contexts can be added by
//! implementing the [`Launcher`](crate::launcher::Launcher) trait, which is
//! also how tests substitute a recording fake for a real process.

pub mod local;
pub use local::LocalLauncher;
