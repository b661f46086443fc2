//! Command handlers
//!
//! Each handler builds a serializable report first and prints it second, so
//! the reports can be checked without capturing stdout.

pub mod args;
pub mod ids;
pub mod launch;
pub mod status;

pub use args::{build_arguments, execute_args};
pub use ids::{execute_ids, IdGroup};
pub use launch::{execute_launch, launch_app, LaunchReport};
pub use status::{execute_status, read_status, StatusReport};
