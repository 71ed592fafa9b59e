//! Command-line front end for rozklad.
//!
//! Shared by the `program-tv` and `rozklad-bus` binaries: argument parsing
//! and validation, logging setup, run dispatch and the report email.

pub mod args;
pub mod email;
pub mod logging;
pub mod run;

pub use args::{ArgsError, BusArgs, Mode, TvArgs};
pub use email::{EmailError, Mailer};
pub use run::{TvRun, run_bus, run_routes, run_tv};
