//! CLI Commands

pub mod check;
pub mod run;

pub use check::CheckCredentialsCommand;
pub use run::RunCommand;
