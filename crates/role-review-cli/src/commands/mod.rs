//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_roles;
pub mod output;
