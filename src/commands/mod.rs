//! Command implementations behind the CLI

pub mod check;
pub mod clean;
pub mod init;
pub mod list;
pub mod manifest;
pub mod new;
