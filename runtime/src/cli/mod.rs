//! CLI subcommand implementations for the ldsh-feed binary.

pub mod doctor;
pub mod output;
pub mod run_cmd;
