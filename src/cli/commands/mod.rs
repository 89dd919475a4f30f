//! CLI subcommands

pub mod baseline;
pub mod evaluate;
pub mod matrix;
pub mod run;
pub mod steady_state;
