pub mod args;
pub mod commands;
pub mod render;

pub use args::{Cli, Commands};
pub use commands::run;
