pub mod calc_commands;
pub mod commands;

pub use calc_commands::CalcCommandHandler;
pub use commands::{Cli, Commands};
