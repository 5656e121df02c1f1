mod args;
mod commands;
mod handlers;

pub use args::{Cli, Commands, SavedCommand, TemplatesCommand};
pub use commands::run;
