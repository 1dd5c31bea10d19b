mod commands;
mod config;
mod console;
mod displayer;
mod executor;
mod pest_parser;

pub use commands::*;
pub use config::Configuration;
pub use console::{format_error, Console, ConsoleOutput, LastAccess};
pub use displayer::{CliDisplayer, Displayer};
pub use executor::{Executor, ExecutorConfiguration, OutputToken, CONTINUATION_LINE};
pub use pest_parser::{parse_octal, CliCommandParser};

pub type AppResult<T> = anyhow::Result<T>;
