use std::{
    io::{BufRead, Lines},
    sync::mpsc::Sender,
};

use anyhow::anyhow;
use log::debug;

use crate::{format_error, AppResult, Console, ConsoleOutput};

/// Script line standing for the empty line that continues the last access.
pub const CONTINUATION_LINE: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputToken {
    Command(String),
    Lines(Vec<String>),
    Failure(String),
    Quit,
}

/// Yields the script lines worth sending to the console: comment lines
/// starting with `#` and blank lines are skipped.
#[derive(Debug)]
struct CommandIterator<B>
where
    B: BufRead,
{
    iterator: Lines<B>,
}

impl<B> CommandIterator<B>
where
    B: BufRead,
{
    pub fn new(iterator: Lines<B>) -> Self {
        Self { iterator }
    }
}

impl<B> Iterator for CommandIterator<B>
where
    B: BufRead,
{
    type Item = AppResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.iterator.next()? {
                Err(e) => return Some(Err(anyhow!(e))),
                Ok(line) => {
                    let line = line.trim();

                    if !line.is_empty() && !line.starts_with('#') {
                        return Some(Ok(line.to_owned()));
                    }
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct ExecutorConfiguration {
    pub stop_on_failure: bool,
}

impl Default for ExecutorConfiguration {
    fn default() -> Self {
        Self {
            stop_on_failure: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Executor {
    configuration: ExecutorConfiguration,
}

impl Executor {
    pub fn new(configuration: ExecutorConfiguration) -> Self {
        Self { configuration }
    }

    /*
     * run
     * Feed every line of the buffer to the console, sending each command and
     * its outcome down the channel. A failing command stops the script unless
     * the executor is told to go on.
     */
    pub fn run<T: BufRead>(
        self,
        console: &mut Console,
        buffer: T,
        sender: Sender<OutputToken>,
    ) -> AppResult<()> {
        for line in CommandIterator::new(buffer.lines()) {
            let line = line?;
            debug!("script line '{}'", line);
            sender.send(OutputToken::Command(line.clone()))?;

            let input = if line == CONTINUATION_LINE { "" } else { line.as_str() };

            match console.execute(input) {
                Ok(ConsoleOutput::Lines(lines)) => sender.send(OutputToken::Lines(lines))?,
                Ok(ConsoleOutput::Quit) => {
                    sender.send(OutputToken::Quit)?;
                    break;
                }
                Err(e) => {
                    sender.send(OutputToken::Failure(format_error(&e)))?;

                    if self.configuration.stop_on_failure {
                        return Err(e.context(format!("script stopped at '{line}'")));
                    }
                }
            }
        }

        Ok(())
    }
}
