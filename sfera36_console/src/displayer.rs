use std::{io::Write, sync::mpsc::Receiver};

use crate::{AppResult, OutputToken};

pub trait Displayer {
    fn display(&mut self, receiver: Receiver<OutputToken>) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct CliDisplayer<T>
where
    T: Write,
{
    output: T,
    echo: bool,
}

impl<T> CliDisplayer<T>
where
    T: Write,
{
    pub fn new(output: T, echo: bool) -> Self {
        Self { output, echo }
    }

    pub fn into_inner(self) -> T {
        self.output
    }
}

impl<T> Displayer for CliDisplayer<T>
where
    T: Write,
{
    fn display(&mut self, receiver: Receiver<OutputToken>) -> AppResult<()> {
        while let Ok(token) = receiver.recv() {
            match token {
                OutputToken::Command(line) if self.echo => {
                    writeln!(self.output, "> {line}")?;
                }
                OutputToken::Lines(lines) => {
                    for line in lines {
                        writeln!(self.output, "{line}")?;
                    }
                }
                OutputToken::Failure(message) => {
                    writeln!(self.output, "{message}")?;
                }
                OutputToken::Quit => {
                    writeln!(self.output, "Quit!")?;
                }
                _ => (),
            }
        }
        self.output.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use super::*;

    fn display(echo: bool, tokens: Vec<OutputToken>) -> String {
        let (sender, receiver) = channel();
        for token in tokens {
            sender.send(token).unwrap();
        }
        drop(sender);

        let mut displayer = CliDisplayer::new(Vec::new(), echo);
        displayer.display(receiver).unwrap();

        String::from_utf8(displayer.into_inner()).unwrap()
    }

    #[test]
    fn test_echo() {
        let output = display(
            true,
            vec![
                OutputToken::Command("R3/".to_owned()),
                OutputToken::Lines(vec!["R3/ 000005".to_owned()]),
                OutputToken::Quit,
            ],
        );

        assert_eq!("> R3/\nR3/ 000005\nQuit!\n", output);
    }

    #[test]
    fn test_no_echo() {
        let output = display(
            false,
            vec![
                OutputToken::Command("160000/".to_owned()),
                OutputToken::Failure("BUS ERROR".to_owned()),
            ],
        );

        assert_eq!("BUS ERROR\n", output);
    }
}
