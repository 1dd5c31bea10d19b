use anyhow::{anyhow, Context};
use pest::{
    iterators::{Pair, Pairs},
    Parser,
};
use pest_derive::Parser;

use crate::{commands::*, AppResult};

#[derive(Parser)]
#[grammar = "../rules.pest"]
struct PestParser;

pub struct CliCommandParser;

impl CliCommandParser {
    pub fn from(line: &str) -> AppResult<CliCommand> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(CliCommand::Continue);
        }

        let pair = PestParser::parse(Rule::sentence, line)
            .with_context(|| format!("unknown command '{line}'"))?
            .next()
            .ok_or_else(|| anyhow!("unknown command '{line}'"))?;

        let command = match pair.as_rule() {
            Rule::register_read => {
                let register = parse_register(next_pair(&mut pair.into_inner())?)?;
                CliCommand::Register(RegisterCommand::Read(register))
            }
            Rule::register_write => {
                let mut pairs = pair.into_inner();
                let register = parse_register(next_pair(&mut pairs)?)?;
                let value = parse_octal(next_pair(&mut pairs)?.as_str())?;
                CliCommand::Register(RegisterCommand::Write { register, value })
            }
            Rule::status_read => CliCommand::Status(StatusCommand::Read),
            Rule::status_write => {
                let mut pairs = pair.into_inner();
                pairs.next();
                let value = parse_octal(next_pair(&mut pairs)?.as_str())?;
                CliCommand::Status(StatusCommand::Write(value as u8))
            }
            Rule::memory_read => {
                let address = parse_octal(next_pair(&mut pair.into_inner())?.as_str())?;
                CliCommand::Memory(MemoryCommand::Read(address))
            }
            Rule::memory_write => {
                let mut pairs = pair.into_inner();
                let address = parse_octal(next_pair(&mut pairs)?.as_str())?;
                let value = parse_octal(next_pair(&mut pairs)?.as_str())?;
                CliCommand::Memory(MemoryCommand::Write { address, value })
            }
            Rule::execute_at => {
                let start_address = parse_octal(next_pair(&mut pair.into_inner())?.as_str())?;
                CliCommand::Run(RunCommand { start_address })
            }
            Rule::quit => CliCommand::Quit,
            rule => return Err(anyhow!("unexpected rule {rule:?}, is the grammar up to date?")),
        };

        Ok(command)
    }
}

fn next_pair<'a>(pairs: &mut Pairs<'a, Rule>) -> AppResult<Pair<'a, Rule>> {
    pairs
        .next()
        .ok_or_else(|| anyhow!("missing argument, is the grammar up to date?"))
}

fn parse_register(pair: Pair<'_, Rule>) -> AppResult<usize> {
    Ok(parse_octal(&pair.as_str()[1..])? as usize)
}

/// Octal numerals wrap around 16 bits the way the machine registers do.
pub fn parse_octal(digits: &str) -> AppResult<u16> {
    if digits.trim().is_empty() {
        return Err(anyhow!("empty octal value"));
    }

    digits.chars().try_fold(0u16, |acc, c| {
        c.to_digit(8)
            .map(|digit| (acc << 3) | digit as u16)
            .ok_or_else(|| anyhow!("'{digits}' is not an octal value"))
    })
}
