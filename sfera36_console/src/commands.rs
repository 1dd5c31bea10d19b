use std::sync::atomic::Ordering;

use log::debug;
use sfera36_lib::{execute, AddressableIO, MemoryError, RunOutcome, REGISTERS_COUNT};

use crate::{AppResult, Console, ConsoleOutput, LastAccess};

pub trait Command {
    fn execute(&self, console: &mut Console) -> AppResult<ConsoleOutput>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Continue,
    Memory(MemoryCommand),
    Quit,
    Register(RegisterCommand),
    Run(RunCommand),
    Status(StatusCommand),
}

impl Command for CliCommand {
    fn execute(&self, console: &mut Console) -> AppResult<ConsoleOutput> {
        match self {
            Self::Continue => continue_last_access(console),
            Self::Memory(command) => command.execute(console),
            Self::Quit => Ok(ConsoleOutput::Quit),
            Self::Register(command) => command.execute(console),
            Self::Run(command) => command.execute(console),
            Self::Status(command) => command.execute(console),
        }
    }
}

/*
 * An empty line reads the location that follows the last one read or
 * written: the next register, or the next byte after an odd address and
 * the next word after an even one.
 */
fn continue_last_access(console: &mut Console) -> AppResult<ConsoleOutput> {
    match console.last_access {
        LastAccess::None => Ok(ConsoleOutput::Lines(Vec::new())),
        LastAccess::Register(register) => {
            RegisterCommand::Read((register + 1) % REGISTERS_COUNT).execute(console)
        }
        LastAccess::Memory(address) => {
            let step = if address & 1 == 1 { 1 } else { 2 };
            MemoryCommand::Read(address.wrapping_add(step)).execute(console)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterCommand {
    Read(usize),
    Write { register: usize, value: u16 },
}

impl Command for RegisterCommand {
    fn execute(&self, console: &mut Console) -> AppResult<ConsoleOutput> {
        let line = match *self {
            Self::Read(register) => {
                console.last_access = LastAccess::Register(register);
                format!(
                    "R{}/ {:06o}",
                    register,
                    console.registers.get_register(register)
                )
            }
            Self::Write { register, value } => {
                let old = console.registers.get_register(register);
                console.registers.set_register(register, value);
                console.last_access = LastAccess::Register(register);
                format!("R{}/{:06o} {:06o}", register, old, value)
            }
        };

        Ok(ConsoleOutput::Lines(vec![line]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryCommand {
    Read(u16),
    Write { address: u16, value: u16 },
}

impl Command for MemoryCommand {
    fn execute(&self, console: &mut Console) -> AppResult<ConsoleOutput> {
        let memory = &mut console.memory;
        let line = match *self {
            Self::Read(address) if address & 1 == 1 => {
                format!("{:06o}/ {:03o}", address, memory.read_byte(address)?)
            }
            Self::Read(address) => {
                format!("{:06o}/ {:06o}", address, memory.read_word(address)?)
            }
            Self::Write { address, value } => {
                memory.validate_address(address)?;
                let word_address = address & !1;
                let old = memory.read_word(word_address)?;

                if value == 0 {
                    memory.write_word(word_address, 0)?;
                } else if address & 1 == 1 {
                    memory.write_byte(address, value as u8)?;
                } else {
                    memory.write_word(address, value)?;
                }

                format!(
                    "{:06o}/{:06o} {:06o}",
                    address,
                    old,
                    memory.read_word(word_address)?
                )
            }
        };
        let address = match *self {
            Self::Read(address) | Self::Write { address, .. } => address,
        };
        console.last_access = LastAccess::Memory(address);

        Ok(ConsoleOutput::Lines(vec![line]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCommand {
    Read,
    Write(u8),
}

impl Command for StatusCommand {
    fn execute(&self, console: &mut Console) -> AppResult<ConsoleOutput> {
        let old = console.registers.get_status_register();
        let line = match *self {
            Self::Read => format!("RS/ {:03o}", old),
            Self::Write(value) => {
                console.registers.set_status_register(value);
                format!("RS/{:03o} {:03o}", old, value)
            }
        };

        Ok(ConsoleOutput::Lines(vec![line]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCommand {
    pub start_address: u16,
}

impl Command for RunCommand {
    fn execute(&self, console: &mut Console) -> AppResult<ConsoleOutput> {
        console.memory.validate_address(self.start_address)?;
        console.registers.set_program_counter(self.start_address);
        console.last_access = LastAccess::None;
        console.interrupted.store(false, Ordering::SeqCst);

        let step_limit = console.configuration.step_limit;
        let report = execute(
            &mut console.registers,
            &mut console.memory,
            step_limit,
            &console.interrupted,
        )
        .map_err(|error| match error.bus_fault() {
            Some(address) => anyhow::Error::new(MemoryError::BusFault(address)),
            None => anyhow::Error::new(error),
        })?;
        debug!(
            "run from {:06o}: {:?} after {} steps",
            self.start_address, report.outcome, report.steps
        );

        let mut lines = Vec::new();
        if console.configuration.trace {
            lines.extend(report.loglines.iter().map(|log_line| log_line.to_string()));
        }
        lines.extend(report.faults.iter().map(|fault| fault.to_string()));
        match report.outcome {
            RunOutcome::Halted => {}
            RunOutcome::StepLimitReached => lines.push(format!(
                "ERROR: step limit of {} instructions reached",
                step_limit
            )),
            RunOutcome::Interrupted => lines.push("execution interrupted".to_owned()),
        }
        lines.push(format!(
            "{:06o}G {:06o}",
            self.start_address,
            console.registers.program_counter()
        ));

        Ok(ConsoleOutput::Lines(lines))
    }
}
