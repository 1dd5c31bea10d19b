use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace, warn};

use super::cpu_instruction::microcode::Result as MicrocodeResult;
use super::cpu_instruction::{CPUInstruction, LogLine, MicrocodeError};
use super::memory::AddressableIO;
use super::registers::Registers;

pub const DEFAULT_STEP_LIMIT: usize = 2000;
/// How many log lines a run keeps, older ones are dropped.
pub const LOGLINE_MEMORY_LEN: usize = 35;

/*
 * execute_step
 * Fetch, decode and execute the instruction at PC. The PC then moves past
 * the instruction and its extra words unless the instruction loaded it.
 */
pub fn execute_step(
    registers: &mut Registers,
    memory: &mut dyn AddressableIO,
) -> MicrocodeResult<LogLine> {
    let address = registers.program_counter();
    let word = memory.read_word(address)?;
    let cpu_instruction = CPUInstruction::decode(address, word)?;
    let log_line = cpu_instruction.execute(memory, registers)?;

    if !log_line.jumped && registers.program_counter() == address {
        registers.set_program_counter(
            address
                .wrapping_add(2)
                .wrapping_add(2 * log_line.extra_words()),
        );
    }

    Ok(log_line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Halted,
    StepLimitReached,
    Interrupted,
}

/// An instruction that failed without stopping the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub address: u16,
    pub error: MicrocodeError,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}: ERROR: {}", self.address, self.error)
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub steps: usize,
    pub faults: Vec<Fault>,
    pub loglines: VecDeque<LogLine>,
}

impl RunReport {
    fn new() -> RunReport {
        RunReport {
            outcome: RunOutcome::Halted,
            steps: 0,
            faults: Vec::new(),
            loglines: VecDeque::with_capacity(LOGLINE_MEMORY_LEN),
        }
    }

    fn push_logline(&mut self, log_line: LogLine) {
        if self.loglines.len() == LOGLINE_MEMORY_LEN {
            self.loglines.pop_front();
        }
        self.loglines.push_back(log_line);
    }
}

/*
 * execute
 * Run from the current PC until the halt word, the step limit or an
 * interruption. Unknown words and invalid destinations are recorded and the
 * run goes on with the next word. A bus fault ends the run with an error.
 */
pub fn execute(
    registers: &mut Registers,
    memory: &mut dyn AddressableIO,
    step_limit: usize,
    interrupted: &AtomicBool,
) -> MicrocodeResult<RunReport> {
    let mut report = RunReport::new();
    debug!("run started at {:06o}", registers.program_counter());

    loop {
        if interrupted.load(Ordering::SeqCst) {
            warn!("run interrupted at {:06o}", registers.program_counter());
            report.outcome = RunOutcome::Interrupted;
            break;
        }
        if report.steps >= step_limit {
            warn!(
                "step limit of {} instructions reached at {:06o}",
                step_limit,
                registers.program_counter()
            );
            report.outcome = RunOutcome::StepLimitReached;
            break;
        }

        let address = registers.program_counter();
        report.steps += 1;

        match execute_step(registers, memory) {
            Ok(log_line) => {
                trace!("{}", log_line);
                let halted = log_line.is_halt();
                report.push_logline(log_line);

                if halted {
                    report.outcome = RunOutcome::Halted;
                    break;
                }
            }
            Err(error) => {
                if let Some(fault_address) = error.bus_fault() {
                    warn!(
                        "bus fault at {:06o} while executing {:06o}",
                        fault_address, address
                    );
                    return Err(error);
                }
                warn!("{:06o}: {}", address, error);
                report.faults.push(Fault { address, error });
                registers.set_program_counter(address.wrapping_add(2));
            }
        }
    }

    debug!(
        "run stopped at {:06o} after {} steps ({:?})",
        registers.program_counter(),
        report.steps,
        report.outcome
    );

    Ok(report)
}
