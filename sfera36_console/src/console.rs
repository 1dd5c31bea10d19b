use std::sync::{atomic::AtomicBool, Arc};

use log::debug;
use sfera36_lib::{Memory, MemoryError, Registers};

use crate::{AppResult, CliCommandParser, Command, Configuration};

/// Target of the last explicit read or write, replayed by an empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAccess {
    None,
    Memory(u16),
    Register(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutput {
    Lines(Vec<String>),
    Quit,
}

/*
 * Console
 * One operator session: the machine state plus the continuation cursor.
 * Each line is parsed and fully applied before the next one is accepted.
 */
#[derive(Debug)]
pub struct Console {
    pub(crate) registers: Registers,
    pub(crate) memory: Memory,
    pub(crate) last_access: LastAccess,
    pub(crate) configuration: Configuration,
    pub(crate) interrupted: Arc<AtomicBool>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl Console {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            registers: Registers::default(),
            memory: Memory::new(),
            last_access: LastAccess::None,
            configuration,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn execute(&mut self, line: &str) -> AppResult<ConsoleOutput> {
        let command = CliCommandParser::from(line)?;
        debug!("console command {:?}", command);

        command.execute(self)
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn last_access(&self) -> LastAccess {
        self.last_access
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Flag a running program checks once per instruction. Setting it ends
    /// the run.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }
}

pub fn format_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<MemoryError>() {
        Some(error) => error.to_string(),
        None => format!("ERROR: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use sfera36_lib::AddressableIO;

    use super::*;

    fn lines(output: ConsoleOutput) -> Vec<String> {
        match output {
            ConsoleOutput::Lines(lines) => lines,
            ConsoleOutput::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_register_write_and_read() {
        let mut console = Console::default();

        assert_eq!(vec!["R3/000000 000005"], lines(console.execute("R3/5").unwrap()));
        assert_eq!(vec!["R3/ 000005"], lines(console.execute("r3/").unwrap()));
        assert_eq!(LastAccess::Register(3), console.last_access());
    }

    #[test]
    fn test_memory_write_and_read() {
        let mut console = Console::default();

        assert_eq!(
            vec!["001000/000000 005003"],
            lines(console.execute("1000/5003").unwrap())
        );
        assert_eq!(vec!["001000/ 005003"], lines(console.execute("1000/").unwrap()));
        assert_eq!(vec!["001001/ 012"], lines(console.execute("1001/").unwrap()));
        assert_eq!(LastAccess::Memory(0o1001), console.last_access());
    }

    #[test]
    fn test_odd_address_write_sets_a_byte() {
        let mut console = Console::default();
        console.execute("2000/177777").unwrap();

        assert_eq!(
            vec!["002001/177777 000000"],
            lines(console.execute("2001/0").unwrap())
        );
        assert_eq!(0, console.memory().read_word(0o2000).unwrap());

        assert_eq!(
            vec!["002001/000000 005000"],
            lines(console.execute("2001/12").unwrap())
        );
        assert_eq!(0o12, console.memory().read_byte(0o2001).unwrap());
    }

    #[test]
    fn test_status_write_and_read() {
        let mut console = Console::default();

        assert_eq!(vec!["RS/000 017"], lines(console.execute("RS/17").unwrap()));
        assert_eq!(vec!["RS/ 017"], lines(console.execute("rs/").unwrap()));
        assert!(console.registers().c_flag_is_set());
        assert_eq!(LastAccess::None, console.last_access());
    }

    #[test]
    fn test_status_write_keeps_the_low_byte() {
        let mut console = Console::default();

        console.execute("RS/1017").unwrap();
        assert_eq!(0o17, console.registers().get_status_register());
    }

    #[test]
    fn test_continuation() {
        let mut console = Console::default();
        console.execute("1000/5003").unwrap();
        console.execute("1002/12").unwrap();

        console.execute("1000/").unwrap();
        assert_eq!(vec!["001002/ 000012"], lines(console.execute("").unwrap()));
        assert_eq!(vec!["001004/ 000000"], lines(console.execute("").unwrap()));

        console.execute("1001/").unwrap();
        assert_eq!(vec!["001002/ 000012"], lines(console.execute("").unwrap()));
    }

    #[test]
    fn test_register_continuation_wraps() {
        let mut console = Console::default();
        console.execute("R7/1000").unwrap();

        assert_eq!(vec!["R0/ 000000"], lines(console.execute("").unwrap()));
        assert_eq!(vec!["R1/ 000000"], lines(console.execute("").unwrap()));
    }

    #[test]
    fn test_continuation_without_access() {
        let mut console = Console::default();

        assert_eq!(ConsoleOutput::Lines(Vec::new()), console.execute("").unwrap());
    }

    #[test]
    fn test_quit() {
        let mut console = Console::default();

        assert_eq!(ConsoleOutput::Quit, console.execute("q").unwrap());
        assert_eq!(ConsoleOutput::Quit, console.execute("QUIT").unwrap());
    }

    #[test]
    fn test_bus_error() {
        let mut console = Console::default();
        let error = console.execute("160000/").unwrap_err();

        assert_eq!("BUS ERROR", format_error(&error));
        assert_eq!(LastAccess::None, console.last_access());
    }

    #[test]
    fn test_parse_error() {
        let mut console = Console::default();
        let error = console.execute("azerty").unwrap_err();

        assert_eq!("ERROR: unknown command 'azerty'", format_error(&error));
    }

    #[test]
    fn test_run_resets_last_access() {
        let mut console = Console::default();
        console.execute("R3/1").unwrap();
        console.execute("1000/0").unwrap();

        assert_eq!(vec!["001000G 001002"], lines(console.execute("1000G").unwrap()));
        assert_eq!(LastAccess::None, console.last_access());
    }

    #[test]
    fn test_interrupt_handle_is_shared() {
        let console = Console::default();
        console.interrupt_handle().store(true, Ordering::SeqCst);

        assert!(console.interrupted.load(Ordering::SeqCst));
    }
}
