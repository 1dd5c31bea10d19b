/*
 * This is the operator console for the Sfera-36 machine.
 */
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    sync::{atomic::Ordering, mpsc::channel},
    thread,
};

use ansi_term::Colour;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};
use rustyline::{error::ReadlineError, DefaultEditor};
use simple_logger::SimpleLogger;

use sfera36_console::{
    format_error, CliDisplayer, Configuration, Console, ConsoleOutput, Displayer, Executor,
    ExecutorConfiguration,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sfera-36 console
/// Reads and writes registers and memory of the emulated machine in octal and
/// runs programs from a given address. Without a script, an interactive
/// prompt is opened.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct CommandLineArguments {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Console script to execute ("-" to read from standard input)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Maximum number of instructions a single run executes
    #[arg(short = 'l', long)]
    step_limit: Option<usize>,

    /// Print the last executed instructions after each run
    #[arg(short, long)]
    trace: bool,

    /// Do not stop the script when a command fails
    #[arg(short, long)]
    continue_on_failure: bool,
}

impl CommandLineArguments {
    fn configuration(&self) -> Result<Configuration> {
        let mut configuration = match &self.config {
            Some(path) => Configuration::load(path)?,
            None => Configuration::default(),
        };

        if let Some(step_limit) = self.step_limit {
            configuration.step_limit = step_limit;
        }
        if self.trace {
            configuration.trace = true;
        }

        Ok(configuration)
    }
}

fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    let arguments = CommandLineArguments::parse();
    let configuration = arguments.configuration()?;
    debug!("configuration {:?}", configuration);
    let console = Console::new(configuration);

    let interrupted = console.interrupt_handle();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    })
    .context("could not install the CTRL-C handler")?;

    match &arguments.script {
        Some(path) => run_script(console, path, arguments.continue_on_failure),
        None => run_interactive(console),
    }
}

fn run_script(mut console: Console, path: &Path, continue_on_failure: bool) -> Result<()> {
    let buffer: Box<dyn BufRead> = if path == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path)
            .with_context(|| format!("could not open script {}", path.display()))?;
        Box::new(BufReader::new(file))
    };

    let (sender, receiver) = channel();
    let mut displayer = CliDisplayer::new(io::stdout(), true);
    let display = thread::spawn(move || displayer.display(receiver));

    let executor = Executor::new(ExecutorConfiguration {
        stop_on_failure: !continue_on_failure,
    });
    let result = executor.run(&mut console, buffer, sender);
    display
        .join()
        .map_err(|_| anyhow!("the display thread panicked"))??;

    result
}

fn run_interactive(mut console: Console) -> Result<()> {
    println!(
        "{}",
        Colour::Green.paint(format!("Welcome in Sfera-36 version {}", VERSION))
    );
    let prompt = format!("{}", Colour::Fixed(148).bold().paint(">> "));
    let history_file = console.configuration().history_file.clone();
    let mut rl = DefaultEditor::new()?;
    if rl.load_history(&history_file).is_err() {
        println!("No previous history.");
    }

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                match console.execute(&line) {
                    Ok(ConsoleOutput::Lines(lines)) => {
                        for line in lines {
                            println!("{}", line);
                        }
                    }
                    Ok(ConsoleOutput::Quit) => {
                        println!("Quit!");
                        break;
                    }
                    Err(e) => print_err(&format_error(&e)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL+C caught, press CTRL+D to exit.");
            }
            Err(ReadlineError::Eof) => {
                println!("Quit!");
                break;
            }
            Err(err) => {
                print_err(&format!("{:?}", err));
                break;
            }
        }
    }
    rl.save_history(&history_file)?;
    println!(
        "Writing commands history in '{}'.",
        history_file.display()
    );

    Ok(())
}

fn print_err(msg: &str) {
    println!("{}", Colour::Red.paint(msg));
}
