use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use turtlesc::agent::{HeadlessTurtle, TurtleOptions};
use turtlesc::config::Config;
use turtlesc::{command_registry, logging, Interpreter};

/// Run turtle shorthand commands against a headless turtle.
#[derive(Parser, Debug)]
#[command(name = "turtlesc", version, about)]
struct Cli {
    /// Shorthand commands, e.g. "f 100, l 90". Read from stdin when none are given.
    commands: Vec<String>,

    /// Read commands from a file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file (default: ~/.config/turtlesc/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Validate the batch without running it
    #[arg(long)]
    check: bool,

    /// Print the final turtle state as JSON
    #[arg(long)]
    json: bool,

    /// List the available commands and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    logging::init_tracing(&config.logging.filter);

    if cli.list {
        print_commands();
        return Ok(());
    }

    let inputs = collect_inputs(&cli)?;
    let mut turtle = HeadlessTurtle::with_options(TurtleOptions::from(&config.turtle));
    let interpreter = Interpreter::new();

    if cli.check {
        let resolved = interpreter.check(&turtle, &inputs)?;
        println!("ok: {} command(s)", resolved.len());
        return Ok(());
    }

    let executed = interpreter.run(&mut turtle, &inputs)?;

    if cli.json {
        let report = serde_json::json!({
            "executed": executed,
            "state": turtle.state(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let (x, y) = turtle.position();
        println!("executed {} command(s)", executed);
        println!("position: ({:.2}, {:.2})", x, y);
        println!("heading: {:.2}", turtle.heading_degrees());
        println!("pen: {}", if turtle.is_down() { "down" } else { "up" });
        println!("segments drawn: {}", turtle.state().trail.len());
    }
    Ok(())
}

fn collect_inputs(cli: &Cli) -> Result<Vec<String>> {
    let mut inputs = cli.commands.clone();

    if let Some(path) = &cli.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read commands from '{}'", path.display()))?;
        inputs.push(content);
    }

    if inputs.is_empty() {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read commands from stdin")?;
        inputs.push(content);
    }

    Ok(inputs)
}

fn print_commands() {
    for spec in command_registry().iter() {
        let aliases = if spec.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", spec.aliases.join(", "))
        };
        println!("{:<16} {}{}", spec.usage(), spec.description, aliases);
    }
}
