//! Demonstration compiler driver: loads a built-in AST fixture (there
//! is no parser in this workspace), runs the module driver against it,
//! and prints the resulting specialization report to stdout.

mod fixtures;

use clap::{Parser, Subcommand};
use lang_driver::{RootMode, ReportingBackend};

#[derive(Parser)]
#[command(name = "langc", about = "Type-inference core demonstration driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type a built-in fixture and print its specialization report.
    Run {
        fixture: String,
        /// Treat every top-level `polymorphic = false` declaration as a
        /// root instead of requiring a single `main`.
        #[arg(long)]
        library: bool,
    },
    /// List the fixtures `run` accepts.
    ListFixtures,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::ListFixtures => {
            for (name, _) in fixtures::registry() {
                println!("{name}");
            }
        }
        Command::Run { fixture, library } => {
            let Some(module) = fixtures::lookup(&fixture) else {
                eprintln!("unknown fixture '{fixture}'; try `langc list-fixtures`");
                std::process::exit(2);
            };
            let mode = if library { RootMode::Library } else { RootMode::Program };
            let mut backend = ReportingBackend::new();
            match lang_driver::run(&module, mode, &mut backend) {
                Ok(()) => {
                    let report = backend.to_json().expect("report entries always serialize");
                    println!("{report}");
                }
                Err(err) => {
                    let mut buf = Vec::new();
                    lang_common::diagnostics::report_fatal(&err, &fixture, "<fixture: no source text>", &mut buf);
                    eprint!("{}", String::from_utf8_lossy(&buf));
                    std::process::exit(1);
                }
            }
        }
    }
}
