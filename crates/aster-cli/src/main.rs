use clap::{CommandFactory, Parser, Subcommand};

mod debug;
mod run;
mod utils;

use debug::{handle_ast, handle_bytecode};
use run::{handle_run, RunOptions};

#[derive(Parser)]
#[command(author, version, about = "Aster programming language", long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// The file to run (default if no subcommand)
    file: Option<String>,
    /// Initial GC threshold in bytes, before it starts adapting
    #[arg(long, global = true)]
    gc_threshold: Option<usize>,
    /// Maximum operand stack depth
    #[arg(long, global = true)]
    max_stack: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a file with Aster
    Run {
        /// The file to execute
        file: String,
    },
    /// Print the parsed AST (debug)
    #[command(hide = true)]
    Ast {
        /// The file to parse
        file: String,
    },
    /// Print the compiled bytecode (debug)
    #[command(hide = true)]
    Bytecode {
        /// The file to compile
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let opts = RunOptions { gc_threshold: cli.gc_threshold, max_stack: cli.max_stack };

    match &cli.command {
        Some(Commands::Run { file }) => handle_run(file, &opts),
        Some(Commands::Ast { file }) => handle_ast(file),
        Some(Commands::Bytecode { file }) => handle_bytecode(file),
        None => match &cli.file {
            Some(file) => handle_run(file, &opts),
            None => {
                Cli::command().print_help().unwrap();
                println!();
                std::process::exit(0);
            }
        },
    }
}
