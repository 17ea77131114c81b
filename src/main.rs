use clap::{Parser, Subcommand};
use qmake_configure::bin_flags;
use qmake_configure::utils::{log, log::set_log_level, LogLevel};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generates qmake include files from the DEPENDS and SUBDIRS of a project tree
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Also print debug messages
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve dependencies and write the generated files
    Configure {
        /// Source directory (where qmake builds from)
        src_dir: PathBuf,
        /// Output build directory (where qmake builds to)
        out_dir: PathBuf,
        /// Report which files would change without writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the link order and subdir dependencies of every project
    Deps {
        /// Source directory
        src_dir: PathBuf,
    },
    /// Remove the generated files
    Clean {
        /// Source directory
        src_dir: PathBuf,
        /// Output build directory
        out_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        set_log_level(LogLevel::Debug);
    } else if cli.quiet {
        set_log_level(LogLevel::Warn);
    }

    let result = match &cli.command {
        Command::Configure {
            src_dir,
            out_dir,
            dry_run,
        } => bin_flags::configure(src_dir, out_dir, *dry_run).map(Some),
        Command::Deps { src_dir } => bin_flags::deps(src_dir).map(Some),
        Command::Clean { src_dir, out_dir } => bin_flags::clean(src_dir, out_dir).map(|_| None),
    };

    match result {
        Ok(Some(diagnostics)) if diagnostics.has_errors() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log(LogLevel::Error, &e.to_string());
            ExitCode::from(2)
        }
    }
}
