use clap::Parser;
use marketlens::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
