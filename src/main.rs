use colored::Colorize;
use std::process;

fn main() {
    if let Err(e) = molt::cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e.to_string().red());
        process::exit(e.exit_code());
    }
}
