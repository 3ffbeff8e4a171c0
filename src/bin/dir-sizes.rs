use std::path::PathBuf;
use std::process;

use clap::Parser;

use compbench::errors::BenchError;
use compbench::sizes::{format_file_size, list_file_sizes};

#[derive(Parser)]
#[command(
    name = "dir-sizes",
    version,
    about = "List all files in a folder along with their sizes in bytes."
)]
struct Cli {
    /// Path to the folder you want to scan
    folder: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    match list_file_sizes(&cli.folder) {
        Ok(files) => {
            for file in &files {
                println!("{}", format_file_size(file));
            }
        }
        Err(err) => match err.downcast_ref::<BenchError>() {
            // Reported on stdout with a zero exit status.
            Some(BenchError::NotADirectory { .. }) => println!("Error: {}", err),
            _ => {
                eprintln!("{}", err);
                process::exit(1);
            }
        },
    }
}
