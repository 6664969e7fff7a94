use clap::Parser;
use console::style;

use lopelens::cli::{self, Args};

fn main() {
    let args = Args::parse();

    if let Err(err) = cli::run(args) {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}
