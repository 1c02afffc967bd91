//! present-html CLI - compile slide decks and articles to HTML

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use present_html::Present;

#[derive(Parser)]
#[command(name = "present-html")]
#[command(version)]
#[command(about = "Compile .slide and .article files into static HTML", long_about = None)]
struct Cli {
    /// The .slide or .article file to be processed
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// The file to write the rendered HTML to (defaults to the input with .html)
    #[arg(long = "out", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory holding templates/ and assets/ (built-in copies when unset)
    #[arg(long, value_name = "DIR", env = "PRESENT_BASE")]
    base: Option<PathBuf>,

    /// Make Go code excerpts marked with .play runnable
    #[arg(long, env = "PRESENT_PLAY")]
    play: bool,

    /// Include speaker notes in the output
    #[arg(long)]
    notes: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut present = Present::new();
    if let Some(base) = &cli.base {
        present = present.with_base_dir(base);
    }

    let result = present
        .with_play(cli.play)
        .with_notes(cli.notes)
        .compile(&cli.input, cli.output.as_deref());

    match result {
        Ok(path) => {
            log::debug!("compiled {}", cli.input.display());
            println!("{} {}", "Saved to".green(), path.display());
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
