#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{error, path::PathBuf, process};

mod app;
mod interact;

use clap::{Args, Parser, Subcommand};
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err}");
        process::exit(2);
    }
}

fn try_main() -> Result<(), Box<dyn error::Error>> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                service,
                covers,
                interact,
                verbosity,
                quiet,
            },
    } = Cli::parse();

    setup_errlog(usize::from(verbosity), quiet)?;

    // `quiet` silences the interactive prompts as well
    let interact = interact && !quiet;

    if interact {
        trace!("Interact mode enabled");
    }

    match command {
        Commands::Search { query } => {
            app::search(&service, &query.join(" "), covers.as_deref(), interact)?;
        }
        Commands::Add { book_id, list_name } => app::add(&service, &book_id, &list_name)?,
    }

    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> Result<(), Box<dyn error::Error>> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "shelf")]
#[clap(about = "Search the Open Library catalog and add results to your reading lists")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Base URL of the reading-list service
    #[clap(short, long, default_value = "http://localhost:8000", global = true)]
    service: String,

    /// Directory to write fetched cover images into
    #[clap(short, long, parse(from_os_str), global = true)]
    covers: Option<PathBuf>,

    /// Enables interactive mode, which offers to add a search result to one of
    /// your reading lists.
    #[clap(short, long, global = true)]
    interact: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
#[non_exhaustive]
enum Commands {
    /// Search the catalog and display one row per result
    Search {
        /// The search terms
        query: Vec<String>,
    },
    /// Add a book to one of your reading lists by its edition key
    #[clap(arg_required_else_help = true)]
    Add {
        /// The edition key of the book
        book_id: String,
        /// The name of the reading list
        list_name: String,
    },
}
