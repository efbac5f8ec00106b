//! `codeshelf`: command-line client for a local catalog of HTML and CSS
//! snippets. All business logic lives in the `codeshelfapp` crate; this
//! binary parses arguments, calls the API and prints the results.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
