//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = wayline_cli::run() {
        eprintln!("wayline: {err}");
        std::process::exit(1);
    }
}
