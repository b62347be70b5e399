//! Kiwi-finder CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = kiwi_finder::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
