//! Extracts and sorts the module records of a debug-symbol database.

#![warn(missing_docs, missing_debug_implementations, clippy::all)]

#[macro_use]
mod utils;

mod app;
mod config;
mod dump;
mod record;

fn main() {
    app::main();
}
