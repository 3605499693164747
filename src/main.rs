use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod feedback;
pub mod http;
pub mod import;
pub mod playlist;
pub mod shell;

fn main() -> anyhow::Result<()> {
    run()
}
