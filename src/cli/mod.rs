use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::http::server::HttpServer;
use crate::import;
use crate::playlist::Playlist;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "chainplay")]
#[command(version = "0.1")]
#[command(about = "Linked-list music playlist player")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "chainplay.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run http server hosting the playlist
    Serve,
    /// Manage the playlist from an interactive console
    Shell,
    /// Print the playlist built from the configured import roots
    List,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = Config::load_or_default(&cli.config)?;

    let playlist = load_playlist(&cfg.import);

    match cli.command {
        Commands::Serve => {
            let http_server = HttpServer::new(playlist, cfg.http);

            println!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
        }

        Commands::Shell => {
            let mut playlist = playlist;
            println!("Type 'help' for commands.");
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            Shell::new(&mut playlist).run(stdin.lock(), &mut stdout)?;
        }

        Commands::List => {
            if playlist.is_empty() {
                println!("Playlist is empty. Upload some songs!");
            }
            for line in playlist.render() {
                println!("{line}");
            }
            println!("Total songs: {}", playlist.len());
        }
    }
    Ok(())
}

fn load_playlist(import_config: &config::ImportConfig) -> Playlist {
    let mut playlist = Playlist::new();
    let added = import::import_into(&mut playlist, import_config);
    if !import_config.roots.is_empty() {
        info!(
            "Imported {added} tracks from {} roots",
            import_config.roots.len()
        );
    }
    playlist
}
