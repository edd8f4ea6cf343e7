use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use playlist_index::{Res, cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeOptions),

    /// Build or read the track index of one user
    Library(LibraryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryOptions {
    /// Spotify user ID
    pub user_id: String,

    /// Bearer token to use instead of the client-credentials supplier
    #[clap(long)]
    pub token: Option<String>,

    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,

    /// Only show tracks of this playlist ID
    #[clap(long)]
    pub playlist: Option<String>,

    /// List the playlists of the index instead of its tracks
    #[clap(long, conflicts_with = "playlist")]
    pub playlists: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() -> Res<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playlist_index=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // `.env` may set RUST_LOG, so it is read before the subscriber.
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    if let Err(e) = init_tracing() {
        error!("Cannot initialise logging. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Library(opt) => {
            cli::library(
                opt.user_id,
                opt.token,
                cli::LibraryView {
                    json: opt.json,
                    playlist: opt.playlist,
                    playlists: opt.playlists,
                },
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
