use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporelay::{
    config,
    management::TokenManager,
    server::{AppState, start_server},
    success,
    types::AuthConfig,
    warning,
};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the proxy server
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Listen port (overrides SERVER_PORT)
    #[clap(long)]
    port: Option<u16>,

    /// Serve HTTPS using the configured certificate and key
    #[clap(long)]
    tls: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env() {
        warning!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    let auth = AuthConfig {
        token_url: config::spotify_apitoken_url(),
        client_id: config::spotify_client_id(),
        client_secret: config::spotify_client_secret(),
    };

    let tokens = Arc::new(TokenManager::new(auth));
    match tokens.refresh().await {
        Ok(()) => success!("Obtained initial Spotify access token"),
        Err(e) => warning!("Initial token refresh failed, serving in degraded mode: {}", e),
    }

    let state = AppState::new(tokens, config::spotify_apiurl(), config::motd_secret());

    let port = opt.port.unwrap_or_else(config::server_port);
    let tls = opt.tls || config::tls_enabled();
    start_server(state, port, tls).await;
}
