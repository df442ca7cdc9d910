//! Vimera Player - desktop composition root binary.
//!
//! Emulates one page load: the page URL and bootstrap mode come from the
//! environment (see `config`). In the browser the page's module script calls
//! `start_lobby` / `start_game` instead.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(not(target_arch = "wasm32"))]
use vimera_player::{
    config::ClientConfig, logging_handlers, ConnectionBootstrap, LobbyClient, MessageListener,
    PageLocation,
};

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vimera_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Vimera Player");

    // Configuration errors stop here, before any connection attempt
    let config = ClientConfig::from_env()?;
    let page = PageLocation::parse(&config.page_url)?;
    let endpoint = config.endpoints.resolve(page.host())?;
    tracing::info!(page = %config.page_url, endpoint = %endpoint, "Resolved lobby endpoint");

    let bootstrap = ConnectionBootstrap::new(config.strategy, page);
    let listener = MessageListener::new(logging_handlers());

    LobbyClient::new(endpoint, bootstrap, listener).run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser pages call `start_lobby` / `start_game` from their module script.
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
