use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mining_dashboard::{config, handlers, paths::DataPaths, session::SessionStore, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mining_dashboard=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = config::load();

  let paths = DataPaths::new(&settings.data_dir);
  if !paths.users_file().exists() {
    tracing::warn!(
      "No credential store at {}; nobody will be able to log in",
      paths.users_file().display()
    );
  }

  let state = AppState::new(paths, SessionStore::new(settings.session_expiry_hours));
  let app = handlers::router(state);

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", settings.server_port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
