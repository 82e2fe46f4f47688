use crate::{
    config::{EnvFileSettings, Settings},
    database::{Database, Ping},
    error::StartupError,
    routes,
};
use axum::{
    routing::{get, IntoMakeService},
    Router, Server,
};
use hyper::server::conn::AddrIncoming;
use std::{net::TcpListener, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};

/// The server always listens here. Not configurable.
pub const ADDRESS: &str = "localhost:8080";

/// Shared state handed to every handler. The database handle is read-only from the handlers'
/// point of view: it is opened and closed by [`Application`].
#[derive(Clone, Default)]
pub struct AppState {
    pub database: Option<Arc<dyn Ping>>,
}

impl AppState {
    pub fn new(database: Option<Arc<dyn Ping>>) -> Self {
        Self { database }
    }
}

/// Runs the fallible startup steps in order: load the settings file, then open the database.
/// Returns `None` when the database is disabled.
pub async fn initialize(settings: &Settings) -> Result<Option<Database>, StartupError> {
    load_env_file(&settings.env_file)?;

    if !settings.database.enabled {
        tracing::info!("Database disabled, skipping connection");
        return Ok(None)
    }
    Database::connect(&settings.database).await.map(Some)
}

/// Loads the settings file into the process environment. Variables that are already set win.
fn load_env_file(settings: &EnvFileSettings) -> Result<(), StartupError> {
    if !settings.enabled {
        return Ok(())
    }
    dotenvy::from_path(&settings.path)
        .map_err(|source| StartupError::EnvFile { path: settings.path.clone(), source })?;
    tracing::info!(path = %settings.path.display(), "Loaded settings file");
    Ok(())
}

pub fn run(
    listener: TcpListener,
    state: AppState,
) -> hyper::Result<Server<AddrIncoming, IntoMakeService<Router>>> {
    // Configure service to have request IDs show up correctly in logs produced by
    // `tower_http::trace::Trace`. Modified from: https://docs.rs/tower-http/latest/tower_http/request_id/index.html#using-trace
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        // Log requests and responses.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        // Propagate the header to the response before the response reaches `TraceLayer`.
        .propagate_x_request_id()
        // A panicking handler becomes a 500 instead of tearing down the connection.
        .layer(CatchPanicLayer::new());

    let app = Router::new()
        .route("/ping", get(routes::ping))
        .route("/health/db", get(routes::health_db))
        .with_state(state)
        .layer(middleware);

    // Run it with hyper on the given TcpListener.
    Ok(axum::Server::from_tcp(listener)?.serve(app.into_make_service()))
}

/// A fully initialized server: settings file loaded, database connected, listener bound.
pub struct Application {
    port: u16,
    listener: TcpListener,
    database: Option<Database>,
}

impl Application {
    /// Initializes and binds to `address`. Every startup failure is returned before the listener
    /// is bound, except a bind failure itself, which releases the database before returning.
    pub async fn build(settings: &Settings, address: &str) -> Result<Self, StartupError> {
        let database = initialize(settings).await?;

        let bound = TcpListener::bind(address).and_then(|listener| {
            let port = listener.local_addr()?.port();
            Ok((listener, port))
        });
        let (listener, port) = match bound {
            Ok(bound) => bound,
            Err(e) => {
                if let Some(database) = &database {
                    database.close().await;
                }
                return Err(StartupError::Bind(e))
            }
        };
        tracing::info!(%address, port, "Listening");

        Ok(Self { port, listener, database })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serves until the server fails, then releases the database handle.
    pub async fn run_until_stopped(self) -> Result<(), StartupError> {
        let state =
            AppState::new(self.database.clone().map(|database| Arc::new(database) as Arc<dyn Ping>));

        let result = match run(self.listener, state) {
            Ok(server) => server.await,
            Err(e) => Err(e),
        };

        if let Some(database) = &self.database {
            database.close().await;
        }
        result.map_err(StartupError::from)
    }
}
