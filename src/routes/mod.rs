/// Database health route. Reports whether the shared database handle exists and answers a ping.
pub mod health_db;

/// Liveness route that returns a fixed JSON body if the server is running.
pub mod ping;

pub use health_db::*;
pub use ping::*;
