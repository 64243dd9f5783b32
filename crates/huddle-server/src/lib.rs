//! Huddle Server
//!
//! HTTP front end for the proximity grouping service.
//!
//! # Architecture
//!
//! - **Config**: `HUDDLE_*` environment variables with defaults
//! - **Placement**: Chooses starting coordinates for new players
//! - **Server**: Axum router over a shared [`huddle_core::Lobby`]
//! - **Logging**: `tracing-subscriber` setup for the binary
//!
//! # Endpoints
//!
//! | Method | Path                    | Response                       |
//! |--------|-------------------------|--------------------------------|
//! | POST   | `/init/player`          | `201 {"player_id", "X", "Y"}`  |
//! | GET    | `/group?player_id=N`    | `200 {"group_id"}`             |
//! | GET    | `/api/status`           | counts and limits              |
//! | GET    | `/health`               | `OK`                           |
//!
//! Registry and lookup failures answer `400 {"msg": ...}`.
//!
//! # Usage
//!
//! ```no_run
//! use huddle_server::{HuddleServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     HuddleServer::new(config).serve().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod placement;
pub mod server;

pub use config::{ConfigError, ServerConfig, Surface};
pub use error::{Error, Result};
pub use placement::{PositionSource, RandomPlacement};
pub use server::{AppState, HuddleServer};
