//! Storefront Server - loyalty-driven pickup order backend
//!
//! # Architecture
//!
//! The server turns carts priced by `shared::cart` into committed
//! orders:
//!
//! - **Checkout** (`checkout`): validates a request, re-prices it from
//!   the canonical catalog, persists the order, then runs best-effort
//!   bookkeeping (inventory, loyalty) and detached notifications.
//! - **Notifications** (`notify`): fan-out of order summaries and
//!   stock alerts to messaging channels; failures never surface.
//! - **Stock watch** (`stock_watch`): periodic sweep that turns
//!   back-in-stock subscriptions into alerts.
//! - **HTTP API** (`api`): axum routers per resource.
//! - **Database** (`db`): SQLite connection pool and repositories.
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── api/           # HTTP routes and handlers
//! ├── checkout/      # fulfillment orchestrator
//! ├── notify/        # notification dispatcher
//! ├── stock_watch/   # back-in-stock sweep worker
//! ├── db/            # pool + repositories
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod checkout;
pub mod core;
pub mod db;
pub mod notify;
pub mod stock_watch;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use notify::Notifier;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
