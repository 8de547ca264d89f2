//! Service configuration.
//!
//! Settings are read from the process environment (and a `.env` file when
//! present). Every key has a default, so the service starts with no
//! configuration at all.
//!
//! # Example
//!
//! ```
//! use ktax::config::AppConfig;
//!
//! let config = AppConfig::from_getter(|key| match key {
//!     "PORT" => Some("9090".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.bind_address(), "0.0.0.0:9090");
//! assert_eq!(config.admin.username, "adminTax");
//! ```

mod loader;
mod types;

pub use loader::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, DEFAULT_DATABASE_URL, DEFAULT_PORT,
};
pub use types::{AdminCredentials, AppConfig};
