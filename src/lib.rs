//! Named browser keyboard event codes.
//!
//! ```
//! use keycode_registry::keycodes::{self, codes};
//!
//! assert_eq!(keycodes::lookup("ENTER"), Ok(codes::ENTER));
//! assert_eq!(keycodes::resolve("escape"), Ok(27));
//! assert!(keycodes::lookup("UNKNOWN").is_err());
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod keycodes;

pub use error::{ConfigError, KeycodeError};
pub use keycodes::{codes, get, lookup, name_of, registry, resolve, Registry};
