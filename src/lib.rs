//! Postal code validation and formatting.
//!
//! ```rust
//! use postalcode::PostalCodeManager;
//!
//! let manager = PostalCodeManager::new();
//!
//! assert!(manager.validate("wc2e 9rz", "gb").unwrap());
//! assert_eq!(manager.format("12345", "PL").unwrap(), "12-345");
//! assert!(manager.format("12345", "XX").unwrap_err().is_unknown_country());
//! ```

pub mod config;
pub mod error;
pub mod facade;
pub mod handlers;
pub mod manager;
pub mod normalize;
pub mod observability;
pub mod postal_code;

pub use error::{PostalCodeError, Result};
pub use handlers::{HandlerFactory, PostalCodeHandler};
pub use manager::PostalCodeManager;
pub use normalize::normalize;
pub use postal_code::PostalCode;
