//! Country handlers
//!
//! A handler is the postal code rule of one country. The manager never
//! stores handler instances in its binding tables; it stores
//! [`HandlerFactory`] values and instantiates them on first lookup.
//!
//! ## Key Components
//!
//! - [`PostalCodeHandler`] - Trait every country rule implements
//! - [`PatternHandler`] - Regex-driven handler behind the built-in rules
//! - [`HandlerFactory`] - Lazily invoked producer of a handler instance
//! - [`HandlerRegistry`] - Bindings keyed by uppercased country code
//! - [`Layout`] - Rendering of an accepted postal code
//!
//! ## Example
//!
//! ```rust
//! use postalcode::handlers::{HandlerFactory, Layout};
//! use postalcode::PostalCodeManager;
//!
//! let manager = PostalCodeManager::new();
//! manager.register_handler("ZZ", HandlerFactory::pattern("[0-9]{3}", "NNN", Layout::Compact));
//!
//! assert!(manager.validate("123", "zz").unwrap());
//! ```

pub mod countries;
mod pattern;
mod registry;
mod traits;
mod types;

pub use countries::CountryRule;
pub use pattern::PatternHandler;
pub use registry::{HandlerFactory, HandlerRegistry, SharedHandler};
pub use traits::PostalCodeHandler;
pub use types::Layout;
