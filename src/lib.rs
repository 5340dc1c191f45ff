//! FieldGuard - Named validation patterns for form input
//!
//! FieldGuard keeps a small, read-only registry of compiled regular
//! expressions keyed by field name. Callers look a pattern up by name and
//! test user input against it:
//!
//! ```
//! assert!(fieldguard::test("phone", "01012345678").unwrap());
//! assert!(!fieldguard::test("identifier", "ab12").unwrap());
//! assert!(fieldguard::get("nonexistent").is_err());
//! ```
//!
//! ## Built-in patterns
//!
//! | Name         | Accepts                                                    |
//! |--------------|------------------------------------------------------------|
//! | `blank`      | zero or more whitespace characters (used for stripping)    |
//! | `identifier` | 5-12 characters, at least one letter or digit              |
//! | `password`   | 8-15 characters, at least one letter, digit or symbol      |
//! | `phone`      | Korean mobile numbers (`010`, `011`, `016`-`019` prefixes) |
//! | `email`      | `local@domain.tld`                                         |
//!
//! ## Modules
//!
//! - [`registry`]: the pattern registry and the process-wide instance
//! - [`validation`]: validating a set of form fields in one pass
//! - [`config`]: rule tables and configuration loading

pub mod config;
pub mod error;
pub mod registry;
pub mod validation;

pub use config::FieldGuardConfig;
pub use error::{Error, Result};
pub use registry::{get, global, install, test, Matcher, NamedPattern, PatternRegistry};
pub use validation::{FieldValidator, ValidationReport};
