//! Process-wide registry
//!
//! A configured registry can be installed once at startup. Until then (or if
//! nothing is ever installed) lookups go to the built-in rules, compiled
//! lazily on first use.

use super::{Matcher, PatternRegistry};
use crate::config::EmailAnchoring;
use crate::error::{Error, Result};
use std::sync::{LazyLock, OnceLock};

static INSTALLED: OnceLock<PatternRegistry> = OnceLock::new();

static BUILTIN: LazyLock<std::result::Result<PatternRegistry, String>> =
    LazyLock::new(|| PatternRegistry::builtin(EmailAnchoring::default()).map_err(|e| e.to_string()));

/// Install `registry` as the process-wide registry.
///
/// Can succeed at most once; later calls fail with [`Error::Config`].
pub fn install(registry: PatternRegistry) -> Result<()> {
    let count = registry.len();
    INSTALLED
        .set(registry)
        .map_err(|_| Error::Config("Pattern registry is already installed".to_string()))?;
    tracing::info!("Installed process-wide pattern registry ({} patterns)", count);
    Ok(())
}

/// The process-wide registry: the installed one, else the built-in rules
pub fn global() -> Result<&'static PatternRegistry> {
    if let Some(registry) = INSTALLED.get() {
        return Ok(registry);
    }
    match &*BUILTIN {
        Ok(registry) => Ok(registry),
        Err(e) => Err(Error::Config(e.clone())),
    }
}

/// Look up a matcher in the process-wide registry
pub fn get(name: &str) -> Result<&'static Matcher> {
    global()?.get(name)
}

/// Test `input` against a pattern in the process-wide registry
pub fn test(name: &str, input: &str) -> Result<bool> {
    global()?.test(name, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PatternRule, EMAIL, PHONE};

    // INSTALLED is shared by every test in the binary, so only this test
    // installs, and only with a registry that keeps the built-in answers.
    #[test]
    fn test_install_once() {
        let registry = PatternRegistry::builtin(EmailAnchoring::Full).unwrap();
        let first = install(registry);
        let second = install(PatternRegistry::new(vec![PatternRule::new("x", "x", "")]).unwrap());

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::Config(_))));
        assert!(global().unwrap().contains(EMAIL));
    }

    #[test]
    fn test_free_functions() {
        assert!(test(PHONE, "01012345678").unwrap());
        assert!(!test(PHONE, "02012345678").unwrap());
        assert!(get(EMAIL).unwrap().is_match("user@example.com"));
        assert!(get("nonexistent").unwrap_err().is_not_found());
        assert!(test("nonexistent", "").unwrap_err().is_not_found());
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| test(PHONE, "01712345678").unwrap()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
