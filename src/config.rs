//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Process-wide configuration.
//!
//! This is deliberately global, mutable, process-level state with no
//! init/teardown protocol: set exclusively through [`configure`] and
//! consulted once per [`crate::StringGenBuilder::build`] call. Changes
//! apply only to generators constructed after the change — existing
//! instances keep whatever they captured at construction time.

use std::sync::{Mutex, OnceLock};

use crate::error::{Error, Result};

/// A snapshot of the two configurable defaults.
#[derive(Debug, Clone, Default)]
pub struct ProcessConfig {
    pub max_repeat: Option<u32>,
    pub alphabet: Option<String>,
}

/// An update to apply via [`configure`]. Only these two keys exist;
/// Rust's type system makes an "unknown config key" failure mode
/// unrepresentable, so it is not reproduced here (see DESIGN.md).
#[derive(Debug, Clone, Default)]
pub struct ProcessConfigUpdate {
    pub max_repeat: Option<u32>,
    pub alphabet: Option<String>,
}

impl ProcessConfigUpdate {
    pub fn new() -> Self {
        ProcessConfigUpdate::default()
    }

    pub fn max_repeat(mut self, value: u32) -> Self {
        self.max_repeat = Some(value);
        self
    }

    pub fn alphabet(mut self, value: impl Into<String>) -> Self {
        self.alphabet = Some(value.into());
        self
    }
}

fn global() -> &'static Mutex<ProcessConfig> {
    static CONFIG: OnceLock<Mutex<ProcessConfig>> = OnceLock::new();
    CONFIG.get_or_init(|| Mutex::new(ProcessConfig::default()))
}

/// Updates the process-wide defaults. Only fields present in `update` are
/// changed; fields left as `None` keep their current value.
///
/// A non-positive `max_repeat` or an empty/whitespace-only `alphabet` is
/// rejected with [`Error::InvalidArgument`] before anything is stored.
pub fn configure(update: ProcessConfigUpdate) -> Result<()> {
    if let Some(0) = update.max_repeat {
        return Err(Error::InvalidArgument {
            what: "max_repeat",
            reason: "must be a positive integer".to_string(),
        });
    }
    if let Some(a) = update.alphabet.as_deref() {
        if a.trim().is_empty() {
            return Err(Error::InvalidArgument {
                what: "alphabet",
                reason: "must not be empty or whitespace-only".to_string(),
            });
        }
    }

    let mut cfg = global().lock().unwrap();
    if let Some(max_repeat) = update.max_repeat {
        log::debug!("process config: max_repeat = {}", max_repeat);
        cfg.max_repeat = Some(max_repeat);
    }
    if let Some(alphabet) = update.alphabet {
        log::debug!("process config: alphabet = {:?}", alphabet);
        cfg.alphabet = Some(alphabet);
    }
    Ok(())
}

/// Clears every process-config key back to "unset".
pub fn reset() {
    log::debug!("process config: reset to built-in defaults");
    let mut cfg = global().lock().unwrap();
    *cfg = ProcessConfig::default();
}

/// The current process config, for a generator under construction to
/// consult. Snapshotting (rather than holding the lock) is what makes
/// "changes apply only to generators constructed after the change" true:
/// once taken, this snapshot is immune to any later `configure`/`reset`.
pub fn snapshot() -> ProcessConfig {
    global().lock().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    // configure()/reset() are process-global; serialize the tests that
    // touch them so they don't race each other under `cargo test`'s
    // default multi-threaded runner.
    static TEST_LOCK: StdMutex<()> = StdMutex::new(());

    #[test]
    fn configure_then_reset_round_trips() {
        let _guard = TEST_LOCK.lock().unwrap();
        reset();
        assert!(snapshot().max_repeat.is_none());
        configure(ProcessConfigUpdate::new().max_repeat(7)).unwrap();
        assert_eq!(snapshot().max_repeat, Some(7));
        reset();
        assert!(snapshot().max_repeat.is_none());
    }

    #[test]
    fn rejects_non_positive_max_repeat() {
        let _guard = TEST_LOCK.lock().unwrap();
        reset();
        assert!(configure(ProcessConfigUpdate::new().max_repeat(0)).is_err());
        reset();
    }

    #[test]
    fn rejects_blank_alphabet() {
        let _guard = TEST_LOCK.lock().unwrap();
        reset();
        assert!(configure(ProcessConfigUpdate::new().alphabet("   ")).is_err());
        reset();
    }
}
