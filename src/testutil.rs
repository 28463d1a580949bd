//! Shared helpers for tests that touch process-wide state.
//!
//! The working directory and the environment belong to the whole test
//! process, so every test that changes either one runs under `PROCESS_LOCK`.
//! Changes are undone by a drop guard, which also runs when the test panics.

#[cfg(test)]
use std::ffi::OsString;
#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use std::sync::{Mutex, MutexGuard};

#[cfg(test)]
use tempfile::TempDir;

/// Serializes tests that change the working directory or environment.
#[cfg(test)]
pub static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// Sandbox for one test: holds the lock, a scratch directory that is the
/// current directory, and the environment values to put back.
#[cfg(test)]
struct Sandbox {
    original_dir: PathBuf,
    saved_env: Vec<(String, Option<OsString>)>,
    _scratch: TempDir,
    _lock: MutexGuard<'static, ()>,
}

#[cfg(test)]
impl Sandbox {
    fn enter(vars: &[(&str, &str)]) -> Self {
        let lock = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original_dir = std::env::current_dir().expect("failed to get current directory");
        let scratch = TempDir::new().expect("failed to create scratch directory");
        std::env::set_current_dir(scratch.path()).expect("failed to enter scratch directory");

        let saved_env = vars
            .iter()
            .map(|(key, value)| {
                let previous = std::env::var_os(key);
                std::env::set_var(key, value);
                (key.to_string(), previous)
            })
            .collect();

        Self {
            original_dir,
            saved_env,
            _scratch: scratch,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for Sandbox {
    fn drop(&mut self) {
        for (key, previous) in self.saved_env.drain(..).rev() {
            match previous {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
        // Leave the scratch dir before it is deleted.
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// Run `f` inside a fresh scratch directory.
///
/// ```ignore
/// with_temp_cwd(|| {
///     std::fs::write("panela.toml", "[draw]\nseed = 1\n").unwrap();
///     let config = Config::load(&parse_args(vec!["panela".into()])).unwrap();
///     assert_eq!(config.draw_seed, Some(1));
/// });
/// ```
#[cfg(test)]
pub fn with_temp_cwd<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_temp_env(&[], f)
}

/// Run `f` inside a fresh scratch directory with `vars` set; previous
/// values are restored afterwards.
#[cfg(test)]
pub fn with_temp_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _sandbox = Sandbox::enter(vars);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_env_is_restored() {
        const KEY: &str = "PANELA_TESTUTIL_SCRATCH_VAR";

        let (value, entries) = with_temp_env(&[(KEY, "inside")], || {
            let entries = std::fs::read_dir(".").unwrap().count();
            (std::env::var(KEY).ok(), entries)
        });

        assert_eq!(value.as_deref(), Some("inside"));
        assert_eq!(entries, 0);
        assert!(std::env::var_os(KEY).is_none());
    }
}
