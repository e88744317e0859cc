use std::sync::Mutex;

// Env vars are process-global; tests touching them must not interleave.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily set or removed,
/// restoring the previous values afterwards (also on panic).
///
/// `changes` is a list of `(key, value)` pairs: `Some(v)` sets the
/// variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");

    struct Restore(Vec<(String, Option<String>)>);

    impl Drop for Restore {
        fn drop(&mut self) {
            for (key, previous) in self.0.drain(..) {
                match previous {
                    Some(value) => std::env::set_var(&key, value),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }

    let mut restore = Restore(Vec::with_capacity(changes.len()));
    for (key, value) in changes {
        if !restore.0.iter().any(|(k, _)| k == key) {
            restore.0.push((key.to_string(), std::env::var(key).ok()));
        }
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    f()
}
