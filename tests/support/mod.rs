use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, Once, OnceLock};
use tempfile::NamedTempFile;

/// Route `tracing` output through the test harness; honors `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Write `contents` to a fresh temp file and keep it alive for the caller.
pub fn write_table(contents: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate provider table file")?;
    serde_json::to_writer_pretty(&mut file, contents)?;
    file.flush()?;
    Ok(file)
}

/// Serializes tests that touch process environment variables.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let mutex = LOCK.get_or_init(|| Mutex::new(()));
    mutex.lock().unwrap_or_else(|err| err.into_inner())
}
