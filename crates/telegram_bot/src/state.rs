use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Local;
use ledger::{Registry, RegistrySnapshot};
use tokio::sync::Mutex;

/// Shared registry plus its snapshot file.
///
/// The single mutex serializes every group mutation, which is what the
/// zero-sum invariant needs under concurrent chat updates. Mutating closures
/// run under the lock and the snapshot is written before it is released, so
/// the file never mixes two updates.
#[derive(Clone)]
pub(crate) struct LedgerStore {
    path: PathBuf,
    inner: Arc<Mutex<Registry>>,
}

impl LedgerStore {
    /// Loads the snapshot file, or starts with an empty registry if it is
    /// missing or unreadable.
    pub(crate) fn load_or_empty(path: PathBuf) -> Self {
        let registry = match read_snapshot(&path) {
            Some(registry) => {
                tracing::info!("Loaded ledger snapshot with {} group(s)", registry.len());
                registry
            }
            None => Registry::new(),
        };

        Self {
            path,
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Runs a mutation under the lock and persists the result.
    pub(crate) async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Registry) -> T,
    {
        let mut guard = self.inner.lock().await;
        let result = f(&mut guard);

        if let Err(err) = write_snapshot(&self.path, &guard) {
            tracing::warn!("ledger snapshot save failed: {err}");
        }
        result
    }

    /// Runs a read-only closure on a consistent registry snapshot.
    pub(crate) async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Registry) -> T,
    {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    /// Forces a snapshot write without mutating anything.
    pub(crate) async fn save(&self) -> Result<(), String> {
        let guard = self.inner.lock().await;
        write_snapshot(&self.path, &guard).map_err(|err| err.to_string())
    }

    /// Replaces the in-memory registry with the snapshot on disk.
    pub(crate) async fn reload(&self) -> Result<(), String> {
        let registry =
            read_snapshot(&self.path).ok_or_else(|| "no readable snapshot file".to_string())?;
        let mut guard = self.inner.lock().await;
        *guard = registry;
        Ok(())
    }
}

fn read_snapshot(path: &Path) -> Option<Registry> {
    let raw = fs::read_to_string(path).ok()?;
    let snapshot: RegistrySnapshot = match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!("ignoring unreadable ledger snapshot: {err}");
            return None;
        }
    };

    match snapshot.restore() {
        Ok(registry) => Some(registry),
        Err(err) => {
            tracing::warn!("ignoring incompatible ledger snapshot: {err}");
            None
        }
    }
}

fn write_snapshot(path: &Path, registry: &Registry) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let snapshot = RegistrySnapshot::capture(registry);
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|_| std::io::Error::other("serialize failed"))?;

    // Keep the previous snapshot around under a timestamped name.
    if path.exists() {
        let stamp = Local::now().format("%Y-%m-%dT%H-%M-%S");
        let backup = path.with_extension(format!("{stamp}.json"));
        let _ = fs::rename(path, &backup);
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
