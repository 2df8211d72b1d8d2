use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

/// Collection names and their initial contents, created on first start.
pub const COLLECTIONS: &[(&str, &str)] = &[
    ("meetings", "[]"),
    ("votes", "[]"),
    ("residents", "[]"),
    ("reports", "{}"),
    ("participant_stats", "{}"),
    ("past_meetings", "[]"),
];

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The collection lock could not be taken within the configured bound.
    Busy { collection: String, waited: Duration },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Storage I/O error: {e}"),
            StoreError::Json(e) => write!(f, "Storage JSON error: {e}"),
            StoreError::Busy { collection, waited } => write!(
                f,
                "Collection '{collection}' is busy (waited {}ms)",
                waited.as_millis()
            ),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// JSON document store: one file per named collection under `data_dir`.
///
/// Every collection has its own reader/writer lock. `load` shares it,
/// `save` and `transact` hold it exclusively for the full
/// read-modify-write cycle, so mutations to one collection are serialized
/// while different collections proceed independently. All lock waits are
/// bounded by `lock_timeout` and fail with [`StoreError::Busy`].
///
/// Locks are in-process; a data directory must be owned by one server.
pub struct DocumentStore {
    data_dir: PathBuf,
    lock_timeout: Duration,
    locks: Mutex<HashMap<String, Arc<RwLock<()>>>>,
}

impl DocumentStore {
    /// Open (and create if needed) a store rooted at `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>, lock_timeout: Duration) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            lock_timeout,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write the default contents for every collection in [`COLLECTIONS`]
    /// whose file does not exist yet. Returns how many files were created.
    pub fn init_collections(&self) -> Result<usize, StoreError> {
        let mut created = 0;
        for (name, default) in COLLECTIONS {
            let path = self.path_for(name);
            if path.exists() {
                continue;
            }
            let value: serde_json::Value = serde_json::from_str(default)?;
            write_atomic(&path, &value)?;
            created += 1;
        }
        Ok(created)
    }

    /// Read a consistent snapshot of a collection. A missing file reads as
    /// `T::default()`.
    pub async fn load<T>(&self, collection: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let lock = self.lock_for(collection);
        let _guard = tokio::time::timeout(self.lock_timeout, lock.read_owned())
            .await
            .map_err(|_| self.busy(collection))?;
        read_snapshot(&self.path_for(collection))
    }

    /// Replace a collection wholesale.
    pub async fn save<T>(&self, collection: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let lock = self.lock_for(collection);
        let _guard = tokio::time::timeout(self.lock_timeout, lock.write_owned())
            .await
            .map_err(|_| self.busy(collection))?;
        write_atomic(&self.path_for(collection), value)
    }

    /// Run `mutate` against the latest snapshot of `collection` while holding
    /// its exclusive lock.
    ///
    /// On `Ok` the mutated snapshot is persisted before the lock is released.
    /// On `Err` nothing is written and the error is returned unchanged.
    pub async fn transact<T, R, E, F>(&self, collection: &str, mutate: F) -> Result<R, E>
    where
        T: DeserializeOwned + Serialize + Default,
        E: From<StoreError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let lock = self.lock_for(collection);
        let _guard = tokio::time::timeout(self.lock_timeout, lock.write_owned())
            .await
            .map_err(|_| E::from(self.busy(collection)))?;

        let path = self.path_for(collection);
        let mut snapshot: T = read_snapshot(&path)?;
        let result = mutate(&mut snapshot)?;
        write_atomic(&path, &snapshot)?;
        Ok(result)
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    fn lock_for(&self, collection: &str) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }

    fn busy(&self, collection: &str) -> StoreError {
        log::warn!(
            "Timed out after {}ms waiting for collection '{}'",
            self.lock_timeout.as_millis(),
            collection
        );
        StoreError::Busy {
            collection: collection.to_string(),
            waited: self.lock_timeout,
        }
    }
}

fn read_snapshot<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    match fs::read(path) {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Write to a sibling temp file, fsync, then rename over the target so a
/// crash never leaves a truncated collection behind.
fn write_atomic<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let bytes = serde_json::to_vec_pretty(value)?;
    let mut file = File::create(&tmp_path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}
