use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

/// String key-value storage with the semantics of browser local storage:
/// flat string keys, string values, durable across restarts.
pub trait KvBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Returns true if the key existed.
    fn delete(&self, key: &str) -> Result<bool>;
}

/// Process-local storage. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryKv {
    map: Arc<parking_lot::RwLock<BTreeMap<String, String>>>,
}

impl MemoryKv {
    pub fn new() -> Self { Self::default() }
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> { Ok(self.map.read().get(key).cloned()) }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> { Ok(self.map.write().remove(key).is_some()) }
}

/// File-backed storage: one JSON object `{ key: value }` under the data directory.
///
/// Every read goes to disk so an externally edited or damaged file is noticed on the
/// next access. Writes replace the file through a temp file + rename.
#[derive(Clone)]
pub struct FileKv {
    path: PathBuf,
    write_lock: Arc<parking_lot::Mutex<()>>,
}

impl FileKv {
    pub const FILE_NAME: &'static str = "local_storage.json";

    /// Open (creating the directory if needed) the storage file under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create or access data directory: {}", dir.display()))?;
        Ok(Self { path: dir.join(Self::FILE_NAME), write_lock: Arc::new(parking_lot::Mutex::new(())) })
    }

    pub fn path(&self) -> &Path { &self.path }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", self.path.display())),
        };
        if bytes.iter().all(|b| b.is_ascii_whitespace()) { return Ok(BTreeMap::new()); }
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", self.path.display()))
    }

    fn write_all(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path).with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl KvBackend for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> { Ok(self.read_all()?.remove(key)) }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _g = self.write_lock.lock();
        // A damaged file is replaced rather than blocking all future writes
        let mut map = self.read_all().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        self.write_all(&map)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let _g = self.write_lock.lock();
        let mut map = match self.read_all() {
            Ok(m) => m,
            Err(_) => {
                // Unreadable file: nothing can be recovered from it, start clean
                self.write_all(&BTreeMap::new())?;
                return Ok(true);
            }
        };
        let existed = map.remove(key).is_some();
        if existed { self.write_all(&map)?; }
        Ok(existed)
    }
}
