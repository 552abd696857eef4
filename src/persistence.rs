//! Encrypted single-slot save of the player's balance and inventory.
//!
//! The payload is line oriented text:
//!
//! ```text
//! MONEY=<balance>
//! <Powerup name>=<count>
//! ```
//!
//! encrypted with AES-128 (ECB, PKCS#7 padding) under a fixed key and stored as
//! standard padded base64.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use alloc::format;
use alloc::string::{String, ToString};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::inventory::Inventory;
use crate::powerup::Powerup;

type Aes128EcbEnc = ecb::Encryptor<aes::Aes128>;
type Aes128EcbDec = ecb::Decryptor<aes::Aes128>;

const SAVE_KEY: [u8; 16] = *b"ThisIsASecretKey";
const MONEY_KEY: &str = "MONEY";

/// Everything that survives between games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveData {
    pub balance: i64,
    pub inventory: Inventory,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("save file I/O failed: {0}")]
    Io(String),
    #[error("save data is not valid base64: {0}")]
    Base64(base64::DecodeError),
    #[error("save data could not be decrypted")]
    Cipher,
    #[error("decrypted save data is not UTF-8")]
    Utf8,
    #[error("malformed save entry `{0}`")]
    Malformed(String),
}

/// Serialize, encrypt and base64-encode `data`.
pub fn encode(data: &SaveData) -> String {
    let mut text = format!("{}={}\n", MONEY_KEY, data.balance);
    for (item, count) in data.inventory.iter() {
        text.push_str(&format!("{}={}\n", item.name(), count));
    }
    seal(&text)
}

/// Encrypt plain save text and base64-encode it.
pub fn seal(text: &str) -> String {
    let sealed = Aes128EcbEnc::new(&SAVE_KEY.into()).encrypt_padded_vec_mut::<Pkcs7>(text.as_bytes());
    STANDARD.encode(sealed)
}

/// Reverse of [`encode`]. Entries naming an unknown powerup are skipped, and a
/// repeated powerup keeps its last count.
pub fn decode(blob: &str) -> Result<SaveData, PersistenceError> {
    let sealed = STANDARD
        .decode(blob.trim())
        .map_err(PersistenceError::Base64)?;
    let plain = Aes128EcbDec::new(&SAVE_KEY.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&sealed)
        .map_err(|_| PersistenceError::Cipher)?;
    let text = String::from_utf8(plain).map_err(|_| PersistenceError::Utf8)?;

    let mut data = SaveData::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = || PersistenceError::Malformed(line.to_string());
        let (key, value) = line.split_once('=').ok_or_else(malformed)?;
        if key == MONEY_KEY {
            data.balance = value.trim().parse().map_err(|_| malformed())?;
            continue;
        }
        let count: u32 = value.trim().parse().map_err(|_| malformed())?;
        match key.parse::<Powerup>() {
            Ok(item) => data.inventory.set(item, count),
            Err(e) => log::warn!("skipping save entry: {}", e),
        }
    }
    Ok(data)
}

/// Backing storage for the encoded save slot.
pub trait SaveStore {
    /// The stored blob, or `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the stored blob.
    fn write(&mut self, blob: &str) -> Result<(), PersistenceError>;
}

/// Load the save slot, falling back to a fresh wallet on any failure.
pub fn load<S: SaveStore + ?Sized>(store: &S) -> SaveData {
    match store.read().and_then(|blob| blob.map(|b| decode(&b)).transpose()) {
        Ok(Some(data)) => {
            log::info!("loaded save: balance {}", data.balance);
            data
        }
        Ok(None) => {
            log::info!("no save found, starting fresh");
            SaveData::default()
        }
        Err(e) => {
            log::warn!("save file corrupted or invalid ({}), starting fresh", e);
            SaveData::default()
        }
    }
}

/// Write the save slot. Failures are logged and otherwise ignored.
pub fn save<S: SaveStore + ?Sized>(store: &mut S, data: &SaveData) {
    match store.write(&encode(data)) {
        Ok(()) => log::debug!("saved: balance {}", data.balance),
        Err(e) => log::error!("failed to save game data: {}", e),
    }
}

/// Save slot held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `data`.
    pub fn with_data(data: &SaveData) -> Self {
        Self::with_blob(encode(data))
    }

    /// A store holding a raw blob, which need not be valid.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            writes: 0,
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.blob = Some(blob.into());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::FileStore;

#[cfg(feature = "std")]
mod file {
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};
    use std::{fs, string::String};

    use super::{PersistenceError, SaveStore};
    use crate::config::SAVE_FILE;

    /// Save slot stored in a file on disk.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl Default for FileStore {
        fn default() -> Self {
            Self::new(SAVE_FILE)
        }
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Delete the save file. A missing file is not an error.
        pub fn clear(&self) -> Result<(), PersistenceError> {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(&self.path, e)),
                _ => Ok(()),
            }
        }
    }

    fn io_error(path: &Path, e: std::io::Error) -> PersistenceError {
        PersistenceError::Io(std::format!("{}: {}", path.display(), e))
    }

    impl SaveStore for FileStore {
        fn read(&self) -> Result<Option<String>, PersistenceError> {
            match fs::read_to_string(&self.path) {
                Ok(blob) => Ok(Some(blob)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(io_error(&self.path, e)),
            }
        }

        fn write(&mut self, blob: &str) -> Result<(), PersistenceError> {
            fs::write(&self.path, blob).map_err(|e| io_error(&self.path, e))
        }
    }
}
