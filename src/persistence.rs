//! Reading and writing boards.
//!
//! [`Persistence`] is the async save/load seam; [`JsonStore`] implements it
//! with atomic JSON writes (temp file in the target directory, then rename).
//! [`Storage`] tracks where the current board lives and where pasted images
//! go.

use crate::constants::{APP_DIR_NAME, DEFAULT_FILE_NAME};
use crate::error::{BoardError, BoardResult};
use crate::settings::AppSettings;
use crate::types::Document;
use chrono::{DateTime, Local, Utc};
use std::fs;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Async save/load of whole documents.
pub trait Persistence: Send + Sync + 'static {
    fn save(
        &self,
        document: Document,
        path: PathBuf,
    ) -> impl Future<Output = BoardResult<()>> + Send;

    fn load(&self, path: PathBuf) -> impl Future<Output = BoardResult<Document>> + Send;
}

/// Pretty-printed JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl Persistence for JsonStore {
    async fn save(&self, document: Document, path: PathBuf) -> BoardResult<()> {
        let json = document.to_json()?;
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&target, json.as_bytes()))
            .await
            .map_err(|e| BoardError::io(&path, std::io::Error::other(e)))??;
        debug!(path = %path.display(), "Board written");
        Ok(())
    }

    async fn load(&self, path: PathBuf) -> BoardResult<Document> {
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| BoardError::io(&path, e))?;
        let document = Document::from_json(&json)?;
        info!(path = %path.display(), tabs = document.tabs.len(), "Board loaded");
        Ok(document)
    }
}

/// Write `bytes` to `path` so readers see either the old or the new file,
/// never a partial one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> BoardResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| BoardError::io(dir, e))?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| BoardError::io(dir, e))?;
    file.write_all(bytes).map_err(|e| BoardError::io(path, e))?;
    file.as_file().sync_all().map_err(|e| BoardError::io(path, e))?;
    file.persist(path).map_err(|e| BoardError::io(path, e.error))?;
    Ok(())
}

/// Blank names become `board.json`; `.json` is appended when missing.
pub fn normalize_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }
    if name.to_ascii_lowercase().ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    }
}

/// Where the current board is saved.
#[derive(Debug, Clone, Default)]
pub struct Storage {
    folder: Option<PathBuf>,
    file_name: String,
    last_saved: Option<DateTime<Local>>,
}

impl Storage {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            folder: settings.save_folder.clone(),
            file_name: normalize_file_name(&settings.file_name),
            last_saved: None,
        }
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the board file, once a folder is chosen.
    pub fn current_save_path(&self) -> Option<PathBuf> {
        self.folder.as_ref().map(|folder| folder.join(&self.file_name))
    }

    /// Choose the save folder and file name. Creates the folder.
    pub fn set_folder(&mut self, folder: impl Into<PathBuf>, file_name: &str) -> BoardResult<PathBuf> {
        let folder = folder.into();
        fs::create_dir_all(&folder).map_err(|e| BoardError::io(&folder, e))?;
        self.file_name = normalize_file_name(file_name);
        self.folder = Some(folder);
        info!(folder = ?self.folder, file = %self.file_name, "Save location set");
        Ok(self.folder.as_ref().map(|f| f.join(&self.file_name)).unwrap_or_default())
    }

    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }

    pub fn mark_saved(&mut self, at: DateTime<Local>) {
        self.last_saved = Some(at);
    }

    /// `<folder>/images`, or the per-user data dir when no folder is set.
    pub fn images_dir(&self) -> Option<PathBuf> {
        match &self.folder {
            Some(folder) => Some(folder.join("images")),
            None => dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("images")),
        }
    }

    /// Store pasted PNG bytes as `paste_<unix millis>.png`.
    pub fn save_pasted_png(&self, png: &[u8]) -> BoardResult<PathBuf> {
        let dir = self.images_dir().ok_or(BoardError::NoSaveLocation)?;
        fs::create_dir_all(&dir).map_err(|e| BoardError::io(&dir, e))?;

        let millis = Utc::now().timestamp_millis();
        let mut path = dir.join(format!("paste_{millis}.png"));
        let mut n = 1;
        while path.exists() {
            path = dir.join(format!("paste_{millis}_{n}.png"));
            n += 1;
        }

        fs::write(&path, png).map_err(|e| BoardError::io(&path, e))?;
        debug!(path = %path.display(), bytes = png.len(), "Pasted image stored");
        Ok(path)
    }
}
