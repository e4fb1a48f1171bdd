//! The board shell: one open board with its storage and autosave.
//!
//! [`Board`] wires the [`Session`] to the outside world. Input and commands
//! go through it so every change reaches the status line and the autosave
//! scheduler. The session sits behind an `Arc<Mutex<_>>` only so the
//! autosave task can take a snapshot when a save starts; all mutation
//! happens on the caller's thread.

use crate::autosave::{AutosaveScheduler, SaveFn, SaveFuture};
use crate::document::ByteUsage;
use crate::error::{BoardError, BoardResult};
use crate::input::{InputEvent, InputOutcome};
use crate::perf::{OperationStats, SLOW_SAVE_MS, ScopedTimer};
use crate::persistence::{JsonStore, Persistence, Storage};
use crate::resources::{ResourceProbe, is_board_path, is_image_path};
use crate::session::{Change, ClipboardImage, Session};
use crate::settings::AppSettings;
use crate::status::{StatusLine, StatusMessage, StatusSink};
use crate::types::{Document, ItemId};
use chrono::Local;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// What a file drop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Imported(PathBuf),
    Added(Vec<ItemId>),
    Nothing,
}

/// Everything a save needs, shared with the autosave task.
struct SaveContext<P> {
    session: Arc<Mutex<Session>>,
    storage: Arc<Mutex<Storage>>,
    store: Arc<P>,
    stats: Arc<Mutex<OperationStats>>,
}

impl<P> Clone for SaveContext<P> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            storage: self.storage.clone(),
            store: self.store.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<P: Persistence> SaveContext<P> {
    /// Snapshot the session and write it to the current save path.
    async fn save(&self) -> BoardResult<PathBuf> {
        let path = self
            .storage
            .lock()
            .current_save_path()
            .ok_or(BoardError::NoSaveLocation)?;
        let snapshot = self.session.lock().snapshot();

        let timer = ScopedTimer::new("board_save", SLOW_SAVE_MS);
        self.store.save(snapshot, path.clone()).await?;
        self.stats.lock().record(timer.elapsed_ms());

        self.storage.lock().mark_saved(Local::now());
        Ok(path)
    }
}

pub struct Board<P: Persistence = JsonStore> {
    ctx: SaveContext<P>,
    autosave: AutosaveScheduler,
    resources: Arc<dyn ResourceProbe>,
    status: Arc<dyn StatusSink>,
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    message: String,
}

impl<P: Persistence> Board<P> {
    /// Open `document`. Autosave timers run on `runtime`.
    pub fn new(
        runtime: Handle,
        document: Document,
        settings: AppSettings,
        store: P,
        resources: Arc<dyn ResourceProbe>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        let ctx = SaveContext {
            session: Arc::new(Mutex::new(Session::new(document).with_settings(&settings))),
            storage: Arc::new(Mutex::new(Storage::from_settings(&settings))),
            store: Arc::new(store),
            stats: Arc::new(Mutex::new(OperationStats::default())),
        };

        let save_ctx = ctx.clone();
        let save: SaveFn = Arc::new(move || -> SaveFuture {
            let ctx = save_ctx.clone();
            Box::pin(async move { ctx.save().await.map(|_| ()) })
        });

        let autosave = AutosaveScheduler::new(
            runtime,
            save,
            status.clone(),
            settings.save_debounce(),
            settings.autosave_kick(),
        )
        .with_enabled(settings.autosave);

        Self {
            ctx,
            autosave,
            resources,
            status,
            settings,
            settings_path: None,
            message: "Ready".to_string(),
        }
    }

    /// Write settings changes (save location, autosave) back to `path`.
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    // ==================== Accessors ====================

    /// Shared handle to the session, for rendering.
    pub fn session(&self) -> Arc<Mutex<Session>> {
        self.ctx.session.clone()
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave.is_enabled()
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    pub fn save_path(&self) -> Option<PathBuf> {
        self.ctx.storage.lock().current_save_path()
    }

    pub fn save_stats(&self) -> OperationStats {
        self.ctx.stats.lock().clone()
    }

    pub fn status_line(&self) -> String {
        let storage = self.ctx.storage.lock();
        let path = storage.current_save_path();
        StatusLine {
            message: &self.message,
            save_path: path.as_deref(),
            autosave: self.autosave.is_enabled(),
            last_saved: storage.last_saved(),
        }
        .render()
    }

    // ==================== Session access ====================

    /// Run `f` against the session, then publish whatever it changed.
    pub fn with_session<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        let (result, changes) = {
            let mut session = self.ctx.session.lock();
            let result = f(&mut session);
            (result, session.take_changes())
        };
        self.publish(changes);
        result
    }

    pub fn dispatch(&mut self, event: InputEvent) -> InputOutcome {
        self.with_session(|session| session.dispatch(event))
    }

    fn publish(&mut self, changes: Vec<Change>) {
        if changes.is_empty() {
            return;
        }
        if let Some(change) = changes.iter().rev().find(|c| !c.autosave_only) {
            self.message = change.reason.label();
        }
        self.autosave.notify_dirty();
    }

    fn report_error(&mut self, error: &BoardError) {
        warn!(error = %error, "Board operation failed");
        self.message = error.to_string();
        self.status.report(StatusMessage::error(error.to_string()));
    }

    /// A settings write failure is reported but never undoes the change.
    fn persist_settings(&mut self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            warn!(path = %path.display(), error = %e, "Failed to save settings");
            self.status
                .report(StatusMessage::error(format!("Settings not saved: {e}")));
        }
    }

    fn report_info(&mut self, text: String) {
        self.status.report(StatusMessage::info(text.clone()));
        self.message = text;
    }

    // ==================== Items ====================

    pub fn add_images(&mut self, paths: &[PathBuf]) -> Vec<ItemId> {
        let resources = self.resources.clone();
        self.with_session(|session| session.add_images(paths, resources.as_ref()))
    }

    /// Clipboard payload for the selection. Errors are also reported.
    pub fn copy_selected(&mut self) -> BoardResult<Option<ClipboardImage>> {
        let result = self
            .ctx
            .session
            .lock()
            .copy_selected(self.resources.as_ref());
        match &result {
            Ok(Some(_)) => self.message = "Copied".to_string(),
            Ok(None) => {}
            Err(e) => self.report_error(e),
        }
        result
    }

    /// Store pasted PNG bytes and add them as an item.
    pub fn paste_png(&mut self, png: &[u8]) -> BoardResult<ItemId> {
        let stored = self.ctx.storage.lock().save_pasted_png(png);
        let path = match stored {
            Ok(path) => path,
            Err(e) => {
                self.report_error(&e);
                return Err(e);
            }
        };
        let resources = self.resources.clone();
        Ok(self.with_session(|session| session.add_image(path, resources.as_ref())))
    }

    pub fn byte_usage(&mut self) -> ByteUsage {
        let resources = self.resources.clone();
        self.ctx.session.lock().byte_usage(resources.as_ref())
    }

    // ==================== Files ====================

    /// Handle files dropped on the canvas: a board is imported, images are
    /// added.
    pub async fn drop_paths(&mut self, paths: &[PathBuf]) -> BoardResult<DropOutcome> {
        if let Some(board) = paths.iter().find(|p| is_board_path(p)) {
            self.import(board).await?;
            return Ok(DropOutcome::Imported(board.clone()));
        }

        let images: Vec<PathBuf> = paths.iter().filter(|p| is_image_path(p)).cloned().collect();
        if images.is_empty() {
            return Ok(DropOutcome::Nothing);
        }
        Ok(DropOutcome::Added(self.add_images(&images)))
    }

    /// Replace the document with one read from `path`. On failure the
    /// current document stays and the error is reported.
    pub async fn import(&mut self, path: &Path) -> BoardResult<()> {
        match self.ctx.store.load(path.to_path_buf()).await {
            Ok(document) => {
                self.with_session(|session| session.replace_document(document));
                info!(path = %path.display(), "Imported board");
                Ok(())
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Write a snapshot to an arbitrary path.
    pub async fn export(&mut self, path: &Path) -> BoardResult<()> {
        let snapshot = self.ctx.session.lock().snapshot();
        match self.ctx.store.save(snapshot, path.to_path_buf()).await {
            Ok(()) => {
                self.report_info(format!("Exported to {}", path.display()));
                Ok(())
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Save now to the current location.
    pub async fn save_now(&mut self) -> BoardResult<PathBuf> {
        self.autosave.cancel();
        match self.ctx.save().await {
            Ok(path) => {
                self.report_info("Saved".to_string());
                Ok(path)
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Write out a pending autosave. Call before dropping the board, whose
    /// scheduler otherwise discards it.
    pub async fn close(&mut self) -> BoardResult<()> {
        match self.autosave.flush().await {
            Ok(()) => {
                info!("Board closed");
                Ok(())
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    pub fn set_save_location(&mut self, folder: impl Into<PathBuf>, file_name: &str) -> BoardResult<PathBuf> {
        let result = self.ctx.storage.lock().set_folder(folder, file_name);
        match result {
            Ok(path) => {
                let storage = self.ctx.storage.lock();
                self.settings.save_folder = storage.folder().map(Path::to_path_buf);
                self.settings.file_name = storage.file_name().to_string();
                drop(storage);
                self.persist_settings();
                self.report_info(format!("Save location: {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Flip autosave. Returns the new state.
    pub fn toggle_autosave(&mut self) -> bool {
        let enabled = !self.autosave.is_enabled();
        self.settings.autosave = enabled;
        self.autosave.set_enabled(enabled);
        self.persist_settings();
        self.message = if enabled { "Autosave on" } else { "Autosave off" }.to_string();
        enabled
    }
}
