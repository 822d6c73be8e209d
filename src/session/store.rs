// file: src/session/store.rs
// description: session-keyed store of active documents
// reference: one active document per session, replaced by atomic swap

use crate::config::Config;
use crate::error::{QaError, Result};
use crate::models::{Answer, DocumentFormat};
use crate::pipeline::{LoadedDocument, QaEngine};
use crate::session::upload::StagedUpload;
use crate::utils::Validator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub session: SessionId,
    pub filename: String,
    pub format: DocumentFormat,
    pub passages: usize,
    pub vocabulary: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl SessionStatus {
    pub fn format_line(&self) -> String {
        format!(
            "{} ({}) | {} passages, {} terms | uploaded {}",
            self.filename,
            self.format,
            self.passages,
            self.vocabulary,
            self.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

type Slot = Option<Arc<LoadedDocument>>;

pub struct SessionStore {
    engine: Arc<QaEngine>,
    staging_dir: Option<PathBuf>,
    sessions: RwLock<HashMap<SessionId, Slot>>,
}

impl SessionStore {
    pub fn new(config: &Config) -> Self {
        Self::with_engine(
            Arc::new(QaEngine::new(config)),
            config.ingest.staging_dir.clone(),
        )
    }

    pub fn with_engine(engine: Arc<QaEngine>, staging_dir: Option<PathBuf>) -> Self {
        Self {
            engine,
            staging_dir,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &Arc<QaEngine> {
        &self.engine
    }

    pub fn create(&self) -> SessionId {
        let id = SessionId::new();
        self.write().insert(id, None);
        debug!("Created session {}", id);
        id
    }

    /// Build a new index for `bytes` and make it the session's active
    /// document. On error the previous document stays active.
    pub fn upload(
        &self,
        session: &SessionId,
        bytes: &[u8],
        filename: &str,
    ) -> Result<Arc<LoadedDocument>> {
        self.ensure_exists(session)?;
        let loaded = self.engine.load(bytes, filename)?;
        self.install(session, loaded)
    }

    /// Stage `reader` in a temp file, then upload it. The staged file is gone
    /// by the time this returns.
    pub fn upload_reader<R: Read>(
        &self,
        session: &SessionId,
        reader: R,
        filename: &str,
    ) -> Result<Arc<LoadedDocument>> {
        self.ensure_exists(session)?;
        Validator::validate_filename(filename)?;

        let staged = StagedUpload::from_reader(
            reader,
            filename,
            self.engine.max_upload_bytes(),
            self.staging_dir.as_deref(),
        )?;
        let loaded = self.load_staged(staged)?;
        self.install(session, loaded)
    }

    pub fn upload_path(&self, session: &SessionId, path: &Path) -> Result<Arc<LoadedDocument>> {
        self.ensure_exists(session)?;
        let loaded = self.prepare_path(path)?;
        self.install(session, loaded)
    }

    /// Stage and build a document from disk without touching any session.
    pub fn prepare_path(&self, path: &Path) -> Result<LoadedDocument> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Validator::validate_filename(&filename)?;

        let staged = StagedUpload::from_path(
            path,
            self.engine.max_upload_bytes(),
            self.staging_dir.as_deref(),
        )?;
        self.load_staged(staged)
    }

    /// Make an already built document the session's active one.
    pub fn install(
        &self,
        session: &SessionId,
        loaded: LoadedDocument,
    ) -> Result<Arc<LoadedDocument>> {
        let loaded = Arc::new(loaded);
        self.swap(session, Arc::clone(&loaded))?;
        Ok(loaded)
    }

    /// Current document of the session, if one has been uploaded.
    pub fn active(&self, session: &SessionId) -> Result<Option<Arc<LoadedDocument>>> {
        self.read()
            .get(session)
            .cloned()
            .ok_or_else(|| QaError::UnknownSession(session.to_string()))
    }

    /// Answer against the document active when the call started. A session
    /// with no document answers with confidence `none`.
    pub fn ask(&self, session: &SessionId, question: &str) -> Result<Answer> {
        let answer = match self.active(session)? {
            Some(loaded) => self.engine.answer(&loaded.index, question),
            None => Answer::none(),
        };
        Ok(answer)
    }

    pub fn status(&self, session: &SessionId) -> Result<Option<SessionStatus>> {
        Ok(self.active(session)?.map(|loaded| {
            let stats = loaded.index.stats();
            SessionStatus {
                session: *session,
                filename: loaded.document.filename.clone(),
                format: loaded.document.format,
                passages: stats.passages,
                vocabulary: stats.vocabulary,
                uploaded_at: loaded.document.uploaded_at,
            }
        }))
    }

    /// Drop the session and its document. Returns false for unknown ids.
    pub fn end(&self, session: &SessionId) -> bool {
        let removed = self.write().remove(session).is_some();
        if removed {
            debug!("Ended session {}", session);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn ensure_exists(&self, session: &SessionId) -> Result<()> {
        if self.read().contains_key(session) {
            Ok(())
        } else {
            Err(QaError::UnknownSession(session.to_string()))
        }
    }

    /// The temp file is removed as soon as its bytes are in memory, before
    /// segmentation and indexing run.
    fn load_staged(&self, staged: StagedUpload) -> Result<LoadedDocument> {
        let (filename, bytes) = release_staged(staged)?;
        Ok(self.engine.load(&bytes, &filename)?)
    }

    fn swap(&self, session: &SessionId, loaded: Arc<LoadedDocument>) -> Result<()> {
        let mut sessions = self.write();
        let slot = sessions
            .get_mut(session)
            .ok_or_else(|| QaError::UnknownSession(session.to_string()))?;

        let previous = slot.replace(Arc::clone(&loaded));
        drop(sessions);

        match previous {
            Some(old) => info!(
                "Session {}: replaced {} with {}",
                session, old.document.filename, loaded.document.filename
            ),
            None => info!("Session {}: loaded {}", session, loaded.document.filename),
        }
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<SessionId, Slot>> {
        self.sessions.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<SessionId, Slot>> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Pull the bytes out of a staged upload and delete its temp file.
fn release_staged(mut staged: StagedUpload) -> Result<(String, Vec<u8>)> {
    debug!(
        "Reading {} staged bytes from {}",
        staged.size(),
        staged.path().display()
    );
    let bytes = staged.read_bytes()?;
    let filename = staged.filename().to_string();
    drop(staged);
    Ok((filename, bytes))
}
