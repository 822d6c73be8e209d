// file: src/session/upload.rs
// description: scoped temporary staging for uploaded bytes
// reference: https://docs.rs/tempfile

use crate::error::IngestError;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

const STAGING_PREFIX: &str = "docqa-upload-";

/// Upload bytes spooled to a temporary file. The file is removed when the
/// value is dropped, whichever way ingestion ends.
pub struct StagedUpload {
    filename: String,
    file: NamedTempFile,
    size: u64,
}

impl StagedUpload {
    /// Copy at most `limit` bytes from `reader` into a fresh temp file.
    /// A `limit` of 0 means unbounded.
    pub fn from_reader<R: Read>(
        mut reader: R,
        filename: &str,
        limit: u64,
        staging_dir: Option<&Path>,
    ) -> Result<Self, IngestError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);

        let mut file = match staging_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        let size = if limit > 0 {
            let copied = std::io::copy(&mut (&mut reader).take(limit + 1), &mut file)?;
            if copied > limit {
                return Err(IngestError::FileTooLarge {
                    size: copied,
                    limit,
                });
            }
            copied
        } else {
            std::io::copy(&mut reader, &mut file)?
        };
        file.flush()?;

        debug!(
            "Staged {} ({} bytes) at {}",
            filename,
            size,
            file.path().display()
        );

        Ok(Self {
            filename: filename.to_string(),
            file,
            size,
        })
    }

    pub fn from_path(path: &Path, limit: u64, staging_dir: Option<&Path>) -> Result<Self, IngestError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = std::fs::File::open(path)?;
        Self::from_reader(source, &filename, limit, staging_dir)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>, IngestError> {
        let mut bytes = Vec::with_capacity(self.size as usize);
        let handle = self.file.as_file_mut();
        handle.seek(SeekFrom::Start(0))?;
        handle.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stage_and_read_back() {
        let dir = TempDir::new().unwrap();
        let mut staged =
            StagedUpload::from_reader(&b"hello world"[..], "hello.txt", 1024, Some(dir.path()))
                .unwrap();

        assert_eq!(staged.filename(), "hello.txt");
        assert_eq!(staged.size(), 11);
        assert!(staged.path().starts_with(dir.path()));
        assert_eq!(staged.read_bytes().unwrap(), b"hello world".to_vec());
    }

    #[test]
    fn test_staged_file_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let staged =
            StagedUpload::from_reader(&b"bytes"[..], "a.txt", 0, Some(dir.path())).unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());

        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn test_limit_enforced_and_nothing_left_behind() {
        let dir = TempDir::new().unwrap();
        let data = vec![b'x'; 64];

        let result = StagedUpload::from_reader(&data[..], "big.txt", 16, Some(dir.path()));
        assert!(matches!(
            result,
            Err(IngestError::FileTooLarge { size: 17, limit: 16 })
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_exact_limit_accepted() {
        let data = vec![b'x'; 16];
        let staged = StagedUpload::from_reader(&data[..], "ok.txt", 16, None).unwrap();
        assert_eq!(staged.size(), 16);
    }

    #[test]
    fn test_from_path_keeps_filename() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("notes.TXT");
        std::fs::write(&source, "some notes").unwrap();

        let mut staged = StagedUpload::from_path(&source, 0, Some(dir.path())).unwrap();
        assert_eq!(staged.filename(), "notes.TXT");
        assert_eq!(staged.read_bytes().unwrap(), b"some notes".to_vec());
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let result = StagedUpload::from_path(Path::new("/definitely/not/here.txt"), 0, None);
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
