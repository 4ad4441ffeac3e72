use super::backend::StorageBackend;
use crate::error::{CreelError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_TABLE_FILE: &str = "catches.csv";
pub const DEFAULT_PHOTOS_DIR: &str = "photos";

pub struct FsBackend {
    root: PathBuf,
    table_file: String,
    photos_dir: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            table_file: DEFAULT_TABLE_FILE.to_string(),
            photos_dir: DEFAULT_PHOTOS_DIR.to_string(),
        }
    }

    pub fn with_table_file(mut self, name: &str) -> Self {
        self.table_file = name.to_string();
        self
    }

    pub fn with_photos_dir(mut self, name: &str) -> Self {
        self.photos_dir = name.trim_matches('/').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn photos_root(&self) -> PathBuf {
        self.root.join(&self.photos_dir)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CreelError::Io)?;
        }
        Ok(())
    }

    /// Maps write failures caused by another holder of the file to `StoreLocked`.
    fn write_error(&self, err: std::io::Error) -> CreelError {
        match err.kind() {
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
                CreelError::StoreLocked(self.table_path())
            }
            _ => CreelError::Io(err),
        }
    }
}

impl StorageBackend for FsBackend {
    fn read_table(&self) -> Result<Option<String>> {
        let path = self.table_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CreelError::Io)?;
        Ok(Some(content))
    }

    fn write_table(&self, content: &str) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let target = self.table_path();
        // The rename below would replace a read-only file without complaint
        if let Ok(meta) = fs::metadata(&target) {
            if meta.permissions().readonly() {
                return Err(CreelError::StoreLocked(target));
            }
        }

        // Atomic write
        let tmp = self.root.join(format!(".catches-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(|e| self.write_error(e))?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_error(e));
        }
        Ok(())
    }

    fn table_path(&self) -> PathBuf {
        self.root.join(&self.table_file)
    }

    fn write_photo(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let dir = self.photos_root();
        self.ensure_dir(&dir)?;
        fs::write(dir.join(file_name), bytes).map_err(CreelError::Io)?;
        Ok(format!("{}/{}", self.photos_dir, file_name))
    }

    fn photo_exists(&self, reference: &str) -> bool {
        !reference.trim().is_empty() && self.photo_path(reference).is_file()
    }

    fn photo_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
