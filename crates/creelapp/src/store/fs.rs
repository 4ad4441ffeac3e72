use super::catch_store::CatchStore;
use super::fs_backend::FsBackend;
use crate::config::CreelConfig;
use std::path::PathBuf;

pub type FileStore = CatchStore<FsBackend>;

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        CatchStore::with_backend(FsBackend::new(data_dir))
    }

    /// Store over `data_dir` with the file names from `config`.
    pub fn from_config(data_dir: PathBuf, config: &CreelConfig) -> Self {
        let backend = FsBackend::new(data_dir)
            .with_table_file(&config.table_file)
            .with_photos_dir(&config.photos_dir);
        CatchStore::with_backend(backend)
    }
}
