use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while CatchStore handles the "what" (decoding, caching, id assignment).
pub trait StorageBackend {
    // --- Table Operations ---

    /// Read the raw catch table.
    /// Returns Ok(None) if no table has been written yet.
    fn read_table(&self) -> Result<Option<String>>;

    /// Replace the catch table.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    /// A target that cannot be written because another program holds it
    /// MUST surface as `CreelError::StoreLocked`.
    fn write_table(&self, content: &str) -> Result<()>;

    /// Location of the table, for messages.
    fn table_path(&self) -> PathBuf;

    // --- Photo Operations ---

    /// Write a photo under the attachments directory and return its reference.
    /// Photos are write-once; an existing file with the same name is replaced.
    fn write_photo(&self, file_name: &str, bytes: &[u8]) -> Result<String>;

    /// Whether a photo reference resolves to stored content.
    fn photo_exists(&self, reference: &str) -> bool;

    /// Resolve a photo reference to a path.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn photo_path(&self, reference: &str) -> PathBuf;
}
