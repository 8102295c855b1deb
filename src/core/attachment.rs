use serde::{Deserialize, Serialize};

/// Metadata of a user-selected file. The file itself is never read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Human-readable size for the attachment chip.
    pub fn display_size(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        match self.size_bytes {
            n if n < KB => format!("{} B", n),
            n if n < MB => format!("{:.1} KB", n as f64 / KB as f64),
            n => format!("{:.1} MB", n as f64 / MB as f64),
        }
    }
}

/// Holds at most one file staged for the next outgoing message.
#[derive(Debug, Default)]
pub struct AttachmentHolder {
    staged: Option<FileRef>,
}

impl AttachmentHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `file`, replacing whatever was staged before.
    pub fn stage(&mut self, file: FileRef) -> &FileRef {
        self.staged.insert(file)
    }

    pub fn clear(&mut self) {
        self.staged = None;
    }

    pub fn current(&self) -> Option<&FileRef> {
        self.staged.as_ref()
    }
}
