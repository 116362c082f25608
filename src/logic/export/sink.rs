//! Export Sinks
//!
//! The core only produces bytes; a sink decides where they go.

use std::io::Write;
use std::path::PathBuf;

/// Destination for exported content, addressed by filename
pub trait ExportSink {
    fn deliver(&mut self, filename: &str, content: &[u8]) -> std::io::Result<()>;
}

/// Writes each export as a file inside a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, filename: &str, content: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(filename);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(content)?;
        log::info!("Exported {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

/// Keeps exports in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, filename: &str, content: &[u8]) -> std::io::Result<()> {
        self.files.push((filename.to_string(), content.to_vec()));
        Ok(())
    }
}
