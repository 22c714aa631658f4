//! Output buffer for emitters, kept in memory or in a temporary file

use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Byte sink behind every emitter.
///
/// The disk variant holds an anonymous temporary file that the OS removes
/// when it is closed, whichever way the write ends.
#[derive(Debug)]
pub enum OutputBuffer {
    Memory(Vec<u8>),
    Disk(BufWriter<File>),
}

impl OutputBuffer {
    pub fn memory() -> Self {
        OutputBuffer::Memory(Vec::new())
    }

    /// Disk-backed buffer in `dir` (or the system temp directory).
    ///
    /// Falls back to memory when the temporary file cannot be created.
    pub fn disk(dir: Option<&Path>) -> Self {
        let file = match dir {
            Some(dir) => tempfile::tempfile_in(dir),
            None => tempfile::tempfile(),
        };
        match file {
            Ok(file) => {
                log::debug!("buffering output in a temporary file");
                OutputBuffer::Disk(BufWriter::new(file))
            }
            Err(e) => {
                log::warn!("cannot create temporary buffer file ({}), using memory", e);
                OutputBuffer::memory()
            }
        }
    }

    /// Memory or disk according to the caller's caching choice
    pub fn new(use_disk: bool, dir: Option<&Path>) -> Self {
        if use_disk {
            Self::disk(dir)
        } else {
            Self::memory()
        }
    }

    pub fn is_disk(&self) -> bool {
        matches!(self, OutputBuffer::Disk(_))
    }

    /// Everything written so far
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            OutputBuffer::Memory(data) => Ok(data),
            OutputBuffer::Disk(writer) => {
                let mut file = writer.into_inner().map_err(|e| e.into_error())?;
                file.seek(SeekFrom::Start(0))?;
                let mut data = Vec::new();
                file.read_to_end(&mut data)?;
                Ok(data)
            }
        }
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::memory()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputBuffer::Memory(data) => data.write(buf),
            OutputBuffer::Disk(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputBuffer::Memory(_) => Ok(()),
            OutputBuffer::Disk(writer) => writer.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_buffer() {
        let mut buffer = OutputBuffer::new(false, None);
        buffer.write_all(b"abc").unwrap();
        assert!(!buffer.is_disk());
        assert_eq!(buffer.into_bytes().unwrap(), b"abc");
    }

    #[test]
    fn test_disk_buffer_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = OutputBuffer::disk(Some(dir.path()));
        assert!(buffer.is_disk());
        buffer.write_all(b"hello ").unwrap();
        buffer.write_all(b"world").unwrap();
        assert_eq!(buffer.into_bytes().unwrap(), b"hello world");
        // the anonymous file leaves nothing behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_dir_falls_back_to_memory() {
        let buffer = OutputBuffer::disk(Some(Path::new("/nonexistent/linch-doc-rs")));
        assert!(!buffer.is_disk());
    }
}
