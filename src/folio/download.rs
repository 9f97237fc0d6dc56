//! Download side channel: named text files handed to the user.
//!
//! Two sinks: a plain directory, or a single `.tar.gz` written when the sink is
//! finished.

use crate::error::{FolioError, Result};
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait Sink {
    /// Offer one file. `name` is a bare file name.
    fn offer(&mut self, name: &str, content: &str) -> Result<()>;
    /// Flush everything and return where it went.
    fn finish(self: Box<Self>) -> Result<PathBuf>;
}

pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(FolioError::Io)?;
        Ok(Self { dir })
    }
}

impl Sink for DirSink {
    fn offer(&mut self, name: &str, content: &str) -> Result<()> {
        fs::write(self.dir.join(safe_name(name)), content).map_err(FolioError::Io)
    }

    fn finish(self: Box<Self>) -> Result<PathBuf> {
        let this = *self;
        Ok(this.dir)
    }
}

pub struct ArchiveSink<W: Write> {
    path: PathBuf,
    tar: tar::Builder<GzEncoder<W>>,
}

impl ArchiveSink<File> {
    /// Create `<dir>/folio-<timestamp>.tar.gz`.
    pub fn in_dir(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(FolioError::Io)?;
        let filename = format!("folio-{}.tar.gz", Utc::now().format("%Y-%m-%d_%H-%M-%S"));
        let path = dir.join(filename);
        let file = File::create(&path).map_err(FolioError::Io)?;
        Ok(Self::new(file, path))
    }
}

impl<W: Write> ArchiveSink<W> {
    pub fn new(writer: W, path: PathBuf) -> Self {
        let enc = GzEncoder::new(writer, Compression::default());
        Self {
            path,
            tar: tar::Builder::new(enc),
        }
    }

    fn append(&mut self, name: &str, content: &str) -> Result<()> {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(Utc::now().timestamp().max(0) as u64);
        header.set_cksum();

        self.tar
            .append_data(&mut header, format!("site/{}", safe_name(name)), content.as_bytes())
            .map_err(FolioError::Io)
    }

    /// Close the archive and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        let enc = self.tar.into_inner().map_err(FolioError::Io)?;
        enc.finish().map_err(FolioError::Io)
    }
}

impl<W: Write> Sink for ArchiveSink<W> {
    fn offer(&mut self, name: &str, content: &str) -> Result<()> {
        self.append(name, content)
    }

    fn finish(self: Box<Self>) -> Result<PathBuf> {
        let this = *self;
        let path = this.path.clone();
        this.into_inner()?;
        Ok(path)
    }
}

fn safe_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn dir_sink_writes_files() {
        let dir = tempdir().unwrap();
        let mut sink = Box::new(DirSink::new(dir.path().join("out")).unwrap());
        sink.offer("projects.json", "{}").unwrap();
        let path = sink.finish().unwrap();
        assert_eq!(fs::read_to_string(path.join("projects.json")).unwrap(), "{}");
    }

    #[test]
    fn archive_sink_produces_readable_tar_gz() {
        let mut sink = ArchiveSink::new(Vec::new(), PathBuf::from("mem.tar.gz"));
        sink.offer("project-villa.html", "<html></html>").unwrap();
        let bytes = sink.into_inner().unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

        let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
        let mut entry = archive.entries().unwrap().next().unwrap().unwrap();
        assert_eq!(
            entry.path().unwrap().to_str().unwrap(),
            "site/project-villa.html"
        );
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "<html></html>");
    }

    #[test]
    fn names_are_flattened() {
        assert_eq!(safe_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(safe_name("project-a_1.html"), "project-a_1.html");
    }
}
