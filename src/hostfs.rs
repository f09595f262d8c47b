use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{DeviceError, DeviceResult};

/// Access mode the guest requests on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessMode {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(AccessMode::ReadOnly),
            2 => Some(AccessMode::WriteOnly),
            3 => Some(AccessMode::ReadWrite),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessMode::ReadOnly => "Read only",
            AccessMode::WriteOnly => "Write only",
            AccessMode::ReadWrite => "Read and Write",
        }
    }
}

/// Host-side view of the guest's storage, jailed under one root directory.
#[derive(Debug, Clone)]
pub struct HostFs {
    root: PathBuf,
}

impl HostFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collapse `.` and `..` segments and strip absolute prefixes, so the
    /// result is a relative path that cannot climb above its start.
    pub fn sanitize(raw: &str) -> PathBuf {
        let mut out = PathBuf::new();
        for component in Path::new(raw).components() {
            match component {
                Component::Normal(segment) => out.push(segment),
                Component::ParentDir => {
                    out.pop();
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        out
    }

    /// Join an already-sanitized relative path under the root, verifying
    /// the result stays inside it.
    pub fn resolve(&self, relative: &Path) -> DeviceResult<PathBuf> {
        let full = self.root.join(relative);
        if !full.starts_with(&self.root) {
            return Err(DeviceError::Malformed("path escapes the host root"));
        }
        Ok(full)
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Open an existing file. Write-only requests get a read/write handle
    /// so an existing file is never truncated.
    pub fn open(&self, path: &Path, mode: AccessMode) -> DeviceResult<HostFile> {
        if !path.exists() {
            return Err(DeviceError::NotFound);
        }
        let file = match mode {
            AccessMode::ReadOnly => OpenOptions::new().read(true).open(path)?,
            AccessMode::WriteOnly | AccessMode::ReadWrite => {
                OpenOptions::new().read(true).write(true).open(path)?
            }
        };
        let length = file.metadata()?.len() as u32;
        debug!(path = %path.display(), mode = mode.label(), length, "host file opened");
        Ok(HostFile { file, length })
    }
}

/// An open host file plus the byte length cached when it was opened.
#[derive(Debug)]
pub struct HostFile {
    file: File,
    length: u32,
}

impl HostFile {
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn tell(&mut self) -> DeviceResult<u32> {
        Ok(self.file.stream_position()? as u32)
    }

    pub fn seek_from_start(&mut self, position: u32) -> DeviceResult<u32> {
        Ok(self.file.seek(SeekFrom::Start(u64::from(position)))? as u32)
    }

    /// Read up to `len` bytes from the current position. Short at EOF.
    pub fn read_up_to(&mut self, len: u32) -> DeviceResult<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.file).take(u64::from(len)).read_to_end(&mut buf)?;
        Ok(buf)
    }

    pub fn write_all(&mut self, data: &[u8]) -> DeviceResult<()> {
        self.file.write_all(data)?;
        Ok(())
    }
}
