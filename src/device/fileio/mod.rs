mod close;
mod ioctl;
mod open;
mod read;
mod seek;
mod write;

pub use ioctl::IOCTL_GET_FILE_STATS;

use std::path::PathBuf;

use crate::command::CommandBlock;
use crate::device::Device;
use crate::error::DeviceResult;
use crate::hostfs::{HostFile, HostFs};
use crate::memory::GuestMemory;

/// Longest raw device name the guest protocol allows.
pub const NAME_LEN_MAX: usize = 128;

/// Emulated file device backed by at most one host file under the
/// configured root. Starts closed; `open` attaches the handle, `close` and
/// drop release it.
pub struct FileIoDevice {
    id: u32,
    name: String,
    fs: HostFs,
    file: Option<HostFile>,
}

impl FileIoDevice {
    pub fn new(id: u32, name: impl Into<String>, fs: HostFs) -> Self {
        Self {
            id,
            name: name.into(),
            fs,
            file: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Host path for a raw guest device name.
    ///
    /// The copy out of the raw buffer clamps to [`NAME_LEN_MAX`] and stops
    /// at the first NUL, so a maximal unterminated name is never read past
    /// its bound. A name whose second byte is '0' lives under the `title`
    /// subdirectory, a quirk of the guest's storage layout kept for
    /// compatibility.
    pub fn build_path(fs: &HostFs, raw_name: &[u8]) -> DeviceResult<PathBuf> {
        let bounded = &raw_name[..raw_name.len().min(NAME_LEN_MAX)];
        let name = match bounded.iter().position(|&b| b == 0) {
            Some(nul) => &bounded[..nul],
            None => bounded,
        };

        let mut relative = PathBuf::new();
        if name.get(1) == Some(&b'0') {
            relative.push("title");
        }
        relative.push(HostFs::sanitize(&String::from_utf8_lossy(name)));
        fs.resolve(&relative)
    }
}

impl Device for FileIoDevice {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self, mem: &mut dyn GuestMemory, cmd: &CommandBlock) -> DeviceResult<i32> {
        self.cmd_open(mem, cmd)
    }

    fn close(&mut self, mem: &mut dyn GuestMemory, cmd: &CommandBlock) -> DeviceResult<i32> {
        self.cmd_close(mem, cmd)
    }

    fn read(&mut self, mem: &mut dyn GuestMemory, cmd: &CommandBlock) -> DeviceResult<i32> {
        self.cmd_read(mem, cmd)
    }

    fn write(&mut self, mem: &mut dyn GuestMemory, cmd: &CommandBlock) -> DeviceResult<i32> {
        self.cmd_write(mem, cmd)
    }

    fn seek(&mut self, mem: &mut dyn GuestMemory, cmd: &CommandBlock) -> DeviceResult<i32> {
        self.cmd_seek(mem, cmd)
    }

    fn ioctl(&mut self, mem: &mut dyn GuestMemory, cmd: &CommandBlock) -> DeviceResult<i32> {
        self.cmd_ioctl(mem, cmd)
    }
}
