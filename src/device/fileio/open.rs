use tracing::info;

use crate::command::CommandBlock;
use crate::error::{DeviceError, DeviceResult};
use crate::hostfs::AccessMode;
use crate::memory::GuestMemory;

use super::FileIoDevice;

impl FileIoDevice {
    /// Attach the backing host file. Success reports the device id; a
    /// missing path reports the guest's "not found" code.
    pub(crate) fn cmd_open(
        &mut self,
        mem: &mut dyn GuestMemory,
        cmd: &CommandBlock,
    ) -> DeviceResult<i32> {
        let raw_mode = cmd.param(mem, 0)?;
        let mode = AccessMode::from_raw(raw_mode).ok_or(DeviceError::Unsupported {
            what: "open mode",
            value: raw_mode,
        })?;

        let path = Self::build_path(&self.fs, self.name.as_bytes())?;
        info!(device = %self.name, mode = mode.label(), path = %path.display(), "open");

        // Replacing an already-open handle drops (and closes) the old one,
        // keeping at most one outstanding handle per device.
        self.file = Some(self.fs.open(&path, mode)?);
        Ok(self.id as i32)
    }
}
