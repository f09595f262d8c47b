use tracing::debug;

use crate::command::CommandBlock;
use crate::error::{DeviceError, DeviceResult};
use crate::memory::GuestMemory;

use super::FileIoDevice;

impl FileIoDevice {
    /// Reposition the host file, reporting the resulting absolute
    /// position. Only seeking from the start is part of the protocol.
    pub(crate) fn cmd_seek(
        &mut self,
        mem: &mut dyn GuestMemory,
        cmd: &CommandBlock,
    ) -> DeviceResult<i32> {
        let position = cmd.param(mem, 0)?;
        let whence = cmd.param(mem, 1)?;

        let file = self.file.as_mut().ok_or(DeviceError::NotOpen)?;
        match whence {
            0 => {
                let reached = file.seek_from_start(position)?;
                debug!(device = %self.name, position = reached, "seek");
                Ok(reached as i32)
            }
            // 1 = current, 2 = end
            other => Err(DeviceError::Unsupported {
                what: "seek whence",
                value: other,
            }),
        }
    }
}
