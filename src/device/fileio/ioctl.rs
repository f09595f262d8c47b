use tracing::debug;

use crate::command::CommandBlock;
use crate::error::{DeviceError, DeviceResult};
use crate::memory::{GuestMemory, MemoryError};

use super::FileIoDevice;

/// Report the cached file length and the current position.
pub const IOCTL_GET_FILE_STATS: u32 = 11;

impl FileIoDevice {
    /// Dispatch a device-specific control operation on the opcode word.
    pub(crate) fn cmd_ioctl(
        &mut self,
        mem: &mut dyn GuestMemory,
        cmd: &CommandBlock,
    ) -> DeviceResult<i32> {
        cmd.dump(mem);
        let opcode = cmd.param(mem, 0)?;

        let file = self.file.as_mut().ok_or(DeviceError::NotOpen)?;
        match opcode {
            IOCTL_GET_FILE_STATS => {
                let out = cmd.buffer_out(mem)?;
                if out.size < 8 {
                    return Err(DeviceError::Malformed("stats buffer shorter than payload"));
                }
                if !mem.covers(out.addr, 8) {
                    return Err(DeviceError::Memory(MemoryError::Unmapped {
                        addr: out.addr,
                        len: 8,
                    }));
                }
                let length = file.length();
                let position = file.tell()?;
                debug!(device = %self.name, length, position, "get file stats");
                mem.write_u32(out.addr, length)?;
                mem.write_u32(out.addr + 4, position)?;
                Ok(0)
            }
            other => Err(DeviceError::Unsupported {
                what: "ioctl opcode",
                value: other,
            }),
        }
    }
}
