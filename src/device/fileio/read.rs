use tracing::debug;

use crate::command::CommandBlock;
use crate::error::{DeviceError, DeviceResult};
use crate::memory::{GuestMemory, MemoryError};

use super::FileIoDevice;

impl FileIoDevice {
    /// Read up to the requested size into guest memory, reporting the
    /// bytes actually read. Short reads at EOF are not an error.
    pub(crate) fn cmd_read(
        &mut self,
        mem: &mut dyn GuestMemory,
        cmd: &CommandBlock,
    ) -> DeviceResult<i32> {
        let addr = cmd.param(mem, 0)?;
        let size = cmd.param(mem, 1)?;

        let file = self.file.as_mut().ok_or(DeviceError::NotOpen)?;

        // Refuse before touching the file, so a bad destination neither
        // moves the file position nor sizes an allocation off a guest word.
        if !mem.covers(addr, size as usize) {
            return Err(DeviceError::Memory(MemoryError::Unmapped {
                addr,
                len: size as usize,
            }));
        }

        let data = file.read_up_to(size)?;
        mem.write_bytes(addr, &data)?;
        debug!(
            device = %self.name,
            addr = format_args!("{addr:#010x}"),
            size,
            read = data.len(),
            "read"
        );
        Ok(data.len() as i32)
    }
}
