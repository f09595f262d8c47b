use tracing::{debug, warn};

use crate::command::CommandBlock;
use crate::error::DeviceResult;
use crate::memory::GuestMemory;

use super::FileIoDevice;

impl FileIoDevice {
    /// Write guest bytes to the host file. A successful write always
    /// reports the full requested size.
    pub(crate) fn cmd_write(
        &mut self,
        mem: &mut dyn GuestMemory,
        cmd: &CommandBlock,
    ) -> DeviceResult<i32> {
        let addr = cmd.param(mem, 0)?;
        let size = cmd.param(mem, 1)?;

        let Some(file) = self.file.as_mut() else {
            // The guest-visible contract for write on a closed device is a
            // plain 0, not an error code.
            warn!(device = %self.name, "write on closed device");
            return Ok(0);
        };

        let data = mem.read_bytes(addr, size as usize)?;
        file.write_all(data)?;
        debug!(
            device = %self.name,
            addr = format_args!("{addr:#010x}"),
            size,
            "write"
        );
        Ok(size as i32)
    }
}
