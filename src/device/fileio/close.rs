use tracing::info;

use crate::command::CommandBlock;
use crate::error::DeviceResult;
use crate::memory::GuestMemory;

use super::FileIoDevice;

impl FileIoDevice {
    /// Release the host file if one is held. Idempotent; the guest always
    /// sees 0.
    pub(crate) fn cmd_close(
        &mut self,
        _mem: &mut dyn GuestMemory,
        _cmd: &CommandBlock,
    ) -> DeviceResult<i32> {
        if self.file.take().is_some() {
            info!(device = %self.name, "close");
        }
        Ok(0)
    }
}
