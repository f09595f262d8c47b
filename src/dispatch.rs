use tracing::{debug, warn};

use crate::command::{self, Command, CommandBlock};
use crate::device::DeviceRegistry;
use crate::error::{DeviceError, DeviceResult};
use crate::memory::GuestMemory;

/// Routes guest command buffers to the devices they address.
pub struct Dispatcher {
    registry: DeviceRegistry,
}

impl Dispatcher {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self { registry }
    }

    pub fn registry_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }

    /// Service one command buffer. A result code is written at the
    /// protocol offset on every path; when the guest hands an address
    /// where even the result word is unreachable, the failure is logged
    /// and the write dropped.
    pub fn dispatch(&mut self, mem: &mut dyn GuestMemory, addr: u32) {
        let code = match self.execute(mem, addr) {
            Ok(code) => code,
            Err(err) => {
                warn!(addr = format_args!("{addr:#010x}"), %err, "command failed");
                err.result_code()
            }
        };
        if let Err(err) = command::write_result(mem, addr, code) {
            warn!(addr = format_args!("{addr:#010x}"), %err, "result word unreachable");
        }
    }

    fn execute(&mut self, mem: &mut dyn GuestMemory, addr: u32) -> DeviceResult<i32> {
        let cmd = CommandBlock::map(mem, addr)?;
        let raw = cmd.command(mem)?;
        let operation = Command::from_raw(raw).ok_or(DeviceError::Unsupported {
            what: "command",
            value: raw,
        })?;
        let id = cmd.device_id(mem)?;
        let device = self
            .registry
            .resolve(id)
            .ok_or(DeviceError::UnknownDevice(id))?;
        debug!(device = device.name(), ?operation, "dispatch");

        match operation {
            Command::Open => device.open(mem, &cmd),
            Command::Close => device.close(mem, &cmd),
            Command::Read => device.read(mem, &cmd),
            Command::Write => device.write(mem, &cmd),
            Command::Seek => device.seek(mem, &cmd),
            Command::Ioctl => device.ioctl(mem, &cmd),
        }
    }
}
