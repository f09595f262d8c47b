pub mod fileio;

use std::collections::HashMap;

use tracing::debug;

use crate::command::{Command, CommandBlock};
use crate::error::{DeviceError, DeviceResult};
use crate::memory::GuestMemory;

fn unsupported(command: Command) -> DeviceError {
    DeviceError::Unsupported {
        what: "command",
        value: command as u32,
    }
}

/// One emulated IPC endpoint. Every operation defaults to `Unsupported`,
/// so a device only implements the commands it can service. Operations
/// decode their own parameters from the command block and return the value
/// the guest should see; the dispatcher writes it.
pub trait Device {
    fn id(&self) -> u32;
    fn name(&self) -> &str;

    fn open(&mut self, _mem: &mut dyn GuestMemory, _cmd: &CommandBlock) -> DeviceResult<i32> {
        Err(unsupported(Command::Open))
    }

    fn close(&mut self, _mem: &mut dyn GuestMemory, _cmd: &CommandBlock) -> DeviceResult<i32> {
        Err(unsupported(Command::Close))
    }

    fn read(&mut self, _mem: &mut dyn GuestMemory, _cmd: &CommandBlock) -> DeviceResult<i32> {
        Err(unsupported(Command::Read))
    }

    fn write(&mut self, _mem: &mut dyn GuestMemory, _cmd: &CommandBlock) -> DeviceResult<i32> {
        Err(unsupported(Command::Write))
    }

    fn seek(&mut self, _mem: &mut dyn GuestMemory, _cmd: &CommandBlock) -> DeviceResult<i32> {
        Err(unsupported(Command::Seek))
    }

    fn ioctl(&mut self, _mem: &mut dyn GuestMemory, _cmd: &CommandBlock) -> DeviceResult<i32> {
        Err(unsupported(Command::Ioctl))
    }
}

/// Id-addressable set of live devices. Ids are handed out when a device is
/// registered and stay stable until teardown.
pub struct DeviceRegistry {
    devices: HashMap<u32, Box<dyn Device>>,
    ids_by_name: HashMap<String, u32>,
    next_id: u32,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            devices: HashMap::new(),
            ids_by_name: HashMap::new(),
            next_id: 1,
        }
    }

    /// Reserve the id the next device should be built with.
    pub fn assign_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a device under its own id. A later registration with the same
    /// id replaces the earlier device, dropping its handles.
    pub fn register(&mut self, device: Box<dyn Device>) -> u32 {
        let id = device.id();
        debug!(id, name = device.name(), "device registered");
        self.ids_by_name.insert(device.name().to_string(), id);
        self.devices.insert(id, device);
        self.next_id = self.next_id.max(id.saturating_add(1));
        id
    }

    pub fn resolve(&mut self, id: u32) -> Option<&mut (dyn Device + 'static)> {
        self.devices.get_mut(&id).map(|device| device.as_mut())
    }

    pub fn resolve_name(&mut self, name: &str) -> Option<&mut (dyn Device + 'static)> {
        let id = *self.ids_by_name.get(name)?;
        self.resolve(id)
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
