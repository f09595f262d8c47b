//! High-level emulation of a guest's IPC filesystem device: fixed-layout
//! command buffers in guest RAM are decoded, serviced against the host
//! filesystem under a jailed root, and answered with the result codes the
//! guest protocol expects.

pub mod command;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod hostfs;
pub mod memory;

pub use command::{BufferDesc, Command, CommandBlock, HEADER_LEN};
pub use device::fileio::{FileIoDevice, IOCTL_GET_FILE_STATS, NAME_LEN_MAX};
pub use device::{Device, DeviceRegistry};
pub use dispatch::Dispatcher;
pub use error::{DeviceError, DeviceResult};
pub use hostfs::{AccessMode, HostFile, HostFs};
pub use memory::{GuestMemory, MemoryError, Ram};
