use tracing::trace;

use crate::error::{DeviceError, DeviceResult};
use crate::memory::GuestMemory;

/// Commands the guest can address to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open = 1,
    Close = 2,
    Read = 3,
    Write = 4,
    Seek = 5,
    Ioctl = 6,
}

impl Command {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Command::Open),
            2 => Some(Command::Close),
            3 => Some(Command::Read),
            4 => Some(Command::Write),
            5 => Some(Command::Seek),
            6 => Some(Command::Ioctl),
            _ => None,
        }
    }
}

// Byte offsets within a command buffer, fixed by the guest ABI.
const OFFSET_COMMAND: u32 = 0x00;
const OFFSET_RESULT: u32 = 0x04;
const OFFSET_DEVICE: u32 = 0x08;
const OFFSET_PARAMS: u32 = 0x0C;
const OFFSET_BUFFER_IN: u32 = 0x10;
const OFFSET_BUFFER_OUT: u32 = 0x18;

/// Every command carries at least this many header bytes.
pub const HEADER_LEN: usize = 0x20;

/// One guest buffer handed to an ioctl, as an address/size pair.
#[derive(Debug, Clone, Copy)]
pub struct BufferDesc {
    pub addr: u32,
    pub size: u32,
}

/// Transient decoding view over one command buffer in guest memory. Lives
/// only for the duration of a single dispatch.
#[derive(Debug, Clone, Copy)]
pub struct CommandBlock {
    base: u32,
}

impl CommandBlock {
    /// Map the buffer at `base`, rejecting one whose header does not lie
    /// fully inside guest memory.
    pub fn map(mem: &dyn GuestMemory, base: u32) -> DeviceResult<Self> {
        if !mem.covers(base, HEADER_LEN) {
            return Err(DeviceError::Malformed("command header outside guest memory"));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn command(&self, mem: &dyn GuestMemory) -> DeviceResult<u32> {
        Ok(mem.read_u32(self.base + OFFSET_COMMAND)?)
    }

    pub fn device_id(&self, mem: &dyn GuestMemory) -> DeviceResult<u32> {
        Ok(mem.read_u32(self.base + OFFSET_DEVICE)?)
    }

    /// Operation parameter word, `index` 0 or 1.
    pub fn param(&self, mem: &dyn GuestMemory, index: u32) -> DeviceResult<u32> {
        debug_assert!(index < 2);
        Ok(mem.read_u32(self.base + OFFSET_PARAMS + 4 * index)?)
    }

    pub fn buffer_in(&self, mem: &dyn GuestMemory) -> DeviceResult<BufferDesc> {
        self.buffer_at(mem, OFFSET_BUFFER_IN)
    }

    pub fn buffer_out(&self, mem: &dyn GuestMemory) -> DeviceResult<BufferDesc> {
        self.buffer_at(mem, OFFSET_BUFFER_OUT)
    }

    fn buffer_at(&self, mem: &dyn GuestMemory, offset: u32) -> DeviceResult<BufferDesc> {
        Ok(BufferDesc {
            addr: mem.read_u32(self.base + offset)?,
            size: mem.read_u32(self.base + offset + 4)?,
        })
    }

    /// Trace the raw header words of the buffer.
    pub fn dump(&self, mem: &dyn GuestMemory) {
        let words: Result<Vec<u32>, _> = (0..HEADER_LEN as u32 / 4)
            .map(|i| mem.read_u32(self.base + 4 * i))
            .collect();
        if let Ok(words) = words {
            trace!(base = format_args!("{:#010x}", self.base), ?words, "command buffer");
        }
    }
}

/// The single result write each dispatch performs. Takes the raw base so
/// a code can still be delivered when the rest of the header was rejected.
pub fn write_result(mem: &mut dyn GuestMemory, base: u32, code: i32) -> DeviceResult<()> {
    let addr = base
        .checked_add(OFFSET_RESULT)
        .ok_or(DeviceError::Malformed("result word address overflows"))?;
    Ok(mem.write_u32(addr, code as u32)?)
}
