use std::{error::Error, fmt};

/// Byte-level access to guest RAM at guest virtual addresses.
///
/// Word accessors use the guest's big-endian byte order. Implementations
/// decide which ranges are mapped; accesses outside them fail with a
/// [`MemoryError`] instead of touching anything.
pub trait GuestMemory {
    fn read_u32(&self, addr: u32) -> Result<u32, MemoryError>;
    fn write_u32(&mut self, addr: u32, value: u32) -> Result<(), MemoryError>;
    fn read_bytes(&self, addr: u32, len: usize) -> Result<&[u8], MemoryError>;
    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), MemoryError>;

    /// Return true if the whole range is mapped.
    fn covers(&self, addr: u32, len: usize) -> bool;
}

/// A single mapped RAM window, the shape a console guest exposes.
#[derive(Debug, Clone)]
pub struct Ram {
    base: u32,
    data: Vec<u8>,
}

impl Ram {
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            base,
            data: vec![0; size],
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn range(&self, addr: u32, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        let start = addr as usize;
        let end = start
            .checked_add(len)
            .ok_or(MemoryError::AddressOverflow { addr, len })?;
        let base = self.base as usize;
        if start < base || end > base + self.data.len() {
            return Err(MemoryError::Unmapped { addr, len });
        }
        Ok(start - base..end - base)
    }
}

impl GuestMemory for Ram {
    fn read_u32(&self, addr: u32) -> Result<u32, MemoryError> {
        let bytes: [u8; 4] = self.read_bytes(addr, 4)?.try_into().unwrap();
        Ok(u32::from_be_bytes(bytes))
    }

    fn write_u32(&mut self, addr: u32, value: u32) -> Result<(), MemoryError> {
        self.write_bytes(addr, &value.to_be_bytes())
    }

    fn read_bytes(&self, addr: u32, len: usize) -> Result<&[u8], MemoryError> {
        let range = self.range(addr, len)?;
        Ok(&self.data[range])
    }

    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), MemoryError> {
        let range = self.range(addr, data.len())?;
        self.data[range].copy_from_slice(data);
        Ok(())
    }

    fn covers(&self, addr: u32, len: usize) -> bool {
        self.range(addr, len).is_ok()
    }
}

#[derive(Debug, Clone)]
pub enum MemoryError {
    AddressOverflow { addr: u32, len: usize },
    Unmapped { addr: u32, len: usize },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::AddressOverflow { addr, len } => {
                write!(f, "address overflow at {addr:#x} (len {len})")
            }
            MemoryError::Unmapped { addr, len } => {
                let end = (*addr as usize).saturating_add(*len);
                write!(f, "no RAM covers range {addr:#x}..{end:#x}")
            }
        }
    }
}

impl Error for MemoryError {}
