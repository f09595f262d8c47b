use thiserror::Error;

use crate::memory::MemoryError;

/// Result codes in the guest's signed error-code space. Only
/// [`ERR_NOT_FOUND`] is pinned by the guest protocol; the rest follow its
/// negative-code convention.
pub const RESULT_OK: i32 = 0;
pub const ERR_NOT_FOUND: i32 = -106;
pub const ERR_NOT_OPEN: i32 = -6;
pub const ERR_UNSUPPORTED: i32 = -4;
pub const ERR_MALFORMED: i32 = -8;
pub const ERR_IO: i32 = -102;

/// Everything a device operation can fail with. The dispatcher folds these
/// into the guest's integer result codes; nothing here ever aborts.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no host file is open for this device")]
    NotOpen,
    #[error("host path does not exist")]
    NotFound,
    #[error("unsupported {what} {value:#x}")]
    Unsupported { what: &'static str, value: u32 },
    #[error("malformed command: {0}")]
    Malformed(&'static str),
    #[error("no device registered with id {0}")]
    UnknownDevice(u32),
    #[error("guest memory fault: {0}")]
    Memory(#[from] MemoryError),
    #[error("host i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl DeviceError {
    /// Collapse into the result code the guest sees.
    pub fn result_code(&self) -> i32 {
        match self {
            DeviceError::NotFound => ERR_NOT_FOUND,
            DeviceError::NotOpen | DeviceError::UnknownDevice(_) => ERR_NOT_OPEN,
            DeviceError::Unsupported { .. } => ERR_UNSUPPORTED,
            DeviceError::Malformed(_) | DeviceError::Memory(_) => ERR_MALFORMED,
            DeviceError::Io(_) => ERR_IO,
        }
    }
}

pub type DeviceResult<T> = Result<T, DeviceError>;
