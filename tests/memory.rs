use starlet::{GuestMemory, MemoryError, Ram};

#[test]
fn words_use_guest_big_endian_order() {
    let mut ram = Ram::new(0, 0x100);
    ram.write_u32(0x10, 0x1122_3344).unwrap();
    assert_eq!(ram.read_bytes(0x10, 4).unwrap(), &[0x11, 0x22, 0x33, 0x44]);
    assert_eq!(ram.read_u32(0x10).unwrap(), 0x1122_3344);
}

#[test]
fn accesses_outside_the_window_fail() {
    let mut ram = Ram::new(0x1000, 0x100);
    assert!(matches!(
        ram.read_u32(0xfff),
        Err(MemoryError::Unmapped { .. })
    ));
    assert!(matches!(
        ram.write_u32(0x10fd, 0),
        Err(MemoryError::Unmapped { .. })
    ));
    assert!(ram.read_u32(0x1000).is_ok());
    assert!(ram.read_u32(0x10fc).is_ok());

    assert!(ram.covers(0x1000, 0x100));
    assert!(!ram.covers(0x1000, 0x101));
    assert!(!ram.covers(0x0, 4));
}

#[test]
fn range_overflow_is_an_error_not_a_wraparound() {
    let ram = Ram::new(0, 0x100);
    assert!(matches!(
        ram.read_bytes(u32::MAX, usize::MAX),
        Err(MemoryError::AddressOverflow { .. })
    ));
    assert!(!ram.covers(u32::MAX, usize::MAX));
}
