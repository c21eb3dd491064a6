//! Conversions between on-disk 32-bit offsets and in-memory positions.

/// Widens a 32-bit file offset into a buffer position.
#[must_use]
pub fn to_position(offset: u32) -> usize {
    // Offsets are at most 32 bits wide, which fits every supported target.
    offset as usize
}

/// Narrows a buffer position into a 32-bit file offset, if it fits.
#[must_use]
pub fn to_offset(position: usize) -> Option<u32> {
    u32::try_from(position).ok()
}

/// Computes `new_len - old_len` as a signed size change.
#[must_use]
pub fn size_delta(new_len: usize, old_len: usize) -> Option<i64> {
    let new_len = i64::try_from(new_len).ok()?;
    let old_len = i64::try_from(old_len).ok()?;
    new_len.checked_sub(old_len)
}

/// Moves a 32-bit offset by `delta`, failing if the result leaves the
/// 32-bit range.
#[must_use]
pub fn apply_delta(offset: u32, delta: i64) -> Option<u32> {
    let moved = i64::from(offset).checked_add(delta)?;
    u32::try_from(moved).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_moves_both_ways() {
        assert_eq!(apply_delta(0x200, 1), Some(0x201));
        assert_eq!(apply_delta(0x200, -0x100), Some(0x100));
        assert_eq!(apply_delta(0, 0), Some(0));
    }

    #[test]
    fn apply_delta_rejects_out_of_range() {
        assert_eq!(apply_delta(0x10, -0x11), None);
        assert_eq!(apply_delta(u32::MAX, 1), None);
    }

    #[test]
    fn size_delta_is_signed() {
        assert_eq!(size_delta(11, 10), Some(1));
        assert_eq!(size_delta(0, 10), Some(-10));
    }
}
