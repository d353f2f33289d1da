//! Negative-errno error kinds.
//!
//! Failures travel back to user mode as a negative value in RAX, matching the
//! Linux errno numbering. Only the kinds this layer produces itself are listed;
//! collaborator results are passed through without being decoded.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[must_use]
#[repr(i64)]
pub enum Errno {
    #[error("Bad address")]
    Fault = -14,
    #[error("Function not implemented")]
    NoSys = -38,
}

impl Errno {
    /// Value as written into the RAX return slot.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        (self as i64) as u64
    }

    /// Exit status handed to the termination collaborator.
    #[inline]
    pub const fn as_status(self) -> i32 {
        self as i64 as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_are_twos_complement_negatives() {
        assert_eq!(Errno::Fault.to_raw(), (-14i64) as u64);
        assert_eq!(Errno::NoSys.to_raw(), u64::MAX - 37);
        assert_eq!(Errno::Fault.as_status(), -14);
    }

    #[test]
    fn display_uses_libc_wording() {
        assert_eq!(Errno::NoSys.to_string(), "Function not implemented");
    }
}
