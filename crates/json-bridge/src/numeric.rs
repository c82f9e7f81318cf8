//! Numeric range classification for host integers.
//!
//! Python integers are unbounded, document integers are not. Every integer the
//! encoder meets is sorted into exactly one band before a document node is
//! built, so overflow is a value the caller inspects rather than a panic or a
//! silent wrap.

/// The 64-bit band an integer falls into, carrying the narrowed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericBand {
    /// `i64::MIN..=i64::MAX`
    FitsSigned64(i64),
    /// `i64::MAX + 1..=u64::MAX`
    FitsUnsigned64Only(u64),
    /// Below `i64::MIN` or above `u64::MAX`.
    OutOfRange,
}

/// Classify an integer. Total: every input maps to one band.
pub fn classify(value: i128) -> NumericBand {
    if let Ok(signed) = i64::try_from(value) {
        NumericBand::FitsSigned64(signed)
    } else if let Ok(unsigned) = u64::try_from(value) {
        NumericBand::FitsUnsigned64Only(unsigned)
    } else {
        NumericBand::OutOfRange
    }
}
