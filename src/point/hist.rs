use std::fmt;

/// Number of access-size buckets.
pub const BUCKETS: usize = 8;

/// Log-scale histogram of memory access sizes.
///
/// Bucket `i` counts accesses of `2^i..2^(i+1)` bytes. Accesses smaller than
/// 2 bytes (including empty ones) land in bucket 0, accesses of 128 bytes or
/// more all land in bucket 7.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hist([u64; BUCKETS]);

impl Hist {
    pub const fn new() -> Self {
        Self([0; BUCKETS])
    }

    /// Bucket index for an access of `bytes` bytes: `floor(log2(bytes))`
    /// clamped to `[0, 7]`.
    #[inline]
    pub const fn bucket(bytes: u64) -> usize {
        if bytes == 0 {
            return 0;
        }
        let log2 = (63 - bytes.leading_zeros()) as usize;
        if log2 > BUCKETS - 1 {
            BUCKETS - 1
        } else {
            log2
        }
    }

    #[inline]
    pub fn record(&mut self, bytes: u64) {
        let slot = &mut self.0[Self::bucket(bytes)];
        *slot = slot.wrapping_add(1);
    }

    pub fn buckets(&self) -> &[u64; BUCKETS] {
        &self.0
    }

    /// Total number of recorded accesses.
    pub fn count(&self) -> u64 {
        self.0.iter().fold(0, |acc, n| acc.wrapping_add(*n))
    }
}

impl From<[u64; BUCKETS]> for Hist {
    fn from(buckets: [u64; BUCKETS]) -> Self {
        Self(buckets)
    }
}

// Delimited record group, note the space before the closing brace:
// {H0 H1 H2 H3 H4 H5 H6 H7 }
impl fmt::Display for Hist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for n in self.0 {
            write!(f, "{} ", n)?;
        }
        f.write_str("}")
    }
}
