use std::fmt;

const SEED: u64 = 99_194_853_094_755_497;

/// Cheap order-sensitive summary of a set of values, used to skip redundant redraws.
///
/// Not a security hash: two different inputs can collide, it is only required that
/// identical inputs produce identical fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// djb2-style accumulator: `acc = acc * 33 + h` per folded field.
#[derive(Debug, Clone, Copy)]
pub struct FingerprintBuilder {
    acc: u64,
}

impl Default for FingerprintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self { acc: SEED }
    }

    pub fn fold_u64(mut self, h: u64) -> Self {
        self.acc = (self.acc << 5).wrapping_add(self.acc).wrapping_add(h);
        self
    }

    pub fn fold_usize(self, v: usize) -> Self {
        self.fold_u64(v as u64)
    }

    pub fn fold_u8(self, v: u8) -> Self {
        self.fold_u64(v as u64)
    }

    pub fn fold_bool(self, v: bool) -> Self {
        self.fold_u64(v as u64)
    }

    /// `-0.0` folds the same as `0.0`; other values fold by bit pattern.
    pub fn fold_f32(self, v: f32) -> Self {
        let bits = if v == 0.0 { 0 } else { v.to_bits() };
        self.fold_u64(bits as u64)
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint(self.acc)
    }
}
