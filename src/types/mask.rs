use std::ops::Index;

/// Per-row boolean result of evaluating one condition against one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct Mask {
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// A mask of `len` rows, all set to `value`.
    pub fn splat(value: bool, len: usize) -> Self {
        Self {
            bits: vec![value; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize) -> Option<bool> {
        self.bits.get(row).copied()
    }

    /// Number of rows set to `true`.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<bool> {
        self.bits
    }
}

impl Index<usize> for Mask {
    type Output = bool;

    fn index(&self, row: usize) -> &bool {
        &self.bits[row]
    }
}

impl From<Vec<bool>> for Mask {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for Mask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
