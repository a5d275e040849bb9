use serde::{Deserialize, Serialize};

/// One boolean per dataset row, aligned positionally: `mask[i]` answers for
/// `rows[i]`. Every mask handed to `Dataset::select` has length equal to the
/// dataset's row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask(Vec<bool>);

impl Mask {
    pub fn all_false(len: usize) -> Self {
        Mask(vec![false; len])
    }

    pub fn from_vec(bits: Vec<bool>) -> Self {
        Mask(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn set(&mut self, index: usize, hit: bool) {
        self.0[index] = hit;
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn count_set(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    pub fn and_assign(&mut self, other: &Mask) {
        debug_assert_eq!(self.0.len(), other.0.len());
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a = *a && *b;
        }
    }

    pub fn or_assign(&mut self, other: &Mask) {
        debug_assert_eq!(self.0.len(), other.0.len());
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a = *a || *b;
        }
    }
}
