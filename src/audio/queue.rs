//! Circular cursor over the catalog.
//!
//! Both helpers expect `len >= 1` and `index < len`.

/// Index after `index`, wrapping from the last entry to the first.
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Index before `index`, wrapping from the first entry to the last.
pub fn prev_index(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Direction of travel through the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Forward,
    Backward,
}

impl Step {
    pub(crate) fn apply(self, index: usize, len: usize) -> usize {
        match self {
            Step::Forward => next_index(index, len),
            Step::Backward => prev_index(index, len),
        }
    }
}
