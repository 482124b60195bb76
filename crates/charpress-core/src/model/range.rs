use crate::error::{PressError, Result};

/// Inclusive address range `[from, to]`.
///
/// Used for the externally configured exclusion: no optimization range may
/// cover any address inside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddressRange {
    pub from: usize,
    pub to: usize,
}

impl AddressRange {
    pub fn new(from: usize, to: usize) -> Result<Self> {
        if from > to {
            return Err(PressError::Validation(format!(
                "range is reversed: {from}..{to}"
            )));
        }
        Ok(Self { from, to })
    }

    #[inline]
    pub fn contains(&self, address: usize) -> bool {
        address >= self.from && address <= self.to
    }

    #[inline]
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        self.from <= to && from <= self.to
    }
}
