use crate::error::Result;
use crate::model::line::TileLine;
use crate::validate;

/// The paired pattern/color tables for a whole tile set.
///
/// Both tables have the same non-zero length; address `i` holds row `i`'s
/// pattern byte in one table and its color byte in the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Charset {
    patterns: Vec<u8>,
    colors: Vec<u8>,
}

impl Charset {
    pub fn new(patterns: Vec<u8>, colors: Vec<u8>) -> Result<Self> {
        validate::validate_tables(&patterns, &colors)?;
        Ok(Self { patterns, colors })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[inline]
    pub fn get(&self, address: usize) -> TileLine {
        TileLine::new(self.patterns[address], self.colors[address])
    }

    #[inline]
    pub fn set(&mut self, address: usize, line: TileLine) {
        self.patterns[address] = line.pattern;
        self.colors[address] = line.color;
    }

    #[inline]
    pub fn patterns(&self) -> &[u8] {
        &self.patterns
    }

    #[inline]
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    pub fn into_tables(self) -> (Vec<u8>, Vec<u8>) {
        (self.patterns, self.colors)
    }
}
