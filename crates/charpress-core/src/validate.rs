use crate::error::{PressError, Result};

pub fn validate_tables(patterns: &[u8], colors: &[u8]) -> Result<()> {
    if patterns.is_empty() {
        return Err(PressError::Validation("tables must not be empty".into()));
    }
    if patterns.len() != colors.len() {
        return Err(PressError::Validation(format!(
            "table lengths differ: pattern={} color={}",
            patterns.len(),
            colors.len()
        )));
    }
    Ok(())
}
