use crate::error::Result;

/// Check that a configuration or parameter set is usable before it reaches
/// the numeric code.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
