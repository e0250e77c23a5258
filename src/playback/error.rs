use std::fmt;

use thiserror::Error;

/// Which side of a frequency conversion a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyRole {
    Source,
    Target,
}

impl fmt::Display for FrequencyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyRole::Source => f.write_str("source"),
            FrequencyRole::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResampleError {
    #[error("Invalid {role} frequency {value} Hz: expected a finite value above zero")]
    InvalidFrequency { role: FrequencyRole, value: f64 },
    #[error("Cannot upsample by a factor of {ratio}")]
    RatioTooLarge { ratio: f64 },
}
