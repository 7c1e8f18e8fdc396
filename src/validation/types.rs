use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a topic!")]
    EmptyInput,

    #[error("Topic must be at least 2 characters long.")]
    TooShort,

    #[error("Topic is too long. Please keep it under 100 characters.")]
    TooLong,

    #[error("Invalid characters detected. Please enter a normal topic.")]
    SuspiciousContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid { value: String },
    Invalid { reason: ValidationError },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn into_result(self) -> Result<String, ValidationError> {
        match self {
            Self::Valid { value } => Ok(value),
            Self::Invalid { reason } => Err(reason),
        }
    }
}
