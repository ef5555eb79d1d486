use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Check for {phone_number} panicked: {message}")]
    TaskPanicked {
        phone_number: String,
        message: String,
    },

    #[error("Check for {phone_number} was cancelled")]
    TaskCancelled { phone_number: String },

    #[error("Provider error: {0}")]
    Provider(#[from] didscope_provider::ProviderError),
}

pub type Result<T> = std::result::Result<T, BatchError>;
