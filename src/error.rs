use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("Missing response field: {0}")]
    MissingField(String),
}
