use thiserror::Error;

/// Errors raised while reading wire data back into values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Reader ran past the end of its buffer
    #[error("Unexpected end of buffer after {bytes_read} bytes")]
    UnexpectedEnd { bytes_read: usize },

    /// VarInt continued past its maximum encoded width
    #[error("VarInt is wider than {max_bytes} bytes")]
    VarIntTooLong { max_bytes: usize },

    /// Length-prefixed string was not valid UTF-8
    #[error("String payload is not valid UTF-8")]
    InvalidUtf8,

    /// Decoded value is outside of what the type can represent
    #[error("Invalid {type_name} value: {value}")]
    InvalidValue {
        type_name: &'static str,
        value: i64,
    },
}
