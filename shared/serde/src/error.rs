use thiserror::Error;

/// Errors raised while encoding or decoding a bit stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Attempted to read past the end of the buffer
    #[error("Attempted to read bit {bit_index} from a buffer of {total_bits} bits")]
    EndOfBuffer { bit_index: u32, total_bits: u32 },

    /// A number does not fit the configured bit width
    #[error("Value `{value}` does not fit in {bits} bits (signed: {signed})")]
    ValueOutOfRange { value: i128, bits: u8, signed: bool },

    /// A number type was declared with an unusable bit width
    #[error("Cannot encode a number with {bits} bits, must be within 1..=127")]
    InvalidBitWidth { bits: u8 },
}
