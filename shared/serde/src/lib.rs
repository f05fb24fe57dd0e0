//! # Netsync Serde
//! Bit-level serialization shared by every netsync peer. Values are written
//! least-significant bit first, so byte-aligned integers land on the wire as
//! little-endian bytes.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bit_reader;
mod bit_writer;
mod error;
mod impls;
mod number;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitCounter, BitWrite, BitWriter};
pub use error::SerdeErr;
pub use number::{
    SerdeFloat, SerdeInteger, SignedFloat, SignedInteger, SignedVariableInteger, UnsignedFloat,
    UnsignedInteger, UnsignedVariableInteger,
};
pub use serde::{ConstBitLength, Serde};
