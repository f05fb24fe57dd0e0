use crate::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

pub type UnsignedFloat<const BITS: u8, const FRACTION_DIGITS: u8> =
    SerdeFloat<false, false, BITS, FRACTION_DIGITS>;
pub type SignedFloat<const BITS: u8, const FRACTION_DIGITS: u8> =
    SerdeFloat<true, false, BITS, FRACTION_DIGITS>;

/// An integer written with an explicit number of magnitude bits, plus a sign
/// bit when `SIGNED`. Variable integers write `BITS`-sized chunks, each
/// preceded by a continuation bit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    layout: NumberLayout,
    value: i128,
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8>
    SerdeInteger<SIGNED, VARIABLE, BITS>
{
    const LAYOUT: NumberLayout = NumberLayout {
        signed: SIGNED,
        variable: VARIABLE,
        bits: BITS,
    };

    /// # Panics
    ///
    /// Panics if the value does not fit. Use `try_new` to get an error instead.
    pub fn new<T: Into<i128>>(value: T) -> Self {
        match Self::try_new(value) {
            Ok(integer) => integer,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new<T: Into<i128>>(value: T) -> Result<Self, SerdeErr> {
        let value = value.into();
        Self::LAYOUT.check(value)?;
        Ok(Self {
            layout: Self::LAYOUT,
            value,
        })
    }

    pub fn get(&self) -> i128 {
        self.value
    }

    /// Converts into a primitive, failing if the value does not fit it
    pub fn try_to<T: TryFrom<i128>>(&self) -> Result<T, SerdeErr> {
        T::try_from(self.value).map_err(|_| self.layout.out_of_range(self.value))
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde
    for SerdeInteger<SIGNED, VARIABLE, BITS>
{
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.layout.write(self.value, writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            layout: Self::LAYOUT,
            value: Self::LAYOUT.read(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.layout.bit_length(self.value)
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        u32::from(SIGNED) + u32::from(BITS)
    }
}

/// A float quantized to `FRACTION_DIGITS` decimal digits and written as the
/// scaled integer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerdeFloat<
    const SIGNED: bool,
    const VARIABLE: bool,
    const BITS: u8,
    const FRACTION_DIGITS: u8,
> {
    scaled: SerdeInteger<SIGNED, VARIABLE, BITS>,
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8, const FRACTION_DIGITS: u8>
    SerdeFloat<SIGNED, VARIABLE, BITS, FRACTION_DIGITS>
{
    fn scale() -> f32 {
        10f32.powi(i32::from(FRACTION_DIGITS))
    }

    /// # Panics
    ///
    /// Panics if the scaled value does not fit. Use `try_new` to get an error instead.
    pub fn new<T: Into<f32>>(value: T) -> Self {
        match Self::try_new(value) {
            Ok(float) => float,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new<T: Into<f32>>(value: T) -> Result<Self, SerdeErr> {
        let scaled = (value.into() * Self::scale()).round();
        if !scaled.is_finite() {
            return Err(SerdeInteger::<SIGNED, VARIABLE, BITS>::LAYOUT.out_of_range(i128::MAX));
        }
        Ok(Self {
            scaled: SerdeInteger::try_new(scaled as i128)?,
        })
    }

    pub fn get(&self) -> f32 {
        self.scaled.get() as f32 / Self::scale()
    }
}

impl<const S: bool, const V: bool, const B: u8, const F: u8> Serde for SerdeFloat<S, V, B, F> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.scaled.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            scaled: SerdeInteger::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.scaled.bit_length()
    }
}

impl<const SIGNED: bool, const BITS: u8, const FRACTION_DIGITS: u8> ConstBitLength
    for SerdeFloat<SIGNED, false, BITS, FRACTION_DIGITS>
{
    fn const_bit_length() -> u32 {
        SerdeInteger::<SIGNED, false, BITS>::const_bit_length()
    }
}

// Non-generic half of every number, so the bit loops are compiled once

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct NumberLayout {
    signed: bool,
    variable: bool,
    bits: u8,
}

impl NumberLayout {
    fn out_of_range(&self, value: i128) -> SerdeErr {
        SerdeErr::ValueOutOfRange {
            value,
            bits: self.bits,
            signed: self.signed,
        }
    }

    fn check(&self, value: i128) -> Result<(), SerdeErr> {
        if self.bits == 0 || self.bits > 127 {
            return Err(SerdeErr::InvalidBitWidth { bits: self.bits });
        }
        if value < 0 && !self.signed {
            return Err(self.out_of_range(value));
        }
        if !self.variable && value.unsigned_abs() >> self.bits != 0 {
            return Err(self.out_of_range(value));
        }
        Ok(())
    }

    fn write_chunk(&self, magnitude: u128, writer: &mut dyn BitWrite) {
        for bit in 0..self.bits {
            writer.write_bit((magnitude >> bit) & 1 != 0);
        }
    }

    fn write(&self, value: i128, writer: &mut dyn BitWrite) {
        if self.signed {
            writer.write_bit(value < 0);
        }

        let mut magnitude = value.unsigned_abs();
        if !self.variable {
            self.write_chunk(magnitude, writer);
            return;
        }

        loop {
            let more = magnitude >> self.bits != 0;
            writer.write_bit(more);
            self.write_chunk(magnitude, writer);
            if !more {
                return;
            }
            magnitude >>= self.bits;
        }
    }

    fn read(&self, reader: &mut BitReader) -> Result<i128, SerdeErr> {
        let negative = self.signed && reader.read_bit()?;

        let mut magnitude: u128 = 0;
        let mut shift: u32 = 0;
        loop {
            let more = self.variable && reader.read_bit()?;
            for _ in 0..self.bits {
                if reader.read_bit()? {
                    if shift >= 127 {
                        return Err(self.out_of_range(i128::MAX));
                    }
                    magnitude |= 1 << shift;
                }
                shift += 1;
            }
            if !more {
                break;
            }
        }

        let value = magnitude as i128;
        Ok(if negative { -value } else { value })
    }

    fn bit_length(&self, value: i128) -> u32 {
        let sign = u32::from(self.signed);
        if !self.variable {
            return sign + u32::from(self.bits);
        }

        let mut magnitude = value.unsigned_abs();
        let mut chunks = 1;
        while magnitude >> self.bits != 0 {
            magnitude >>= self.bits;
            chunks += 1;
        }
        sign + chunks * (1 + u32::from(self.bits))
    }
}
