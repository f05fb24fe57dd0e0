use crate::SerdeErr;

/// Reads a bit stream produced by a `BitWriter`
pub struct BitReader<'b> {
    buffer: &'b [u8],
    bit_index: u32,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            bit_index: 0,
        }
    }

    fn total_bits(&self) -> u32 {
        (self.buffer.len() as u32) * 8
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        if self.bit_index >= self.total_bits() {
            return Err(SerdeErr::EndOfBuffer {
                bit_index: self.bit_index,
                total_bits: self.total_bits(),
            });
        }

        let byte = self.buffer[(self.bit_index / 8) as usize];
        let bit = (byte >> (self.bit_index % 8)) & 1 != 0;
        self.bit_index += 1;

        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let mut output: u8 = 0;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }

    /// Advances the cursor without interpreting the skipped bits
    pub fn skip_bits(&mut self, bits: u32) -> Result<(), SerdeErr> {
        let target = self.bit_index + bits;
        if target > self.total_bits() {
            return Err(SerdeErr::EndOfBuffer {
                bit_index: target,
                total_bits: self.total_bits(),
            });
        }
        self.bit_index = target;
        Ok(())
    }

    pub fn bits_read(&self) -> u32 {
        self.bit_index
    }

    pub fn bits_remaining(&self) -> u32 {
        self.total_bits() - self.bit_index
    }

    /// Bytes after the one holding the cursor. Zero once only padding is left.
    pub fn bytes_remaining(&self) -> usize {
        self.bits_remaining() as usize / 8
    }
}
