/// Sink for a bit stream
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);

    /// Writes 8 bits, least significant first
    fn write_byte(&mut self, byte: u8) {
        let mut temp = byte;
        for _ in 0..8 {
            self.write_bit(temp & 1 != 0);
            temp >>= 1;
        }
    }

    fn is_counter(&self) -> bool {
        false
    }

    fn count_bits(&mut self, bits: u32);
}

/// A growable bit writer. Bits are packed least significant first, so a
/// sequence of whole bytes comes out unchanged.
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bits_written: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::with_capacity(bytes),
            bits_written: 0,
        }
    }

    fn flush_scratch(&mut self) {
        if self.scratch_index > 0 {
            let byte = (self.scratch << (8 - self.scratch_index)).reverse_bits();
            self.buffer.push(byte);
            self.scratch = 0;
            self.scratch_index = 0;
        }
    }

    /// Appends raw bytes to the stream
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }

    /// Returns a counter that measures how many bits a write would take
    pub fn counter(&self) -> BitCounter {
        BitCounter::new()
    }

    pub fn bits_written(&self) -> u32 {
        self.bits_written
    }

    /// Consumes the writer, padding the last partial byte with zeros
    pub fn to_bytes(mut self) -> Vec<u8> {
        self.flush_scratch();
        self.buffer
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        self.scratch <<= 1;

        if bit {
            self.scratch |= 1;
        }

        self.scratch_index += 1;
        self.bits_written += 1;

        if self.scratch_index >= 8 {
            self.buffer.push(self.scratch.reverse_bits());
            self.scratch_index = 0;
            self.scratch = 0;
        }
    }

    fn count_bits(&mut self, _bits: u32) {
        // a real writer grows as needed
    }
}

/// A BitWrite that only counts, used to size a payload before writing it
#[derive(Default)]
pub struct BitCounter {
    bits: u32,
}

impl BitCounter {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn bits_needed(&self) -> u32 {
        self.bits
    }
}

impl BitWrite for BitCounter {
    fn write_bit(&mut self, _bit: bool) {
        self.bits += 1;
    }

    fn write_byte(&mut self, _byte: u8) {
        self.bits += 8;
    }

    fn is_counter(&self) -> bool {
        true
    }

    fn count_bits(&mut self, bits: u32) {
        self.bits += bits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_single_byte() {
        let mut writer = BitWriter::new();

        writer.write_byte(0b10101010);

        let bytes = writer.to_bytes();
        assert_eq!(bytes, vec![0b10101010]);
    }

    #[test]
    fn bits_are_packed_lsb_first() {
        let mut writer = BitWriter::new();

        writer.write_bit(false);
        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bit(true);

        assert_eq!(writer.to_bytes(), vec![0b10101010]);
    }

    #[test]
    fn partial_byte_is_zero_padded() {
        let mut writer = BitWriter::new();

        writer.write_bit(true);
        writer.write_bit(true);
        writer.write_bit(false);

        assert_eq!(writer.bits_written(), 3);
        assert_eq!(writer.to_bytes(), vec![0b0000_0011]);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut writer = BitWriter::with_capacity(4);

        for _ in 0..10_000 {
            writer.write_byte(0xFF);
        }

        let bytes = writer.to_bytes();
        assert_eq!(bytes.len(), 10_000);
        assert!(bytes.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn counter_matches_writer() {
        let mut writer = BitWriter::new();
        let mut counter = writer.counter();

        for sink in [&mut writer as &mut dyn BitWrite, &mut counter as &mut dyn BitWrite] {
            sink.write_bit(true);
            sink.write_byte(0x12);
            sink.count_bits(0);
        }

        assert!(counter.is_counter());
        assert_eq!(counter.bits_needed(), writer.bits_written());
    }
}
