use std::fmt;

use netsync_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

use crate::types::{ComponentId, MAX_MODULES};

/// One bit per module, keyed by `ComponentId`. Built fresh for every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirtyMask(u32);

impl DirtyMask {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Ids outside the mask width are ignored
    pub fn set_bit(&mut self, component_id: ComponentId, value: bool) {
        if (component_id as usize) >= MAX_MODULES {
            return;
        }
        if value {
            self.0 |= 1 << component_id;
        } else {
            self.0 &= !(1 << component_id);
        }
    }

    pub fn bit(&self, component_id: ComponentId) -> bool {
        (component_id as usize) < MAX_MODULES && (self.0 >> component_id) & 1 != 0
    }

    pub fn is_clear(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Bits set here but not in `other`
    pub fn difference(&self, other: &DirtyMask) -> DirtyMask {
        DirtyMask(self.0 & !other.0)
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Set ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..MAX_MODULES as ComponentId).filter(move |id| self.bit(*id))
    }
}

impl fmt::Display for DirtyMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

impl fmt::UpperHex for DirtyMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl Serde for DirtyMask {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u32::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for DirtyMask {
    fn const_bit_length() -> u32 {
        u32::const_bit_length()
    }
}
