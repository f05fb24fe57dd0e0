use log::warn;

use netsync_serde::{BitCounter, BitReader, BitWriter, Serde};

use crate::DirtyMask;

use super::{
    config::PayloadFraming,
    error::{FramingError, SyncError},
    module_registry::ModuleRegistry,
};

/// One transmission: the dirty mask followed by the payload of every flagged
/// module, in registry order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncMessage {
    mask: DirtyMask,
    bytes: Vec<u8>,
}

impl SyncMessage {
    /// Serializes the modules flagged in `mask`. Modules whose bit is clear
    /// contribute nothing, not even a placeholder.
    pub fn write(
        registry: &ModuleRegistry,
        mask: DirtyMask,
        framing: PayloadFraming,
    ) -> Result<Self, FramingError> {
        let mut writer = BitWriter::new();
        mask.ser(&mut writer);

        for module in registry.iter() {
            if !mask.bit(module.component_id()) {
                continue;
            }

            if framing == PayloadFraming::LengthPrefixed {
                let mut counter = BitCounter::new();
                module.write(&mut counter);
                let bits = counter.bits_needed();
                let Ok(length) = u16::try_from(bits) else {
                    return Err(FramingError::SegmentTooLong {
                        component_id: module.component_id(),
                        bits,
                        max: u16::MAX as u32,
                    });
                };
                length.ser(&mut writer);
            }

            module.write(&mut writer);
        }

        Ok(Self {
            mask,
            bytes: writer.to_bytes(),
        })
    }

    /// Parses `bytes` and hands each flagged segment to its module. Masks that
    /// name a module this registry lacks are rejected before any module reads.
    pub fn read(
        registry: &mut ModuleRegistry,
        bytes: &[u8],
        framing: PayloadFraming,
    ) -> Result<DirtyMask, SyncError> {
        let mut reader = BitReader::new(bytes);
        let mask = DirtyMask::de(&mut reader)?;

        let unknown = mask.difference(&registry.registered_mask());
        if !unknown.is_clear() {
            return Err(FramingError::UnregisteredModules {
                mask: mask.bits(),
                unknown: unknown.bits(),
            }
            .into());
        }

        for module in registry.iter_mut() {
            let component_id = module.component_id();
            if !mask.bit(component_id) {
                continue;
            }

            match framing {
                PayloadFraming::Packed => {
                    module.read(&mut reader)?;
                }
                PayloadFraming::LengthPrefixed => {
                    let declared = u16::de(&mut reader)? as u32;
                    let start = reader.bits_read();
                    module.read(&mut reader)?;
                    let consumed = reader.bits_read() - start;

                    if consumed > declared {
                        return Err(FramingError::SegmentLengthMismatch {
                            component_id,
                            declared,
                            consumed,
                        }
                        .into());
                    }
                    if consumed < declared {
                        warn!(
                            "SyncMessage: {} read {} of {} bits, skipping the rest",
                            module.name(),
                            consumed,
                            declared
                        );
                        reader.skip_bits(declared - consumed)?;
                    }
                }
            }
        }

        if reader.bytes_remaining() > 0 {
            warn!(
                "SyncMessage: {} trailing bytes after mask {}",
                reader.bytes_remaining(),
                mask
            );
        }

        Ok(mask)
    }

    pub fn mask(&self) -> DirtyMask {
        self.mask
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
