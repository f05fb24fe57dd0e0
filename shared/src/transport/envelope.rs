use netsync_serde::{BitReader, BitWriter, ConstBitLength, Serde, SerdeErr};

use crate::EntityId;

/// Addresses a sync message to an entity: `entity_id: u64 || message`
pub struct Envelope;

impl Envelope {
    /// Byte length of the header in front of the message
    pub fn header_len() -> usize {
        (EntityId::const_bit_length() / 8) as usize
    }

    pub fn write(entity_id: EntityId, message: &[u8]) -> Vec<u8> {
        let mut writer = BitWriter::with_capacity(Self::header_len() + message.len());
        entity_id.ser(&mut writer);
        writer.write_bytes(message);
        writer.to_bytes()
    }

    /// Splits a packet into its entity id and the message it carries
    pub fn read(packet: &[u8]) -> Result<(EntityId, &[u8]), SerdeErr> {
        let mut reader = BitReader::new(packet);
        let entity_id = EntityId::de(&mut reader)?;
        Ok((entity_id, &packet[Self::header_len()..]))
    }
}
