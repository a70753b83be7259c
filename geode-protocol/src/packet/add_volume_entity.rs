use fastnbt::Value;

use crate::bytebuf::{DecodeError, EncodeError};
use crate::packet::{DataPacket, PacketHandler};
use crate::serializer::PacketSerializer;
use crate::version::ProtocolVersion;

/// Spawns a data-driven volume entity. The definition travels as one opaque
/// tag tree owned by the NBT collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct AddVolumeEntityPacket {
    pub entity_net_id: u32,
    pub data: Value,
    /// Only on the wire from 1.17.30.
    pub engine_version: String,
}

impl DataPacket for AddVolumeEntityPacket {
    const NETWORK_ID: u32 = 0xA6;

    fn decode_payload(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let entity_net_id = r.get_var_u32()?;
        let data = r.get_nbt_root()?;
        let engine_version = if r.protocol() >= ProtocolVersion::V1_17_30 {
            r.get_string()?
        } else {
            String::new()
        };
        Ok(Self {
            entity_net_id,
            data,
            engine_version,
        })
    }

    fn encode_payload(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        w.put_var_u32(self.entity_net_id);
        w.put_nbt_root(&self.data)?;
        if w.protocol() >= ProtocolVersion::V1_17_30 {
            w.put_string(&self.engine_version)?;
        }
        Ok(())
    }

    fn handle(&self, handler: &mut dyn PacketHandler) -> bool {
        handler.handle_add_volume_entity(self)
    }
}
