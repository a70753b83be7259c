use uuid::Uuid;

use crate::bytebuf::{DecodeError, EncodeError};
use crate::packet::{DataPacket, PacketHandler};
use crate::serializer::PacketSerializer;
use crate::types::abilities::AbilitiesPayload;
use crate::types::entity_link::EntityLink;
use crate::types::item_stack::ItemStackWrapper;
use crate::types::metadata::EntityMetadata;
use crate::types::vector3f::Vector3f;
use crate::version::ProtocolVersion;

/// Spawns another player for the receiving client.
///
/// The payload mixes several milestone eras: the redundant unique id
/// disappeared with 1.19.10, the game mode arrived with 1.18.30, and the
/// trailing ability block changed shape at 1.19.10.
#[derive(Debug, Clone, PartialEq)]
pub struct AddPlayerPacket {
    pub uuid: Uuid,
    pub username: String,
    pub actor_runtime_id: u64,
    pub platform_chat_id: String,
    pub position: Vector3f,
    pub motion: Option<Vector3f>,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub item: ItemStackWrapper,
    /// Only on the wire from 1.18.30; left at its default below that.
    pub game_mode: i32,
    pub metadata: EntityMetadata,
    pub abilities: AbilitiesPayload,
    pub links: Vec<EntityLink>,
    pub device_id: String,
    /// Raw build platform value, see [`crate::types::device_os::DeviceOs`].
    pub build_platform: i32,
}

impl DataPacket for AddPlayerPacket {
    const NETWORK_ID: u32 = 0x0C;

    fn decode_payload(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let uuid = r.get_uuid()?;
        let username = r.get_string()?;
        if r.protocol() < ProtocolVersion::V1_19_10 {
            // redundant copy of the runtime id, discarded
            let _ = r.get_actor_unique_id()?;
        }
        let actor_runtime_id = r.get_actor_runtime_id()?;
        let platform_chat_id = r.get_string()?;
        let position = r.get_vector3()?;
        let motion = Some(r.get_vector3()?);
        let pitch = r.get_lf32()?;
        let yaw = r.get_lf32()?;
        let head_yaw = r.get_lf32()?;
        let item = r.get_item_stack_wrapper(false)?;
        let game_mode = if r.protocol() >= ProtocolVersion::V1_18_30 {
            r.get_var_i32()?
        } else {
            0
        };
        let metadata = r.get_entity_metadata()?;
        let abilities = AbilitiesPayload::read(r)?;
        let links = r.get_entity_links()?;
        let device_id = r.get_string()?;
        let build_platform = r.get_li32()?;

        Ok(Self {
            uuid,
            username,
            actor_runtime_id,
            platform_chat_id,
            position,
            motion,
            pitch,
            yaw,
            head_yaw,
            item,
            game_mode,
            metadata,
            abilities,
            links,
            device_id,
            build_platform,
        })
    }

    fn encode_payload(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        w.put_uuid(&self.uuid);
        w.put_string(&self.username)?;
        if w.protocol() < ProtocolVersion::V1_19_10 {
            w.put_actor_unique_id(self.actor_runtime_id as i64);
        }
        w.put_actor_runtime_id(self.actor_runtime_id);
        w.put_string(&self.platform_chat_id)?;
        w.put_vector3(self.position);
        w.put_vector3_nullable(self.motion);
        w.put_lf32(self.pitch);
        w.put_lf32(self.yaw);
        w.put_lf32(self.head_yaw);
        w.put_item_stack_wrapper(&self.item, false)?;
        if w.protocol() >= ProtocolVersion::V1_18_30 {
            w.put_var_i32(self.game_mode);
        }
        w.put_entity_metadata(&self.metadata)?;
        self.abilities.write(w)?;
        w.put_entity_links(&self.links)?;
        w.put_string(&self.device_id)?;
        w.put_li32(self.build_platform);
        Ok(())
    }

    fn handle(&self, handler: &mut dyn PacketHandler) -> bool {
        handler.handle_add_player(self)
    }
}
