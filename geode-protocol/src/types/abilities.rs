use crate::bytebuf::{DecodeError, EncodeError};
use crate::serializer::PacketSerializer;
use crate::version::ProtocolVersion;

/// Pre-1.19.10 permission bits, sent as one flat flag block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdventureSettingsData {
    pub flags: u32,
    pub command_permission: u32,
    pub flags2: u32,
    pub player_permission: u32,
    pub custom_flags: u32,
    pub actor_unique_id: i64,
}

impl AdventureSettingsData {
    pub const FLAG_WORLD_IMMUTABLE: u32 = 0x01;
    pub const FLAG_NO_PVP: u32 = 0x02;
    pub const FLAG_AUTO_JUMP: u32 = 0x20;
    pub const FLAG_ALLOW_FLIGHT: u32 = 0x40;
    pub const FLAG_NO_CLIP: u32 = 0x80;
    pub const FLAG_FLYING: u32 = 0x200;

    pub fn decode(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        Ok(Self {
            flags: r.get_var_u32()?,
            command_permission: r.get_var_u32()?,
            flags2: r.get_var_u32()?,
            player_permission: r.get_var_u32()?,
            custom_flags: r.get_var_u32()?,
            actor_unique_id: r.get_li64()?,
        })
    }

    pub fn encode(&self, w: &mut PacketSerializer) {
        w.put_var_u32(self.flags);
        w.put_var_u32(self.command_permission);
        w.put_var_u32(self.flags2);
        w.put_var_u32(self.player_permission);
        w.put_var_u32(self.custom_flags);
        w.put_li64(self.actor_unique_id);
    }
}

/// One layer of the 1.19.10 layered ability set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AbilitiesLayer {
    pub layer_id: u16,
    pub abilities_set: u32,
    pub ability_values: u32,
    pub fly_speed: f32,
    pub walk_speed: f32,
}

impl AbilitiesLayer {
    pub const LAYER_CACHE: u16 = 0;
    pub const LAYER_BASE: u16 = 1;
    pub const LAYER_SPECTATOR: u16 = 2;
    pub const LAYER_COMMANDS: u16 = 3;

    fn decode(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        Ok(Self {
            layer_id: r.get_lu16()?,
            abilities_set: r.get_lu32()?,
            ability_values: r.get_lu32()?,
            fly_speed: r.get_lf32()?,
            walk_speed: r.get_lf32()?,
        })
    }

    fn encode(&self, w: &mut PacketSerializer) {
        w.put_lu16(self.layer_id);
        w.put_lu32(self.abilities_set);
        w.put_lu32(self.ability_values);
        w.put_lf32(self.fly_speed);
        w.put_lf32(self.walk_speed);
    }
}

/// Layered ability data introduced with 1.19.10.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AbilitiesData {
    pub target_actor_unique_id: i64,
    pub player_permission: u8,
    pub command_permission: u8,
    pub layers: Vec<AbilitiesLayer>,
}

impl AbilitiesData {
    pub fn decode(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let target_actor_unique_id = r.get_li64()?;
        let player_permission = r.get_u8()?;
        let command_permission = r.get_u8()?;
        let count = r.get_u8()? as usize;
        let mut layers = Vec::with_capacity(count);
        for _ in 0..count {
            layers.push(AbilitiesLayer::decode(r)?);
        }
        Ok(Self {
            target_actor_unique_id,
            player_permission,
            command_permission,
            layers,
        })
    }

    pub fn encode(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        let count = u8::try_from(self.layers.len())
            .map_err(|_| EncodeError::OutOfRange(format!("{} ability layers", self.layers.len())))?;
        w.put_li64(self.target_actor_unique_id);
        w.put_u8(self.player_permission);
        w.put_u8(self.command_permission);
        w.put_u8(count);
        for layer in &self.layers {
            layer.encode(w);
        }
        Ok(())
    }
}

/// The ability block embedded in player spawn data. Which shape is on the
/// wire depends solely on the protocol version; the variant is chosen once
/// at decode and never re-checked afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum AbilitiesPayload {
    AdventureSettings(AdventureSettingsData),
    UpdateAbilities(AbilitiesData),
}

impl AbilitiesPayload {
    pub fn read(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        if r.protocol() >= ProtocolVersion::V1_19_10 {
            Ok(Self::UpdateAbilities(AbilitiesData::decode(r)?))
        } else {
            Ok(Self::AdventureSettings(AdventureSettingsData::decode(r)?))
        }
    }

    pub fn write(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        let layered = w.protocol() >= ProtocolVersion::V1_19_10;
        match self {
            Self::UpdateAbilities(data) if layered => data.encode(w),
            Self::AdventureSettings(data) if !layered => {
                data.encode(w);
                Ok(())
            }
            _ => Err(EncodeError::OutOfRange(format!(
                "abilities payload does not exist at {}",
                w.protocol()
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dictionary::{ItemTypeDictionary, ItemTypeEntry};

    fn dictionary() -> ItemTypeDictionary {
        ItemTypeDictionary::new(vec![ItemTypeEntry {
            string_id: "minecraft:compass".to_string(),
            numeric_id: 345,
        }])
        .unwrap()
    }

    fn layered() -> AbilitiesPayload {
        AbilitiesPayload::UpdateAbilities(AbilitiesData {
            target_actor_unique_id: 91,
            player_permission: 1,
            command_permission: 0,
            layers: vec![AbilitiesLayer {
                layer_id: AbilitiesLayer::LAYER_BASE,
                abilities_set: 0x3FF,
                ability_values: 0x41,
                fly_speed: 0.05,
                walk_speed: 0.1,
            }],
        })
    }

    fn flat() -> AbilitiesPayload {
        AbilitiesPayload::AdventureSettings(AdventureSettingsData {
            flags: AdventureSettingsData::FLAG_ALLOW_FLIGHT | AdventureSettingsData::FLAG_FLYING,
            command_permission: 1,
            flags2: u32::MAX,
            player_permission: 2,
            custom_flags: 0,
            actor_unique_id: 91,
        })
    }

    #[test]
    fn layered_roundtrip_at_current() {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_19_10, &dict);
        layered().write(&mut w).unwrap();
        let payload = w.into_payload();

        let mut r = PacketSerializer::decoder(&payload, ProtocolVersion::V1_19_10, &dict);
        assert_eq!(AbilitiesPayload::read(&mut r).unwrap(), layered());
        assert!(r.is_empty());
    }

    #[test]
    fn flat_roundtrip_below_gate() {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_18_30, &dict);
        flat().write(&mut w).unwrap();
        let payload = w.into_payload();

        let mut r = PacketSerializer::decoder(&payload, ProtocolVersion::V1_18_30, &dict);
        assert_eq!(AbilitiesPayload::read(&mut r).unwrap(), flat());
        assert!(r.is_empty());
    }

    #[test]
    fn mismatched_variant_is_an_encode_error() {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_18_30, &dict);
        assert!(matches!(
            layered().write(&mut w),
            Err(EncodeError::OutOfRange(_))
        ));

        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_19_10, &dict);
        assert!(matches!(flat().write(&mut w), Err(EncodeError::OutOfRange(_))));
    }
}
