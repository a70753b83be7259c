use fastnbt::Value;

use crate::bytebuf::{DecodeError, EncodeError};
use crate::serializer::PacketSerializer;
use crate::types::block_position::BlockPosition;
use crate::types::vector3f::Vector3f;

/// Keyed metadata entries in wire order. The key space is shared by every
/// actor type; a few well-known keys are in [`keys`].
pub type EntityMetadata = Vec<(u32, MetadataProperty)>;

pub mod keys {
    pub const FLAGS: u32 = 0;
    pub const HEALTH: u32 = 1;
    pub const VARIANT: u32 = 2;
    pub const COLOR: u32 = 3;
    pub const NAMETAG: u32 = 4;
    pub const OWNER_ACTOR_ID: u32 = 5;
    pub const TARGET_ACTOR_ID: u32 = 6;
    pub const AIR: u32 = 7;
    pub const SCALE: u32 = 38;
}

/// One metadata value. The wire tags a type discriminant before each value;
/// an unrecognized discriminant kills the whole packet decode.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataProperty {
    Byte(i8),
    Short(i16),
    Int(i32),
    Float(f32),
    String(String),
    CompoundTag(Value),
    BlockPos(BlockPosition),
    Long(i64),
    Vector3f(Vector3f),
}

impl MetadataProperty {
    pub const TYPE_BYTE: u32 = 0;
    pub const TYPE_SHORT: u32 = 1;
    pub const TYPE_INT: u32 = 2;
    pub const TYPE_FLOAT: u32 = 3;
    pub const TYPE_STRING: u32 = 4;
    pub const TYPE_COMPOUND_TAG: u32 = 5;
    pub const TYPE_BLOCK_POS: u32 = 6;
    pub const TYPE_LONG: u32 = 7;
    pub const TYPE_VECTOR3F: u32 = 8;

    pub fn type_id(&self) -> u32 {
        match self {
            Self::Byte(_) => Self::TYPE_BYTE,
            Self::Short(_) => Self::TYPE_SHORT,
            Self::Int(_) => Self::TYPE_INT,
            Self::Float(_) => Self::TYPE_FLOAT,
            Self::String(_) => Self::TYPE_STRING,
            Self::CompoundTag(_) => Self::TYPE_COMPOUND_TAG,
            Self::BlockPos(_) => Self::TYPE_BLOCK_POS,
            Self::Long(_) => Self::TYPE_LONG,
            Self::Vector3f(_) => Self::TYPE_VECTOR3F,
        }
    }

    fn read_value(r: &mut PacketSerializer, type_tag: u32) -> Result<Self, DecodeError> {
        Ok(match type_tag {
            Self::TYPE_BYTE => Self::Byte(r.get_i8()?),
            Self::TYPE_SHORT => Self::Short(r.get_li16()?),
            Self::TYPE_INT => Self::Int(r.get_var_i32()?),
            Self::TYPE_FLOAT => Self::Float(r.get_lf32()?),
            Self::TYPE_STRING => Self::String(r.get_string()?),
            Self::TYPE_COMPOUND_TAG => Self::CompoundTag(r.get_nbt_root()?),
            Self::TYPE_BLOCK_POS => Self::BlockPos(r.get_signed_block_position()?),
            Self::TYPE_LONG => Self::Long(r.get_var_i64()?),
            Self::TYPE_VECTOR3F => Self::Vector3f(r.get_vector3()?),
            tag => {
                return Err(DecodeError::UnknownVariantTag {
                    kind: "metadata property type",
                    tag,
                })
            }
        })
    }

    fn write_value(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        match self {
            Self::Byte(value) => w.put_i8(*value),
            Self::Short(value) => w.put_li16(*value),
            Self::Int(value) => w.put_var_i32(*value),
            Self::Float(value) => w.put_lf32(*value),
            Self::String(value) => w.put_string(value)?,
            Self::CompoundTag(value) => w.put_nbt_root(value)?,
            Self::BlockPos(value) => w.put_signed_block_position(*value),
            Self::Long(value) => w.put_var_i64(*value),
            Self::Vector3f(value) => w.put_vector3(*value),
        }
        Ok(())
    }
}

pub(crate) fn read_dictionary(r: &mut PacketSerializer) -> Result<EntityMetadata, DecodeError> {
    let count = r.get_var_u32()? as usize;
    let mut entries = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let key = r.get_var_u32()?;
        let type_tag = r.get_var_u32()?;
        entries.push((key, MetadataProperty::read_value(r, type_tag)?));
    }
    Ok(entries)
}

pub(crate) fn write_dictionary(
    w: &mut PacketSerializer,
    entries: &EntityMetadata,
) -> Result<(), EncodeError> {
    let count = u32::try_from(entries.len())
        .map_err(|_| EncodeError::OutOfRange(format!("{} metadata entries", entries.len())))?;
    w.put_var_u32(count);
    for (key, property) in entries {
        w.put_var_u32(*key);
        w.put_var_u32(property.type_id());
        property.write_value(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use fastnbt::nbt;

    use super::*;
    use crate::dictionary::{ItemTypeDictionary, ItemTypeEntry};
    use crate::version::ProtocolVersion;

    fn dictionary() -> ItemTypeDictionary {
        ItemTypeDictionary::new(vec![ItemTypeEntry {
            string_id: "minecraft:stick".to_string(),
            numeric_id: 280,
        }])
        .unwrap()
    }

    #[test]
    fn every_property_type_roundtrips() {
        let dict = dictionary();
        let entries: EntityMetadata = vec![
            (keys::FLAGS, MetadataProperty::Long(0x40_0000)),
            (keys::HEALTH, MetadataProperty::Int(-20)),
            (keys::AIR, MetadataProperty::Short(300)),
            (keys::SCALE, MetadataProperty::Float(0.5)),
            (keys::NAMETAG, MetadataProperty::String("Steve".to_string())),
            (9, MetadataProperty::Byte(-3)),
            (10, MetadataProperty::CompoundTag(nbt!({"charge": 2}))),
            (11, MetadataProperty::BlockPos(BlockPosition::new(1, -60, 2))),
            (12, MetadataProperty::Vector3f(Vector3f::new(0.0, 1.0, -1.0))),
        ];

        let mut w = PacketSerializer::encoder(ProtocolVersion::CURRENT, &dict);
        w.put_entity_metadata(&entries).unwrap();
        let payload = w.into_payload();

        let mut r = PacketSerializer::decoder(&payload, ProtocolVersion::CURRENT, &dict);
        assert_eq!(r.get_entity_metadata().unwrap(), entries);
        assert!(r.is_empty());
    }

    #[test]
    fn empty_dictionary_is_a_single_zero() {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::CURRENT, &dict);
        w.put_entity_metadata(&Vec::new()).unwrap();
        let payload = w.into_payload();
        assert_eq!(&payload[..], &[0]);
    }

    #[test]
    fn unknown_type_tag_is_fatal() {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::CURRENT, &dict);
        w.put_var_u32(1);
        w.put_var_u32(keys::FLAGS);
        w.put_var_u32(99);
        let payload = w.into_payload();

        let mut r = PacketSerializer::decoder(&payload, ProtocolVersion::CURRENT, &dict);
        assert!(matches!(
            r.get_entity_metadata(),
            Err(DecodeError::UnknownVariantTag {
                kind: "metadata property type",
                tag: 99
            })
        ));
    }
}
