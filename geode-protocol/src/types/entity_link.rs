use crate::bytebuf::DecodeError;
use crate::serializer::PacketSerializer;
use crate::version::ProtocolVersion;

/// Attaches one actor to another (riding, passengers). Links are applied in
/// the order they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityLink {
    pub from_actor_unique_id: i64,
    pub to_actor_unique_id: i64,
    pub link_type: u8,
    pub immediate: bool,
    /// Whether the rider initiated the link. Only on the wire from 1.16.0.
    pub caused_by_rider: bool,
}

impl EntityLink {
    pub const TYPE_REMOVE: u8 = 0;
    pub const TYPE_RIDER: u8 = 1;
    pub const TYPE_PASSENGER: u8 = 2;

    pub fn read(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let from_actor_unique_id = r.get_actor_unique_id()?;
        let to_actor_unique_id = r.get_actor_unique_id()?;
        let link_type = r.get_u8()?;
        let immediate = r.get_bool()?;
        let caused_by_rider = if r.protocol() >= ProtocolVersion::V1_16_0 {
            r.get_bool()?
        } else {
            false
        };
        Ok(Self {
            from_actor_unique_id,
            to_actor_unique_id,
            link_type,
            immediate,
            caused_by_rider,
        })
    }

    pub fn write(&self, w: &mut PacketSerializer) {
        w.put_actor_unique_id(self.from_actor_unique_id);
        w.put_actor_unique_id(self.to_actor_unique_id);
        w.put_u8(self.link_type);
        w.put_bool(self.immediate);
        if w.protocol() >= ProtocolVersion::V1_16_0 {
            w.put_bool(self.caused_by_rider);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dictionary::{ItemTypeDictionary, ItemTypeEntry};

    fn dictionary() -> ItemTypeDictionary {
        ItemTypeDictionary::new(vec![ItemTypeEntry {
            string_id: "minecraft:saddle".to_string(),
            numeric_id: 329,
        }])
        .unwrap()
    }

    fn link() -> EntityLink {
        EntityLink {
            from_actor_unique_id: -2,
            to_actor_unique_id: 60,
            link_type: EntityLink::TYPE_RIDER,
            immediate: true,
            caused_by_rider: true,
        }
    }

    #[test]
    fn roundtrip_with_rider_flag() {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_19_10, &dict);
        w.put_entity_link(&link());
        let payload = w.into_payload();

        let mut r = PacketSerializer::decoder(&payload, ProtocolVersion::V1_19_10, &dict);
        assert_eq!(r.get_entity_link().unwrap(), link());
        assert!(r.is_empty());
    }

    #[test]
    fn rider_flag_absent_below_gate() {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_14_60, &dict);
        w.put_entity_link(&link());
        let payload = w.into_payload();
        // two one-byte unique ids, type, immediate; no rider flag
        assert_eq!(payload.len(), 4);

        let mut r = PacketSerializer::decoder(&payload, ProtocolVersion::V1_14_60, &dict);
        let decoded = r.get_entity_link().unwrap();
        assert!(!decoded.caused_by_rider);
        assert!(r.is_empty());
    }

    #[test]
    fn link_list_roundtrip() {
        let dict = dictionary();
        let links = vec![
            link(),
            EntityLink {
                link_type: EntityLink::TYPE_REMOVE,
                ..EntityLink::default()
            },
        ];
        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_19_10, &dict);
        w.put_entity_links(&links).unwrap();
        let payload = w.into_payload();

        let mut r = PacketSerializer::decoder(&payload, ProtocolVersion::V1_19_10, &dict);
        assert_eq!(r.get_entity_links().unwrap(), links);
    }
}
