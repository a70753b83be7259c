use std::ops::{Deref, DerefMut};

use bytes::Bytes;
use fastnbt::Value;
use uuid::Uuid;

use crate::bytebuf::{ByteCursor, DecodeError, EncodeError};
use crate::dictionary::ItemTypeDictionary;
use crate::nbt;
use crate::types::block_position::BlockPosition;
use crate::types::entity_link::EntityLink;
use crate::types::item_stack::ItemStackWrapper;
use crate::types::metadata::{self, EntityMetadata};
use crate::types::vector3f::Vector3f;
use crate::version::ProtocolVersion;

/// A [`ByteCursor`] bound to the protocol version and item dictionary of one
/// session, with the composite wire shapes layered on top.
///
/// Primitive reads and writes are reachable directly through deref. A
/// serializer is exclusively owned for the duration of one encode or decode
/// call; nothing in it is shared.
pub struct PacketSerializer<'a> {
    cursor: ByteCursor,
    protocol: ProtocolVersion,
    dictionary: &'a ItemTypeDictionary,
}

impl<'a> PacketSerializer<'a> {
    /// Serializer over a received payload, positioned at its first byte.
    pub fn decoder(
        payload: &[u8],
        protocol: ProtocolVersion,
        dictionary: &'a ItemTypeDictionary,
    ) -> Self {
        Self {
            cursor: ByteCursor::from(payload),
            protocol,
            dictionary,
        }
    }

    /// Empty serializer collecting outgoing bytes.
    pub fn encoder(protocol: ProtocolVersion, dictionary: &'a ItemTypeDictionary) -> Self {
        Self {
            cursor: ByteCursor::new(),
            protocol,
            dictionary,
        }
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.protocol
    }

    pub fn dictionary(&self) -> &'a ItemTypeDictionary {
        self.dictionary
    }

    pub fn into_payload(self) -> Bytes {
        self.cursor.into_bytes()
    }

    /// Serializer over a nested blob, sharing this session's version and
    /// dictionary binding. The modern item format carries such a blob.
    pub fn sub_decoder(&self, blob: &[u8]) -> PacketSerializer<'a> {
        PacketSerializer::decoder(blob, self.protocol, self.dictionary)
    }

    pub fn sub_encoder(&self) -> PacketSerializer<'a> {
        PacketSerializer::encoder(self.protocol, self.dictionary)
    }

    pub fn get_uuid(&mut self) -> Result<Uuid, DecodeError> {
        let most = self.get_lu64()?;
        let least = self.get_lu64()?;
        Ok(Uuid::from_u64_pair(most, least))
    }

    pub fn put_uuid(&mut self, uuid: &Uuid) {
        let (most, least) = uuid.as_u64_pair();
        self.put_lu64(most);
        self.put_lu64(least);
    }

    pub fn get_vector3(&mut self) -> Result<Vector3f, DecodeError> {
        Ok(Vector3f {
            x: self.get_lf32()?,
            y: self.get_lf32()?,
            z: self.get_lf32()?,
        })
    }

    pub fn put_vector3(&mut self, vector: Vector3f) {
        self.put_lf32(vector.x);
        self.put_lf32(vector.y);
        self.put_lf32(vector.z);
    }

    /// The wire has no presence flag for optional vectors; an absent value
    /// is written as a zero vector and decodes as one.
    pub fn put_vector3_nullable(&mut self, vector: Option<Vector3f>) {
        self.put_vector3(vector.unwrap_or(Vector3f::ZERO));
    }

    /// Unique IDs identify an actor for its whole lifetime and are zig-zag
    /// encoded. Not interchangeable with runtime IDs.
    pub fn get_actor_unique_id(&mut self) -> Result<i64, DecodeError> {
        self.get_var_i64()
    }

    pub fn put_actor_unique_id(&mut self, id: i64) {
        self.put_var_i64(id);
    }

    /// Runtime IDs are session-scoped handles, plain unsigned varints.
    pub fn get_actor_runtime_id(&mut self) -> Result<u64, DecodeError> {
        self.get_var_u64()
    }

    pub fn put_actor_runtime_id(&mut self, id: u64) {
        self.put_var_u64(id);
    }

    pub fn get_block_position(&mut self) -> Result<BlockPosition, DecodeError> {
        Ok(BlockPosition {
            x: self.get_var_i32()?,
            y: self.get_var_u32()? as i32,
            z: self.get_var_i32()?,
        })
    }

    pub fn put_block_position(&mut self, position: BlockPosition) {
        self.put_var_i32(position.x);
        self.put_var_u32(position.y as u32);
        self.put_var_i32(position.z);
    }

    /// Variant with a signed y, used where the position can be below the
    /// world floor (metadata positions).
    pub fn get_signed_block_position(&mut self) -> Result<BlockPosition, DecodeError> {
        Ok(BlockPosition {
            x: self.get_var_i32()?,
            y: self.get_var_i32()?,
            z: self.get_var_i32()?,
        })
    }

    pub fn put_signed_block_position(&mut self, position: BlockPosition) {
        self.put_var_i32(position.x);
        self.put_var_i32(position.y);
        self.put_var_i32(position.z);
    }

    /// Request-correlation ID shared between client and server. Symmetric
    /// bit-for-bit with [`Self::put_generic_type_network_id`].
    pub fn get_generic_type_network_id(&mut self) -> Result<i32, DecodeError> {
        self.get_var_i32()
    }

    pub fn put_generic_type_network_id(&mut self, id: i32) {
        self.put_var_i32(id);
    }

    pub fn get_nbt_root(&mut self) -> Result<Value, DecodeError> {
        nbt::get_compound_root(&mut self.cursor)
    }

    pub fn put_nbt_root(&mut self, value: &Value) -> Result<(), EncodeError> {
        nbt::put_compound_root(&mut self.cursor, value)
    }

    pub fn get_entity_metadata(&mut self) -> Result<EntityMetadata, DecodeError> {
        metadata::read_dictionary(self)
    }

    pub fn put_entity_metadata(&mut self, entries: &EntityMetadata) -> Result<(), EncodeError> {
        metadata::write_dictionary(self, entries)
    }

    pub fn get_entity_link(&mut self) -> Result<EntityLink, DecodeError> {
        EntityLink::read(self)
    }

    pub fn put_entity_link(&mut self, link: &EntityLink) {
        link.write(self);
    }

    pub fn get_entity_links(&mut self) -> Result<Vec<EntityLink>, DecodeError> {
        let count = self.get_var_u32()? as usize;
        let mut links = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            links.push(EntityLink::read(self)?);
        }
        Ok(links)
    }

    pub fn put_entity_links(&mut self, links: &[EntityLink]) -> Result<(), EncodeError> {
        let count = u32::try_from(links.len())
            .map_err(|_| EncodeError::OutOfRange(format!("{} entity links", links.len())))?;
        self.put_var_u32(count);
        for link in links {
            link.write(self);
        }
        Ok(())
    }

    /// Dual-format item read. Above the modern-format gate the
    /// `has_stack_ids` flag is ignored; the format carries its own.
    pub fn get_item_stack_wrapper(
        &mut self,
        has_stack_ids: bool,
    ) -> Result<ItemStackWrapper, DecodeError> {
        ItemStackWrapper::read(self, has_stack_ids)
    }

    pub fn put_item_stack_wrapper(
        &mut self,
        wrapper: &ItemStackWrapper,
        has_stack_ids: bool,
    ) -> Result<(), EncodeError> {
        wrapper.write(self, has_stack_ids)
    }
}

impl Deref for PacketSerializer<'_> {
    type Target = ByteCursor;

    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl DerefMut for PacketSerializer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}
