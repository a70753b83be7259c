use crate::bytebuf::{DecodeError, EncodeError};
use crate::serializer::PacketSerializer;
use crate::types::item_stack::ItemStackWrapper;

/// Where an inventory action took place. The wire tags the source kind and
/// then a kind-specific field, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySource {
    Container { window_id: i32 },
    World { flags: u32 },
    Creative,
    /// Crafting-related windows that the client still reports through the
    /// deprecated catch-all source id.
    Crafting { window_id: i32 },
}

impl InventorySource {
    pub const SOURCE_CONTAINER: u32 = 0;
    pub const SOURCE_WORLD: u32 = 2;
    pub const SOURCE_CREATIVE: u32 = 3;
    pub const SOURCE_CRAFTING: u32 = 99999;

    pub fn source_type(&self) -> u32 {
        match self {
            Self::Container { .. } => Self::SOURCE_CONTAINER,
            Self::World { .. } => Self::SOURCE_WORLD,
            Self::Creative => Self::SOURCE_CREATIVE,
            Self::Crafting { .. } => Self::SOURCE_CRAFTING,
        }
    }

    fn read(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let source_type = r.get_var_u32()?;
        Ok(match source_type {
            Self::SOURCE_CONTAINER => Self::Container {
                window_id: r.get_var_i32()?,
            },
            Self::SOURCE_WORLD => Self::World {
                flags: r.get_var_u32()?,
            },
            Self::SOURCE_CREATIVE => Self::Creative,
            Self::SOURCE_CRAFTING => Self::Crafting {
                window_id: r.get_var_i32()?,
            },
            tag => {
                return Err(DecodeError::UnknownVariantTag {
                    kind: "inventory action source",
                    tag,
                })
            }
        })
    }

    fn write(&self, w: &mut PacketSerializer) {
        w.put_var_u32(self.source_type());
        match self {
            Self::Container { window_id } | Self::Crafting { window_id } => {
                w.put_var_i32(*window_id);
            }
            Self::World { flags } => w.put_var_u32(*flags),
            Self::Creative => {}
        }
    }
}

/// One slot change inside a transaction: which slot moved from what to what.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInventoryAction {
    pub source: InventorySource,
    pub inventory_slot: u32,
    pub old_item: ItemStackWrapper,
    pub new_item: ItemStackWrapper,
}

impl NetworkInventoryAction {
    pub fn read(r: &mut PacketSerializer, has_stack_ids: bool) -> Result<Self, DecodeError> {
        Ok(Self {
            source: InventorySource::read(r)?,
            inventory_slot: r.get_var_u32()?,
            old_item: r.get_item_stack_wrapper(has_stack_ids)?,
            new_item: r.get_item_stack_wrapper(has_stack_ids)?,
        })
    }

    pub fn write(
        &self,
        w: &mut PacketSerializer,
        has_stack_ids: bool,
    ) -> Result<(), EncodeError> {
        self.source.write(w);
        w.put_var_u32(self.inventory_slot);
        w.put_item_stack_wrapper(&self.old_item, has_stack_ids)?;
        w.put_item_stack_wrapper(&self.new_item, has_stack_ids)
    }
}

/// Client hint listing the slots it believes a request touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedSlots {
    pub container_id: u8,
    pub changed_slot_indexes: Vec<u8>,
}

impl ChangedSlots {
    pub fn read(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let container_id = r.get_u8()?;
        let count = r.get_var_u32()? as usize;
        let mut changed_slot_indexes = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            changed_slot_indexes.push(r.get_u8()?);
        }
        Ok(Self {
            container_id,
            changed_slot_indexes,
        })
    }

    pub fn write(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        w.put_u8(self.container_id);
        let count = u32::try_from(self.changed_slot_indexes.len()).map_err(|_| {
            EncodeError::OutOfRange(format!(
                "{} changed slots",
                self.changed_slot_indexes.len()
            ))
        })?;
        w.put_var_u32(count);
        for index in &self.changed_slot_indexes {
            w.put_u8(*index);
        }
        Ok(())
    }
}
