use num_derive::FromPrimitive;

use crate::bytebuf::{DecodeError, EncodeError};
use crate::serializer::PacketSerializer;
use crate::types::block_position::BlockPosition;
use crate::types::inventory::action::NetworkInventoryAction;
use crate::types::item_stack::ItemStackWrapper;
use crate::types::vector3f::Vector3f;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalTransactionData {
    pub actions: Vec<NetworkInventoryAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum UseItemAction {
    ClickBlock = 0,
    ClickAir = 1,
    BreakBlock = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseItemTransactionData {
    pub actions: Vec<NetworkInventoryAction>,
    pub action_type: u32,
    pub block_position: BlockPosition,
    pub face: i32,
    pub hotbar_slot: i32,
    pub item_in_hand: ItemStackWrapper,
    pub player_position: Vector3f,
    pub click_position: Vector3f,
    pub block_runtime_id: u32,
}

impl UseItemTransactionData {
    pub fn action(&self) -> Option<UseItemAction> {
        num_traits::FromPrimitive::from_u32(self.action_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum UseItemOnEntityAction {
    Interact = 0,
    Attack = 1,
    ItemInteract = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseItemOnEntityTransactionData {
    pub actions: Vec<NetworkInventoryAction>,
    pub actor_runtime_id: u64,
    pub action_type: u32,
    pub hotbar_slot: i32,
    pub item_in_hand: ItemStackWrapper,
    pub player_position: Vector3f,
    pub click_position: Vector3f,
}

impl UseItemOnEntityTransactionData {
    pub fn action(&self) -> Option<UseItemOnEntityAction> {
        num_traits::FromPrimitive::from_u32(self.action_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum ReleaseItemAction {
    Release = 0,
    Consume = 1,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseItemTransactionData {
    pub actions: Vec<NetworkInventoryAction>,
    pub action_type: u32,
    pub hotbar_slot: i32,
    pub item_in_hand: ItemStackWrapper,
    pub head_position: Vector3f,
}

impl ReleaseItemTransactionData {
    pub fn action(&self) -> Option<ReleaseItemAction> {
        num_traits::FromPrimitive::from_u32(self.action_type)
    }
}

/// The five payload shapes multiplexed inside the inventory transaction
/// packet. The wire tag always equals [`Self::type_id`] of the live variant.
///
/// Every shape shares a leading action list; a Mismatch transaction must
/// arrive with that list empty.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionData {
    Normal(NormalTransactionData),
    Mismatch,
    UseItem(UseItemTransactionData),
    UseItemOnEntity(UseItemOnEntityTransactionData),
    ReleaseItem(ReleaseItemTransactionData),
}

impl TransactionData {
    pub const TYPE_NORMAL: u32 = 0;
    pub const TYPE_MISMATCH: u32 = 1;
    pub const TYPE_USE_ITEM: u32 = 2;
    pub const TYPE_USE_ITEM_ON_ENTITY: u32 = 3;
    pub const TYPE_RELEASE_ITEM: u32 = 4;

    pub fn type_id(&self) -> u32 {
        match self {
            Self::Normal(_) => Self::TYPE_NORMAL,
            Self::Mismatch => Self::TYPE_MISMATCH,
            Self::UseItem(_) => Self::TYPE_USE_ITEM,
            Self::UseItemOnEntity(_) => Self::TYPE_USE_ITEM_ON_ENTITY,
            Self::ReleaseItem(_) => Self::TYPE_RELEASE_ITEM,
        }
    }

    pub fn actions(&self) -> &[NetworkInventoryAction] {
        match self {
            Self::Normal(data) => &data.actions,
            Self::Mismatch => &[],
            Self::UseItem(data) => &data.actions,
            Self::UseItemOnEntity(data) => &data.actions,
            Self::ReleaseItem(data) => &data.actions,
        }
    }

    /// Decodes the variant matching `tag`. The tag itself has already been
    /// consumed by the caller; an unknown tag fails before any payload byte
    /// is touched.
    pub fn decode(
        r: &mut PacketSerializer,
        tag: u32,
        has_stack_ids: bool,
    ) -> Result<Self, DecodeError> {
        match tag {
            Self::TYPE_NORMAL => {
                let actions = decode_actions(r, has_stack_ids)?;
                Ok(Self::Normal(NormalTransactionData { actions }))
            }
            Self::TYPE_MISMATCH => {
                let actions = decode_actions(r, has_stack_ids)?;
                if !actions.is_empty() {
                    return Err(DecodeError::InvalidValue(format!(
                        "mismatch transaction with {} actions",
                        actions.len()
                    )));
                }
                Ok(Self::Mismatch)
            }
            Self::TYPE_USE_ITEM => {
                let actions = decode_actions(r, has_stack_ids)?;
                Ok(Self::UseItem(UseItemTransactionData {
                    actions,
                    action_type: r.get_var_u32()?,
                    block_position: r.get_block_position()?,
                    face: r.get_var_i32()?,
                    hotbar_slot: r.get_var_i32()?,
                    item_in_hand: r.get_item_stack_wrapper(has_stack_ids)?,
                    player_position: r.get_vector3()?,
                    click_position: r.get_vector3()?,
                    block_runtime_id: r.get_var_u32()?,
                }))
            }
            Self::TYPE_USE_ITEM_ON_ENTITY => {
                let actions = decode_actions(r, has_stack_ids)?;
                Ok(Self::UseItemOnEntity(UseItemOnEntityTransactionData {
                    actions,
                    actor_runtime_id: r.get_actor_runtime_id()?,
                    action_type: r.get_var_u32()?,
                    hotbar_slot: r.get_var_i32()?,
                    item_in_hand: r.get_item_stack_wrapper(has_stack_ids)?,
                    player_position: r.get_vector3()?,
                    click_position: r.get_vector3()?,
                }))
            }
            Self::TYPE_RELEASE_ITEM => {
                let actions = decode_actions(r, has_stack_ids)?;
                Ok(Self::ReleaseItem(ReleaseItemTransactionData {
                    actions,
                    action_type: r.get_var_u32()?,
                    hotbar_slot: r.get_var_i32()?,
                    item_in_hand: r.get_item_stack_wrapper(has_stack_ids)?,
                    head_position: r.get_vector3()?,
                }))
            }
            tag => Err(DecodeError::UnknownVariantTag {
                kind: "transaction type",
                tag,
            }),
        }
    }

    /// Writes the variant data. The caller writes the tag first, using
    /// [`Self::type_id`].
    pub fn encode(
        &self,
        w: &mut PacketSerializer,
        has_stack_ids: bool,
    ) -> Result<(), EncodeError> {
        encode_actions(w, self.actions(), has_stack_ids)?;
        match self {
            Self::Normal(_) | Self::Mismatch => Ok(()),
            Self::UseItem(data) => {
                w.put_var_u32(data.action_type);
                w.put_block_position(data.block_position);
                w.put_var_i32(data.face);
                w.put_var_i32(data.hotbar_slot);
                w.put_item_stack_wrapper(&data.item_in_hand, has_stack_ids)?;
                w.put_vector3(data.player_position);
                w.put_vector3(data.click_position);
                w.put_var_u32(data.block_runtime_id);
                Ok(())
            }
            Self::UseItemOnEntity(data) => {
                w.put_actor_runtime_id(data.actor_runtime_id);
                w.put_var_u32(data.action_type);
                w.put_var_i32(data.hotbar_slot);
                w.put_item_stack_wrapper(&data.item_in_hand, has_stack_ids)?;
                w.put_vector3(data.player_position);
                w.put_vector3(data.click_position);
                Ok(())
            }
            Self::ReleaseItem(data) => {
                w.put_var_u32(data.action_type);
                w.put_var_i32(data.hotbar_slot);
                w.put_item_stack_wrapper(&data.item_in_hand, has_stack_ids)?;
                w.put_vector3(data.head_position);
                Ok(())
            }
        }
    }
}

fn decode_actions(
    r: &mut PacketSerializer,
    has_stack_ids: bool,
) -> Result<Vec<NetworkInventoryAction>, DecodeError> {
    let count = r.get_var_u32()? as usize;
    let mut actions = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        actions.push(NetworkInventoryAction::read(r, has_stack_ids)?);
    }
    Ok(actions)
}

fn encode_actions(
    w: &mut PacketSerializer,
    actions: &[NetworkInventoryAction],
    has_stack_ids: bool,
) -> Result<(), EncodeError> {
    let count = u32::try_from(actions.len())
        .map_err(|_| EncodeError::OutOfRange(format!("{} inventory actions", actions.len())))?;
    w.put_var_u32(count);
    for action in actions {
        action.write(w, has_stack_ids)?;
    }
    Ok(())
}
