use fastnbt::Value;

use crate::bytebuf::{DecodeError, EncodeError};
use crate::serializer::PacketSerializer;
use crate::version::ProtocolVersion;

/// Network view of an item stack. Only the wire contract lives here; what
/// the ids mean is the item library's business.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemStack {
    /// Session-scoped numeric item id, 0 for the empty stack.
    pub network_id: i32,
    pub count: u16,
    pub metadata: u32,
    /// Only carried by the modern format; 0 on the legacy path.
    pub block_runtime_id: i32,
    pub nbt: Option<Value>,
    pub can_place_on: Vec<String>,
    pub can_destroy: Vec<String>,
    /// Written for shield items only, as resolved through the session
    /// dictionary.
    pub blocking_tick: i64,
}

impl ItemStack {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.network_id == 0
    }
}

/// An item stack together with its server-authoritative stack id, in
/// whichever of the two wire representations the stream uses.
///
/// Exactly one representation is live. `Modern` is the self-describing
/// format used from 1.16.220 on (and, below that, by streams that carry
/// explicit stack ids); `Legacy` has no stack id at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemStackWrapper {
    Modern { stack_id: i32, stack: ItemStack },
    Legacy { stack: ItemStack },
}

impl ItemStackWrapper {
    /// Canonical view, dropping the stack id if one is present.
    pub fn stack(&self) -> &ItemStack {
        match self {
            Self::Modern { stack, .. } | Self::Legacy { stack } => stack,
        }
    }

    pub fn into_stack(self) -> ItemStack {
        match self {
            Self::Modern { stack, .. } | Self::Legacy { stack } => stack,
        }
    }

    pub(crate) fn read(
        r: &mut PacketSerializer,
        has_stack_ids: bool,
    ) -> Result<Self, DecodeError> {
        if r.protocol() >= ProtocolVersion::V1_16_220 {
            read_modern(r)
        } else if has_stack_ids {
            let stack_id = r.get_generic_type_network_id()?;
            let stack = read_legacy_body(r)?;
            Ok(Self::Modern { stack_id, stack })
        } else {
            let stack = read_legacy_body(r)?;
            Ok(Self::Legacy { stack })
        }
    }

    pub(crate) fn write(
        &self,
        w: &mut PacketSerializer,
        has_stack_ids: bool,
    ) -> Result<(), EncodeError> {
        if w.protocol() >= ProtocolVersion::V1_16_220 {
            match self {
                Self::Modern { stack_id, stack } => write_modern(w, *stack_id, stack),
                Self::Legacy { .. } => Err(EncodeError::OutOfRange(
                    "legacy item wrapper on a modern-format stream".to_string(),
                )),
            }
        } else if has_stack_ids {
            match self {
                Self::Modern { stack_id, stack } => {
                    w.put_generic_type_network_id(*stack_id);
                    write_legacy_body(w, stack)
                }
                Self::Legacy { .. } => Err(EncodeError::OutOfRange(
                    "stream carries stack ids but the wrapper has none".to_string(),
                )),
            }
        } else {
            match self {
                Self::Legacy { stack } => write_legacy_body(w, stack),
                Self::Modern { .. } => Err(EncodeError::OutOfRange(
                    "stack id present but the stream cannot carry one".to_string(),
                )),
            }
        }
    }
}

fn read_modern(r: &mut PacketSerializer) -> Result<ItemStackWrapper, DecodeError> {
    let network_id = r.get_var_i32()?;
    if network_id == 0 {
        return Ok(ItemStackWrapper::Modern {
            stack_id: 0,
            stack: ItemStack::empty(),
        });
    }
    let count = r.get_lu16()?;
    let metadata = r.get_var_u32()?;
    let stack_id = if r.get_bool()? {
        r.get_generic_type_network_id()?
    } else {
        0
    };
    let block_runtime_id = r.get_var_i32()?;

    let blob = r.get_prefixed_bytes()?;
    let mut extra = r.sub_decoder(&blob);
    let nbt = read_nbt_marker(&mut extra)?;
    let can_place_on = read_le_string_list(&mut extra)?;
    let can_destroy = read_le_string_list(&mut extra)?;
    let blocking_tick = if r.dictionary().shield_runtime_id() == Some(network_id) {
        extra.get_li64()?
    } else {
        0
    };

    Ok(ItemStackWrapper::Modern {
        stack_id,
        stack: ItemStack {
            network_id,
            count,
            metadata,
            block_runtime_id,
            nbt,
            can_place_on,
            can_destroy,
            blocking_tick,
        },
    })
}

fn write_modern(
    w: &mut PacketSerializer,
    stack_id: i32,
    stack: &ItemStack,
) -> Result<(), EncodeError> {
    if stack.is_empty() {
        w.put_var_i32(0);
        return Ok(());
    }
    w.put_var_i32(stack.network_id);
    w.put_lu16(stack.count);
    w.put_var_u32(stack.metadata);
    if stack_id != 0 {
        w.put_bool(true);
        w.put_generic_type_network_id(stack_id);
    } else {
        w.put_bool(false);
    }
    w.put_var_i32(stack.block_runtime_id);

    let mut extra = w.sub_encoder();
    write_nbt_marker(&mut extra, stack.nbt.as_ref())?;
    write_le_string_list(&mut extra, &stack.can_place_on)?;
    write_le_string_list(&mut extra, &stack.can_destroy)?;
    if w.dictionary().shield_runtime_id() == Some(stack.network_id) {
        extra.put_li64(stack.blocking_tick);
    }
    w.put_prefixed_bytes(&extra.into_payload())
}

fn read_legacy_body(r: &mut PacketSerializer) -> Result<ItemStack, DecodeError> {
    let network_id = r.get_var_i32()?;
    if network_id == 0 {
        return Ok(ItemStack::empty());
    }
    let aux = r.get_var_i32()?;
    let count = (aux & 0xFF) as u16;
    let metadata = ((aux >> 8) & 0x7FFF) as u32;
    let nbt = read_nbt_marker(r)?;
    let can_place_on = read_varint_string_list(r)?;
    let can_destroy = read_varint_string_list(r)?;
    let blocking_tick = if r.dictionary().shield_runtime_id() == Some(network_id) {
        r.get_var_i64()?
    } else {
        0
    };
    Ok(ItemStack {
        network_id,
        count,
        metadata,
        block_runtime_id: 0,
        nbt,
        can_place_on,
        can_destroy,
        blocking_tick,
    })
}

fn write_legacy_body(w: &mut PacketSerializer, stack: &ItemStack) -> Result<(), EncodeError> {
    if stack.is_empty() {
        w.put_var_i32(0);
        return Ok(());
    }
    if stack.count > 0xFF {
        return Err(EncodeError::OutOfRange(format!(
            "legacy stack count {}",
            stack.count
        )));
    }
    if stack.metadata > 0x7FFF {
        return Err(EncodeError::OutOfRange(format!(
            "legacy item metadata {}",
            stack.metadata
        )));
    }
    w.put_var_i32(stack.network_id);
    w.put_var_i32(((stack.metadata as i32) << 8) | i32::from(stack.count));
    write_nbt_marker(w, stack.nbt.as_ref())?;
    write_varint_string_list(w, &stack.can_place_on)?;
    write_varint_string_list(w, &stack.can_destroy)?;
    if w.dictionary().shield_runtime_id() == Some(stack.network_id) {
        w.put_var_i64(stack.blocking_tick);
    }
    Ok(())
}

/// Little-endian u16 marker: 0 for no tag, 0xFFFF for a versioned tag tree.
fn read_nbt_marker(r: &mut PacketSerializer) -> Result<Option<Value>, DecodeError> {
    match r.get_lu16()? {
        0 => Ok(None),
        0xFFFF => {
            let version = r.get_u8()?;
            if version != 1 {
                return Err(DecodeError::InvalidValue(format!(
                    "unsupported item nbt version {version}"
                )));
            }
            Ok(Some(r.get_nbt_root()?))
        }
        marker => Err(DecodeError::InvalidValue(format!(
            "unexpected item nbt length marker {marker:#06x}"
        ))),
    }
}

fn write_nbt_marker(w: &mut PacketSerializer, nbt: Option<&Value>) -> Result<(), EncodeError> {
    match nbt {
        None => {
            w.put_lu16(0);
            Ok(())
        }
        Some(tree) => {
            w.put_lu16(0xFFFF);
            w.put_u8(1);
            w.put_nbt_root(tree)
        }
    }
}

/// Little-endian i32 count, entries with little-endian u16 length prefixes.
/// Only used inside the modern extra-data blob.
fn read_le_string_list(r: &mut PacketSerializer) -> Result<Vec<String>, DecodeError> {
    let count = r.get_li32()?;
    if count < 0 {
        return Err(DecodeError::InvalidValue(format!(
            "negative string list length {count}"
        )));
    }
    let mut entries = Vec::with_capacity((count as usize).min(64));
    for _ in 0..count {
        entries.push(r.get_le_string()?);
    }
    Ok(entries)
}

fn write_le_string_list(w: &mut PacketSerializer, entries: &[String]) -> Result<(), EncodeError> {
    let count = i32::try_from(entries.len())
        .map_err(|_| EncodeError::OutOfRange(format!("{} list entries", entries.len())))?;
    w.put_li32(count);
    for entry in entries {
        w.put_le_string(entry)?;
    }
    Ok(())
}

fn read_varint_string_list(r: &mut PacketSerializer) -> Result<Vec<String>, DecodeError> {
    let count = r.get_var_i32()?;
    if count < 0 {
        return Err(DecodeError::InvalidValue(format!(
            "negative string list length {count}"
        )));
    }
    let mut entries = Vec::with_capacity((count as usize).min(64));
    for _ in 0..count {
        entries.push(r.get_string()?);
    }
    Ok(entries)
}

fn write_varint_string_list(
    w: &mut PacketSerializer,
    entries: &[String],
) -> Result<(), EncodeError> {
    let count = i32::try_from(entries.len())
        .map_err(|_| EncodeError::OutOfRange(format!("{} list entries", entries.len())))?;
    w.put_var_i32(count);
    for entry in entries {
        w.put_string(entry)?;
    }
    Ok(())
}
