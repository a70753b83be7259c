use crate::bytebuf::{DecodeError, EncodeError};
use crate::packet::{DataPacket, PacketHandler};
use crate::serializer::PacketSerializer;
use crate::types::inventory::{ChangedSlots, TransactionData};
use crate::version::ProtocolVersion;

/// Carries one client inventory transaction, multiplexing the five
/// transaction payload shapes behind a leading type tag.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransactionPacket {
    /// Correlates the transaction with an item stack request, 0 for none.
    pub request_id: i32,
    /// Present on the wire only when `request_id` is nonzero.
    pub request_changed_slots: Vec<ChangedSlots>,
    pub tr_data: TransactionData,
    /// Below 1.16.220 the stream says whether legacy items carry stack ids;
    /// from 1.16.220 on the item format always does, and this stays true.
    pub has_item_stack_ids: bool,
}

impl DataPacket for InventoryTransactionPacket {
    const NETWORK_ID: u32 = 0x1E;

    fn decode_payload(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let request_id = r.get_generic_type_network_id()?;
        let mut request_changed_slots = Vec::new();
        if request_id != 0 {
            let count = r.get_var_u32()? as usize;
            request_changed_slots.reserve(count.min(64));
            for _ in 0..count {
                request_changed_slots.push(ChangedSlots::read(r)?);
            }
        }

        let transaction_type = r.get_var_u32()?;

        let has_item_stack_ids = if r.protocol() < ProtocolVersion::V1_16_220 {
            r.get_bool()?
        } else {
            true
        };

        let tr_data = TransactionData::decode(r, transaction_type, has_item_stack_ids)?;

        Ok(Self {
            request_id,
            request_changed_slots,
            tr_data,
            has_item_stack_ids,
        })
    }

    fn encode_payload(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        w.put_generic_type_network_id(self.request_id);
        if self.request_id != 0 {
            let count = u32::try_from(self.request_changed_slots.len()).map_err(|_| {
                EncodeError::OutOfRange(format!(
                    "{} changed-slot entries",
                    self.request_changed_slots.len()
                ))
            })?;
            w.put_var_u32(count);
            for entry in &self.request_changed_slots {
                entry.write(w)?;
            }
        }

        w.put_var_u32(self.tr_data.type_id());

        if w.protocol() < ProtocolVersion::V1_16_220 {
            w.put_bool(self.has_item_stack_ids);
        }

        self.tr_data.encode(w, self.has_item_stack_ids)
    }

    fn handle(&self, handler: &mut dyn PacketHandler) -> bool {
        handler.handle_inventory_transaction(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dictionary::{ItemTypeDictionary, ItemTypeEntry};
    use crate::types::block_position::BlockPosition;
    use crate::types::inventory::action::InventorySource;
    use crate::types::inventory::{NetworkInventoryAction, UseItemTransactionData};
    use crate::types::item_stack::{ItemStack, ItemStackWrapper};
    use crate::types::vector3f::Vector3f;

    fn dictionary() -> ItemTypeDictionary {
        ItemTypeDictionary::new(vec![
            ItemTypeEntry {
                string_id: "minecraft:apple".to_string(),
                numeric_id: 257,
            },
            ItemTypeEntry {
                string_id: "minecraft:shield".to_string(),
                numeric_id: 355,
            },
        ])
        .unwrap()
    }

    fn item(stack_id: i32) -> ItemStackWrapper {
        ItemStackWrapper::Modern {
            stack_id,
            stack: ItemStack {
                network_id: 257,
                count: 4,
                ..ItemStack::default()
            },
        }
    }

    fn legacy_item() -> ItemStackWrapper {
        ItemStackWrapper::Legacy {
            stack: ItemStack {
                network_id: 257,
                count: 4,
                ..ItemStack::default()
            },
        }
    }

    fn use_item(item_in_hand: ItemStackWrapper) -> TransactionData {
        TransactionData::UseItem(UseItemTransactionData {
            actions: vec![NetworkInventoryAction {
                source: InventorySource::Container { window_id: 0 },
                inventory_slot: 2,
                old_item: item_in_hand.clone(),
                new_item: item_in_hand.clone(),
            }],
            action_type: 0,
            block_position: BlockPosition::new(-1, 64, 1),
            face: 4,
            hotbar_slot: 2,
            item_in_hand,
            player_position: Vector3f::new(-0.5, 65.6, 1.5),
            click_position: Vector3f::new(0.5, 0.5, 0.0),
            block_runtime_id: 134,
        })
    }

    fn roundtrip(
        packet: &InventoryTransactionPacket,
        version: ProtocolVersion,
    ) -> InventoryTransactionPacket {
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(version, &dict);
        packet.encode_payload(&mut w).unwrap();
        let payload = w.into_payload();

        let mut r = PacketSerializer::decoder(&payload, version, &dict);
        let decoded = InventoryTransactionPacket::decode_payload(&mut r).unwrap();
        assert!(r.is_empty(), "decode left {} bytes", r.remaining());
        decoded
    }

    #[test]
    fn roundtrip_at_current() {
        let packet = InventoryTransactionPacket {
            request_id: 0,
            request_changed_slots: vec![],
            tr_data: use_item(item(0)),
            has_item_stack_ids: true,
        };
        assert_eq!(roundtrip(&packet, ProtocolVersion::CURRENT), packet);
    }

    #[test]
    fn changed_slots_only_with_a_request_id() {
        let with_request = InventoryTransactionPacket {
            request_id: -3,
            request_changed_slots: vec![ChangedSlots {
                container_id: 7,
                changed_slot_indexes: vec![1, 2],
            }],
            tr_data: TransactionData::Mismatch,
            has_item_stack_ids: true,
        };
        assert_eq!(roundtrip(&with_request, ProtocolVersion::CURRENT), with_request);

        let without_request = InventoryTransactionPacket {
            request_id: 0,
            request_changed_slots: vec![],
            tr_data: TransactionData::Mismatch,
            has_item_stack_ids: true,
        };
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::CURRENT, &dict);
        without_request.encode_payload(&mut w).unwrap();
        // request id 0, tag, empty action list
        assert_eq!(&w.into_payload()[..], &[0, 1, 0]);
    }

    #[test]
    fn legacy_stream_reads_the_stack_id_flag() {
        let flagged = InventoryTransactionPacket {
            request_id: 0,
            request_changed_slots: vec![],
            tr_data: use_item(item(12)),
            has_item_stack_ids: true,
        };
        assert_eq!(roundtrip(&flagged, ProtocolVersion::V1_16_0), flagged);

        let unflagged = InventoryTransactionPacket {
            request_id: 0,
            request_changed_slots: vec![],
            tr_data: use_item(legacy_item()),
            has_item_stack_ids: false,
        };
        assert_eq!(roundtrip(&unflagged, ProtocolVersion::V1_16_0), unflagged);
    }

    #[test]
    fn roundtrip_across_every_milestone() {
        // modern wrappers are legal everywhere once the stream carries
        // stack ids, so one packet shape covers the whole version table
        for (version, name) in ProtocolVersion::MILESTONES {
            let packet = InventoryTransactionPacket {
                request_id: 2,
                request_changed_slots: vec![ChangedSlots {
                    container_id: 0,
                    changed_slot_indexes: vec![4],
                }],
                tr_data: use_item(item(5)),
                has_item_stack_ids: true,
            };
            assert_eq!(roundtrip(&packet, version), packet, "at {name}");
        }
    }

    #[test]
    fn stack_id_flag_threads_into_nested_items() {
        // with the flag set, every nested item write demands a stack id
        let broken = InventoryTransactionPacket {
            request_id: 0,
            request_changed_slots: vec![],
            tr_data: use_item(legacy_item()),
            has_item_stack_ids: true,
        };
        let dict = dictionary();
        let mut w = PacketSerializer::encoder(ProtocolVersion::V1_16_0, &dict);
        assert!(matches!(
            broken.encode_payload(&mut w),
            Err(EncodeError::OutOfRange(_))
        ));
    }
}
