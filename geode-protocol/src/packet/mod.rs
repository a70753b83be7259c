use crate::bytebuf::{DecodeError, EncodeError};
use crate::serializer::PacketSerializer;

mod add_player;
mod add_volume_entity;
mod inventory_transaction;

pub use add_player::AddPlayerPacket;
pub use add_volume_entity::AddVolumeEntityPacket;
pub use inventory_transaction::InventoryTransactionPacket;

/// One wire message. The network id is stable per packet kind and does not
/// change across protocol versions; only the payload layout does.
pub trait DataPacket: Sized {
    const NETWORK_ID: u32;

    fn decode_payload(r: &mut PacketSerializer) -> Result<Self, DecodeError>;
    fn encode_payload(&self, w: &mut PacketSerializer) -> Result<(), EncodeError>;

    /// Calls the one handler method matching this packet kind. The return
    /// value means "recognized and accepted".
    fn handle(&self, handler: &mut dyn PacketHandler) -> bool;
}

/// Receiver capability supplied by the consumer. Unhandled kinds fall
/// through to `false`.
pub trait PacketHandler {
    fn handle_add_player(&mut self, _packet: &AddPlayerPacket) -> bool {
        false
    }

    fn handle_add_volume_entity(&mut self, _packet: &AddVolumeEntityPacket) -> bool {
        false
    }

    fn handle_inventory_transaction(&mut self, _packet: &InventoryTransactionPacket) -> bool {
        false
    }
}

/// First varint of every payload: the packet id in the low ten bits plus
/// two-bit sub-client ids used for split-screen routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub packet_id: u32,
    pub sender_sub_id: u8,
    pub recipient_sub_id: u8,
}

impl PacketHeader {
    pub const PID_MASK: u32 = 0x3FF;
    const SENDER_SHIFT: u32 = 10;
    const RECIPIENT_SHIFT: u32 = 12;
    const SUB_ID_MASK: u32 = 0x3;

    pub fn new(packet_id: u32) -> Self {
        Self {
            packet_id,
            sender_sub_id: 0,
            recipient_sub_id: 0,
        }
    }

    pub fn decode(r: &mut PacketSerializer) -> Result<Self, DecodeError> {
        let word = r.get_var_u32()?;
        Ok(Self {
            packet_id: word & Self::PID_MASK,
            sender_sub_id: ((word >> Self::SENDER_SHIFT) & Self::SUB_ID_MASK) as u8,
            recipient_sub_id: ((word >> Self::RECIPIENT_SHIFT) & Self::SUB_ID_MASK) as u8,
        })
    }

    pub fn encode(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        if self.packet_id > Self::PID_MASK {
            return Err(EncodeError::OutOfRange(format!(
                "packet id {}",
                self.packet_id
            )));
        }
        if u32::from(self.sender_sub_id) > Self::SUB_ID_MASK
            || u32::from(self.recipient_sub_id) > Self::SUB_ID_MASK
        {
            return Err(EncodeError::OutOfRange(format!(
                "sub-client ids {}/{}",
                self.sender_sub_id, self.recipient_sub_id
            )));
        }
        w.put_var_u32(
            self.packet_id
                | (u32::from(self.sender_sub_id) << Self::SENDER_SHIFT)
                | (u32::from(self.recipient_sub_id) << Self::RECIPIENT_SHIFT),
        );
        Ok(())
    }
}

/// The closed set of packets this codec understands, dispatched by network
/// id. Transport framing around the payload is not handled here.
#[derive(Debug, Clone, PartialEq)]
pub enum GamePacket {
    AddPlayer(AddPlayerPacket),
    AddVolumeEntity(AddVolumeEntityPacket),
    InventoryTransaction(InventoryTransactionPacket),
}

impl GamePacket {
    pub fn network_id(&self) -> u32 {
        match self {
            Self::AddPlayer(_) => AddPlayerPacket::NETWORK_ID,
            Self::AddVolumeEntity(_) => AddVolumeEntityPacket::NETWORK_ID,
            Self::InventoryTransaction(_) => InventoryTransactionPacket::NETWORK_ID,
        }
    }

    pub fn decode(r: &mut PacketSerializer) -> Result<(PacketHeader, Self), DecodeError> {
        let header = PacketHeader::decode(r)?;
        let packet = match header.packet_id {
            AddPlayerPacket::NETWORK_ID => Self::AddPlayer(AddPlayerPacket::decode_payload(r)?),
            AddVolumeEntityPacket::NETWORK_ID => {
                Self::AddVolumeEntity(AddVolumeEntityPacket::decode_payload(r)?)
            }
            InventoryTransactionPacket::NETWORK_ID => {
                Self::InventoryTransaction(InventoryTransactionPacket::decode_payload(r)?)
            }
            id => {
                log::debug!("rejecting packet with unknown network id {id}");
                return Err(DecodeError::UnknownVariantTag {
                    kind: "packet network id",
                    tag: id,
                });
            }
        };
        Ok((header, packet))
    }

    pub fn encode(&self, w: &mut PacketSerializer) -> Result<(), EncodeError> {
        self.encode_with_header(PacketHeader::new(self.network_id()), w)
    }

    pub fn encode_with_header(
        &self,
        header: PacketHeader,
        w: &mut PacketSerializer,
    ) -> Result<(), EncodeError> {
        if header.packet_id != self.network_id() {
            return Err(EncodeError::OutOfRange(format!(
                "header id {} does not match packet id {}",
                header.packet_id,
                self.network_id()
            )));
        }
        header.encode(w)?;
        match self {
            Self::AddPlayer(packet) => packet.encode_payload(w),
            Self::AddVolumeEntity(packet) => packet.encode_payload(w),
            Self::InventoryTransaction(packet) => packet.encode_payload(w),
        }
    }

    pub fn handle(&self, handler: &mut dyn PacketHandler) -> bool {
        match self {
            Self::AddPlayer(packet) => packet.handle(handler),
            Self::AddVolumeEntity(packet) => packet.handle(handler),
            Self::InventoryTransaction(packet) => packet.handle(handler),
        }
    }
}
