pub mod bytebuf;
pub mod dictionary;
pub mod nbt;
pub mod packet;
pub mod serializer;
pub mod types;
pub mod version;

pub use bytebuf::{ByteCursor, DecodeError, EncodeError};
pub use dictionary::{DictionaryError, ItemTypeDictionary, ItemTypeEntry};
pub use packet::{DataPacket, GamePacket, PacketHandler, PacketHeader};
pub use serializer::PacketSerializer;
pub use version::ProtocolVersion;
