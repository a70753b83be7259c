//! Delegation to the NBT collaborator. Tag trees stay opaque here; this
//! module only moves them between the cursor and the codec.

use fastnbt::Value;

use crate::bytebuf::{ByteCursor, DecodeError, EncodeError};

/// Reads one length-implicit compound tree from the cursor. The collaborator
/// consumes exactly the bytes of the tree; its errors propagate unchanged.
pub fn get_compound_root(cursor: &mut ByteCursor) -> Result<Value, DecodeError> {
    let value: Value = fastnbt::from_reader(cursor.reader())?;
    Ok(value)
}

pub fn put_compound_root(cursor: &mut ByteCursor, value: &Value) -> Result<(), EncodeError> {
    let bytes = fastnbt::to_bytes(value)?;
    cursor.put_slice(&bytes);
    Ok(())
}

#[cfg(test)]
mod test {
    use fastnbt::{nbt, Value};

    use super::*;
    use crate::bytebuf::ByteCursor;

    #[test]
    fn compound_root_roundtrip() {
        let tree: Value = nbt!({"engine": "1.17.30", "priority": 3});

        let mut buf = ByteCursor::new();
        put_compound_root(&mut buf, &tree).unwrap();
        // trailing data must survive the tree read untouched
        buf.put_u8(0x7F);

        let decoded = get_compound_root(&mut buf).unwrap();
        assert_eq!(decoded, tree);
        assert_eq!(buf.get_u8().unwrap(), 0x7F);
        assert!(buf.is_empty());
    }
}
