use core::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
};

use crate::{Allocator, GrowableBuffer};

/// Most bytes reserved up front from a sequence's length hint. Longer input
/// still grows normally, one element at a time.
const MAX_PREALLOCATION: usize = 4096;

impl<A> Serialize for GrowableBuffer<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_bytes())
    }
}

impl<'de, A: Allocator + Default> Deserialize<'de> for GrowableBuffer<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(BufferVisitor(PhantomData))
    }
}

struct BufferVisitor<A>(PhantomData<A>);

impl<'de, A: Allocator + Default> Visitor<'de> for BufferVisitor<A> {
    type Value = GrowableBuffer<A>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte string")
    }

    fn visit_bytes<E: de::Error>(self, bytes: &[u8]) -> Result<Self::Value, E> {
        let mut buf = GrowableBuffer::default();
        buf.extend_from_slice(bytes).map_err(E::custom)?;
        Ok(buf)
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        self.visit_bytes(s.as_bytes())
    }

    fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
        let mut buf = GrowableBuffer::default();
        if let Some(hint) = seq.size_hint() {
            buf.reserve(hint.min(MAX_PREALLOCATION))
                .map_err(de::Error::custom)?;
        }
        while let Some(byte) = seq.next_element::<u8>()? {
            buf.push_byte(byte).map_err(de::Error::custom)?;
        }
        Ok(buf)
    }
}
