use std::io;

/// Zero-copy deserialization out of a received frame; the result may borrow
/// from `buf`.
pub trait Deserialize<'a>: Sized {
    fn deserialize(buf: &'a [u8]) -> io::Result<Self>;
}
