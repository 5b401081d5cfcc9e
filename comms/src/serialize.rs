/// Zero-copy serialization into an outgoing frame.
///
/// Implementors append their header bytes to `buf` and may hand back a
/// borrowed byte view that the sender writes after it, so bulk payloads are
/// never copied into the frame buffer.
pub trait Serialize<'a> {
    fn serialize(&'a self, buf: &mut Vec<u8>) -> Option<&'a [u8]>;
}
