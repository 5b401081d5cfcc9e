use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{Align4, Deserialize, LEN_TYPE_SIZE, LenType};

/// The receiving end handle of the communication.
pub struct MrfReceiver<R: AsyncRead + Unpin> {
    rx: R,
}

impl<R: AsyncRead + Unpin> MrfReceiver<R> {
    /// Creates a new `MrfReceiver` instance.
    ///
    /// # Arguments
    /// * `rx` - The underlying reader.
    pub(super) fn new(rx: R) -> Self {
        Self { rx }
    }

    /// Waits to receive a new message from the inner receiver.
    ///
    /// # Arguments
    /// * `buf` - The buffer to use for deserialization, the returned `T`'s
    ///           lifetime is tied to this buffer. A 4-byte-aligned element
    ///           type keeps bulk cell payloads castable in place.
    ///
    /// # Returns
    /// A result object that returns `T` on success or `io::Error` on failure.
    pub async fn recv_into<'buf, T, B>(&mut self, buf: &'buf mut Vec<B>) -> io::Result<T>
    where
        T: Deserialize<'buf>,
        B: Align4,
    {
        let mut size_buf = [0; LEN_TYPE_SIZE];
        self.rx.read_exact(&mut size_buf).await?;
        let len = LenType::from_be_bytes(size_buf) as usize;

        let needed = len.div_ceil(size_of::<B>());
        if buf.capacity() < needed {
            buf.reserve(needed - buf.len());
        }

        // SAFETY: The buffer has capacity for at least `needed` items. These
        //         are immediately overwritten by the read_exact call below.
        unsafe { buf.set_len(needed) };

        let view: &mut [u8] = bytemuck::cast_slice_mut(buf.as_mut_slice());
        let frame = &mut view[..len];
        self.rx.read_exact(frame).await?;

        T::deserialize(frame)
    }
}
