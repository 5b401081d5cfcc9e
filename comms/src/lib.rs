mod align;
mod deserialize;
pub mod msg;
mod receiver;
mod sender;
mod serialize;
pub mod specs;

use tokio::io::{AsyncRead, AsyncWrite};

pub use align::{Align1, Align4};
pub use deserialize::Deserialize;
pub use receiver::MrfReceiver;
pub use sender::MrfSender;
pub use serialize::Serialize;

type LenType = u32;
const LEN_TYPE_SIZE: usize = size_of::<LenType>();

/// Creates both `MrfReceiver` and `MrfSender` channel parts.
///
/// Given a reader and writer, creates and returns both ends of the
/// communication.
///
/// # Arguments
/// * `rx` - An async readable.
/// * `tx` - An async writable.
///
/// # Returns
/// A communication stream in the form of an mrf receiver and sender.
pub fn channel<R, W>(rx: R, tx: W) -> (MrfReceiver<R>, MrfSender<W>)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    (MrfReceiver::new(rx), MrfSender::new(tx))
}
