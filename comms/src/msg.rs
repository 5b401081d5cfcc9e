use std::{borrow::Cow, io};

use crate::{Deserialize, Serialize, specs::worker::WorkerSpec};

type Header = u32;
const HEADER_SIZE: usize = size_of::<Header>();

/// The payload data for the `Data` variant of the `Msg` enum.
///
/// Cell buffers travel as raw `u32` bytes; the owning rank travels in a
/// fixed header word so the receiver can key placement by rank rather than
/// by arrival order.
#[derive(Debug, PartialEq, Eq)]
pub enum Payload<'a> {
    /// A rank's primary slice: `width * rows_per_worker` iteration counts.
    Slice { worker_id: u32, cells: &'a [u32] },
    /// The leftover tail rows, sent by the last rank after its slice.
    Remainder { worker_id: u32, cells: &'a [u32] },
}

/// The command for the `Control` variant of the `Msg` enum.
#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    CreateWorker(WorkerSpec),
    Disconnect,
}

/// The application layer message for the entire system.
#[derive(Debug, PartialEq)]
pub enum Msg<'a> {
    Control(Command),
    Data(Payload<'a>),
    Err(Cow<'a, str>),
}

impl Msg<'_> {
    fn buf_is_too_small<T>(size: usize) -> io::Result<T> {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("The given buffer is too small {size}, must at least be {HEADER_SIZE} bytes"),
        ))
    }

    fn invalid_kind_byte<T>(byte: Header) -> io::Result<T> {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Received an invalid kind byte {byte}"),
        ))
    }
}

impl<'a> Serialize<'a> for Msg<'a> {
    fn serialize(&'a self, buf: &mut Vec<u8>) -> Option<&'a [u8]> {
        match self {
            Msg::Err(e) => {
                let header = (0 as Header).to_be_bytes();
                buf.extend_from_slice(&header);
                Some(e.as_bytes())
            }
            Msg::Control(cmd) => {
                let header = (1 as Header).to_be_bytes();
                buf.extend_from_slice(&header);

                // SAFETY: Serialize impl for `Command` is derived and not
                //         implemented by hand. Nor has a non string-key map
                //         inside.
                serde_json::to_writer(buf, &cmd).unwrap();
                None
            }
            Msg::Data(payload) => {
                let (kind, worker_id, cells) = match payload {
                    Payload::Slice { worker_id, cells } => (2, *worker_id, *cells),
                    Payload::Remainder { worker_id, cells } => (3, *worker_id, *cells),
                };

                let header = (kind as Header).to_be_bytes();
                buf.extend_from_slice(&header);
                buf.extend_from_slice(&worker_id.to_be_bytes());
                Some(bytemuck::cast_slice(cells))
            }
        }
    }
}

impl<'a> Deserialize<'a> for Msg<'a> {
    fn deserialize(buf: &'a [u8]) -> io::Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Self::buf_is_too_small(buf.len());
        }

        let (kind_buf, rest) = buf.split_at(HEADER_SIZE);

        // Cannot fail, the split above is exactly `HEADER_SIZE` bytes.
        let kind = Header::from_be_bytes(kind_buf.try_into().unwrap());

        match kind {
            0 => {
                let string = std::str::from_utf8(rest)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

                Ok(Self::Err(Cow::Borrowed(string)))
            }
            1 => {
                let cmd = serde_json::from_slice(rest)?;
                Ok(Self::Control(cmd))
            }
            2..4 => {
                if rest.len() < HEADER_SIZE {
                    return Self::buf_is_too_small(buf.len());
                }
                let (id_buf, cell_buf) = rest.split_at(HEADER_SIZE);
                let worker_id = u32::from_be_bytes(id_buf.try_into().unwrap());

                let cells = bytemuck::try_cast_slice(cell_buf).map_err(|err| {
                    io::Error::new(io::ErrorKind::InvalidData, format!("bad cell payload: {err}"))
                })?;

                let payload = match kind {
                    2 => Payload::Slice { worker_id, cells },
                    3 => Payload::Remainder { worker_id, cells },
                    _ => unreachable!(),
                };

                Ok(Self::Data(payload))
            }
            byte => Self::invalid_kind_byte(byte),
        }
    }
}
