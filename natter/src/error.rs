use natter_msg::{MessageParseError, MessageToBytesError};

/// An error encounterable while exchanging messages.
#[derive(Debug)]
pub enum Error {
  /// Some socket operation failed
  Io(std::io::Error),
  /// An inbound datagram failed to parse
  FromBytes(MessageParseError),
  /// An outbound message failed to serialize
  ToBytes(MessageToBytesError),
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Error {
    Error::Io(e)
  }
}

impl From<MessageParseError> for Error {
  fn from(e: MessageParseError) -> Error {
    Error::FromBytes(e)
  }
}

impl From<MessageToBytesError> for Error {
  fn from(e: MessageToBytesError) -> Error {
    Error::ToBytes(e)
  }
}
