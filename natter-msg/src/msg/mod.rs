use crate::cursor::Cursor;
use crate::from_bytes::TryFromBytes;

/// Message Code
pub mod code;
/// Message ID
pub mod id;
/// Message Options
pub mod opt;
/// Message parsing errors
pub mod parse_error;
/// Message Token
pub mod token;
/// Message Type
pub mod ty;
/// Message Version
pub mod ver;

pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

/// The bytes following the `0xFF` payload marker; empty when the
/// marker is absent.
///
/// See [RFC7252 §5.5](https://datatracker.ietf.org/doc/html/rfc7252#section-5.5)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payload(pub Vec<u8>);

/// The first byte of a message.
///
/// ```text
/// CoAP version
/// |
/// |  Message type
/// |  |
/// |  |  Length of token, in bytes (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl TryFrom<u8> for Byte1 {
  type Error = MessageParseError;

  fn try_from(b: u8) -> Result<Byte1, Self::Error> {
    let ver = b >> 6;
    if ver != 1 {
      return Err(MessageParseError::InvalidVersion(ver));
    }

    Ok(Byte1 { ver: Version(ver), ty: Type::from_wire(b >> 4), tkl: b & 0b1111 })
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    b.ver.0 << 6 | u8::from(b.ty) << 4 | b.tkl
  }
}

/// A CoAP message, one datagram's worth of protocol.
///
/// ```text
///  0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |Ver| T |  TKL  |      Code     |          Message ID           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   Token (if any, TKL bytes) ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   Options (if any) ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |1 1 1 1 1 1 1 1|    Payload (if any) ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Messages are plain values: the application builds outbound ones,
/// the parser builds inbound ones, and nothing is shared.
///
/// ```
/// use natter_msg::{code, ContentFormat, Id, Message, TryIntoBytes, Type, CONTENT_FORMAT};
///
/// let mut msg = Message::new(Type::Con, code::GET, Id(0x1234));
/// msg.set_path_string("/.well-known/core");
/// msg.opts.set(CONTENT_FORMAT, ContentFormat::LinkFormat);
///
/// let bytes = msg.try_into_bytes().unwrap();
/// assert_eq!(&bytes[..4], &[0x40, 0x01, 0x12, 0x34]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
  /// see [`Id`] for details
  pub id: Id,
  /// see [`Type`] for details
  pub ty: Type,
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Token`] for details
  pub token: Token,
  /// see [`Code`] for details
  pub code: Code,
  /// see [`Opts`] for details
  pub opts: Opts,
  /// see [`Payload`] for details
  pub payload: Payload,
}

impl Message {
  /// A message with the given type, code and id; empty token, no
  /// options, no payload.
  pub fn new(ty: Type, code: Code, id: Id) -> Message {
    Message { id,
              ty,
              ver: Version::default(),
              token: Token::default(),
              code,
              opts: Opts::default(),
              payload: Payload::default() }
  }

  /// Whether this message is of type [`Type::Con`].
  pub fn is_confirmable(&self) -> bool {
    self.ty == Type::Con
  }

  /// The first value of option `number`, `None` when absent.
  pub fn option(&self, number: OptNumber) -> Option<&OptValue> {
    self.opts.first(number)
  }

  /// Every value of option `number`, in insertion order.
  pub fn options(&self, number: OptNumber) -> impl Iterator<Item = &OptValue> {
    self.opts.all(number)
  }

  /// The Uri-Path segments set on this message, if any.
  pub fn path(&self) -> Vec<&str> {
    self.opts
        .all(URI_PATH)
        .filter_map(|v| match v {
                      | OptValue::String(s) => Some(s.as_str()),
                      | _ => None,
                    })
        .collect()
  }

  /// The Uri-Path as a `/`-separated string.
  pub fn path_string(&self) -> String {
    self.path().join("/")
  }

  /// Replace the Uri-Path with the given segments.
  pub fn set_path<S>(&mut self, segments: impl IntoIterator<Item = S>)
    where S: Into<String>
  {
    self.opts.remove(URI_PATH);
    self.opts
        .add_many(URI_PATH, segments.into_iter().map(Into::into));
  }

  /// Replace the Uri-Path with the segments of a `/`-separated
  /// string; leading slashes and empty segments are dropped.
  pub fn set_path_string(&mut self, path: &str) {
    self.set_path(path.split('/').filter(|s| !s.is_empty()));
  }
}

impl<Bytes: AsRef<[u8]>> TryFromBytes<Bytes> for Message {
  type Error = MessageParseError;

  fn try_from_bytes(bytes: Bytes) -> Result<Message, Self::Error> {
    let mut bytes = Cursor::new(bytes);

    let (byte1, code, id) = match bytes.take_exact(4) {
      | Some(&[b1, code, id_hi, id_lo]) => {
        (b1, Code::from(code), Id::from_be_bytes([id_hi, id_lo]))
      },
      | _ => return Err(MessageParseError::ShortPacket),
    };

    let Byte1 { ver, ty, tkl } = Byte1::try_from(byte1)?;
    if tkl > 8 {
      return Err(MessageParseError::InvalidTokenLength(tkl));
    }

    let token = bytes.take_exact(usize::from(tkl))
                     .and_then(Token::from_slice)
                     .ok_or(MessageParseError::Truncated)?;

    let opts = opt::parse_opts(&mut bytes)?;
    let payload = Payload(bytes.take_until_end().to_vec());

    Ok(Message { id, ty, ver, token, code, opts, payload })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_byte1() {
    let byte = Byte1::try_from(0b_01_10_0011u8).unwrap();
    assert_eq!(byte, Byte1 { ver: Version(1), ty: Type::Ack, tkl: 3 });
  }

  #[test]
  fn byte1_round_trip() {
    let byte = Byte1 { ver: Version(1), ty: Type::Non, tkl: 8 };
    assert_eq!(Byte1::try_from(u8::from(byte)).unwrap(), byte);
  }

  #[test]
  fn parse_msg() {
    let bytes = [0x61, 0x45, 0x00, 0x01, 0xab, 0xc1, 0x32, 0xff, b'{', b'}'];
    let msg = Message::try_from_bytes(bytes).unwrap();

    let mut expect = Message::new(Type::Ack, code::CONTENT, Id(1));
    expect.token = Token::from_slice(&[0xab]).unwrap();
    expect.opts
          .add(CONTENT_FORMAT, ContentFormat::Json);
    expect.payload = Payload(b"{}".to_vec());

    assert_eq!(msg, expect);
  }

  #[test]
  fn short_packet() {
    assert_eq!(Message::try_from_bytes([0x40u8, 0x01, 0x12]),
               Err(MessageParseError::ShortPacket));
    assert_eq!(Message::try_from_bytes([0u8; 0]), Err(MessageParseError::ShortPacket));
  }

  #[test]
  fn invalid_version() {
    assert_eq!(Message::try_from_bytes([0x00u8, 0x01, 0x12, 0x34]),
               Err(MessageParseError::InvalidVersion(0)));
    assert_eq!(Message::try_from_bytes([0xc0u8, 0x01, 0x12, 0x34]),
               Err(MessageParseError::InvalidVersion(3)));
  }

  #[test]
  fn invalid_token_length() {
    assert_eq!(Message::try_from_bytes([0x49u8, 0x01, 0x12, 0x34]),
               Err(MessageParseError::InvalidTokenLength(9)));
    assert_eq!(Message::try_from_bytes([0x4fu8, 0x01, 0x12, 0x34]),
               Err(MessageParseError::InvalidTokenLength(15)));
  }

  #[test]
  fn truncated_token() {
    assert_eq!(Message::try_from_bytes([0x42u8, 0x01, 0x12, 0x34, 0xab]),
               Err(MessageParseError::Truncated));
  }

  #[test]
  fn bare_payload_marker_is_empty_payload() {
    let msg = Message::try_from_bytes([0x40u8, 0x01, 0x12, 0x34, 0xff]).unwrap();
    assert_eq!(msg.payload, Payload(Vec::new()));
  }

  #[test]
  fn no_marker_no_payload() {
    let msg = Message::try_from_bytes([0x40u8, 0x01, 0x12, 0x34]).unwrap();
    assert_eq!(msg.payload, Payload(Vec::new()));
    assert!(msg.opts.is_empty());
  }

  #[test]
  fn path_helpers() {
    let mut msg = Message::new(Type::Con, code::GET, Id(7));
    msg.set_path_string("//sensors/temp/");
    assert_eq!(msg.path(), vec!["sensors", "temp"]);
    assert_eq!(msg.path_string(), "sensors/temp");

    msg.set_path(["a", "b", "c"]);
    assert_eq!(msg.path_string(), "a/b/c");
  }
}
