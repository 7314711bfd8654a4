use tinyvec::ArrayVec;

use super::content_format::ContentFormat;
use super::registry::{OptDef, ValueFormat};
use super::{OptNumber, ACCEPT, CONTENT_FORMAT};

/// Encode `v` in the minimal big-endian form used by uint option
/// values and option header extensions: zero is zero bytes, and
/// there are never leading zero bytes.
///
/// ```
/// use natter_msg::encode_uint;
///
/// assert_eq!(encode_uint(0).as_slice(), &[]);
/// assert_eq!(encode_uint(0x0ab0).as_slice(), &[0x0a, 0xb0]);
/// ```
pub fn encode_uint(v: u32) -> ArrayVec<[u8; 4]> {
  let bytes = v.to_be_bytes();
  let skip = bytes.iter().take_while(|b| **b == 0).count();
  bytes[skip..].iter().copied().collect()
}

/// Decode a big-endian uint option value, zero-extending on the left.
///
/// Callers never pass more than 4 bytes; the registry length bounds
/// cap every uint option at 4.
pub fn decode_uint(bytes: &[u8]) -> u32 {
  bytes.iter().fold(0u32, |acc, b| acc << 8 | u32::from(*b))
}

/// A typed option value.
///
/// The variant is selected by the registry's [`ValueFormat`] when
/// decoding; when encoding, the variant alone determines the wire
/// bytes and must agree with the registered format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptValue {
  /// A zero-length value (e.g. If-None-Match)
  Empty,
  /// Raw bytes (e.g. ETag)
  Opaque(Vec<u8>),
  /// 0-4 byte big-endian unsigned integer (e.g. Max-Age)
  Uint(u32),
  /// UTF-8 text (e.g. Uri-Path)
  String(String),
  /// A media type (Content-Format and Accept)
  ContentFormat(ContentFormat),
}

impl OptValue {
  /// The bytes this value puts on the wire.
  pub(crate) fn wire_bytes(&self) -> Vec<u8> {
    match self {
      | OptValue::Empty => Vec::new(),
      | OptValue::Opaque(bytes) => bytes.clone(),
      | OptValue::Uint(n) => encode_uint(*n).to_vec(),
      | OptValue::ContentFormat(f) => encode_uint(u32::from(u16::from(*f))).to_vec(),
      | OptValue::String(s) => s.clone().into_bytes(),
    }
  }

  /// Whether this variant may be serialized under `format`.
  pub(crate) fn compatible(&self, format: ValueFormat) -> bool {
    matches!((self, format),
             (OptValue::Empty, ValueFormat::Empty)
             | (OptValue::Opaque(_), ValueFormat::Opaque)
             | (OptValue::Uint(_), ValueFormat::Uint)
             | (OptValue::ContentFormat(_), ValueFormat::Uint)
             | (OptValue::String(_), ValueFormat::String))
  }

  /// Interpret decoded value bytes under the registry entry for `number`.
  ///
  /// Text is converted lossily; the wire format carries no UTF-8
  /// guarantee and the codec does not reject non-text bytes here.
  pub(crate) fn parse(number: OptNumber, def: OptDef, bytes: &[u8]) -> OptValue {
    match def.format {
      | ValueFormat::Empty => OptValue::Empty,
      | ValueFormat::Opaque => OptValue::Opaque(bytes.to_vec()),
      | ValueFormat::Uint if number == CONTENT_FORMAT || number == ACCEPT => {
        OptValue::ContentFormat(ContentFormat::from(decode_uint(bytes) as u16))
      },
      | ValueFormat::Uint => OptValue::Uint(decode_uint(bytes)),
      | ValueFormat::String => OptValue::String(String::from_utf8_lossy(bytes).into_owned()),
    }
  }
}

impl From<&str> for OptValue {
  fn from(s: &str) -> OptValue {
    OptValue::String(s.into())
  }
}

impl From<String> for OptValue {
  fn from(s: String) -> OptValue {
    OptValue::String(s)
  }
}

impl From<u32> for OptValue {
  fn from(n: u32) -> OptValue {
    OptValue::Uint(n)
  }
}

impl From<u16> for OptValue {
  fn from(n: u16) -> OptValue {
    OptValue::Uint(n.into())
  }
}

impl From<Vec<u8>> for OptValue {
  fn from(bytes: Vec<u8>) -> OptValue {
    OptValue::Opaque(bytes)
  }
}

impl From<&[u8]> for OptValue {
  fn from(bytes: &[u8]) -> OptValue {
    OptValue::Opaque(bytes.to_vec())
  }
}

impl From<ContentFormat> for OptValue {
  fn from(f: ContentFormat) -> OptValue {
    OptValue::ContentFormat(f)
  }
}
