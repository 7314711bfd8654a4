use tinyvec::ArrayVec;

use crate::msg::{Byte1, Message, OptDef, OptNumber};

/// Trait allowing fallible serialization into a wire byte buffer
pub trait TryIntoBytes {
  /// Error type yielded if serialization fails
  type Error;

  /// Try to serialize into bytes
  ///
  /// ```
  /// use natter_msg::{code, Id, Message, TryIntoBytes, Type};
  ///
  /// let msg = Message::new(Type::Non, code::POST, Id(9));
  /// let bytes: Vec<u8> = msg.try_into_bytes().unwrap();
  /// ```
  fn try_into_bytes(self) -> Result<Vec<u8>, Self::Error>;
}

/// Errors encounterable serializing a message to bytes.
///
/// A well-formed in-memory message never hits these; both variants
/// are out-of-range conditions of the 2-byte option header extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageToBytesError {
  /// An option value was longer than 65804 bytes, the most the
  /// length extension can express
  OptionTooLong(usize),

  /// The gap between consecutive option numbers was larger than
  /// 65804, the most the delta extension can express
  OptionGapTooLarge(u32),
}

/// Split a delta or length into its 4-bit nibble and extension
/// bytes: values below 13 are literal, up to 268 use nibble 13 plus
/// one byte, up to 65804 use nibble 14 plus a big-endian word.
/// `None` past 65804; nibble 15 is never produced.
pub(crate) fn ext_nibble(val: u32) -> Option<(u8, ArrayVec<[u8; 2]>)> {
  match val {
    | n if n > 65804 => None,
    | n if n >= 269 => {
      let mut ext = ArrayVec::new();
      ext.extend_from_slice(&((n - 269) as u16).to_be_bytes());
      Some((14, ext))
    },
    | n if n >= 13 => {
      let mut ext = ArrayVec::new();
      ext.push((n - 13) as u8);
      Some((13, ext))
    },
    | n => Some((n as u8, ArrayVec::new())),
  }
}

impl TryIntoBytes for Message {
  type Error = MessageToBytesError;

  fn try_into_bytes(mut self) -> Result<Vec<u8>, Self::Error> {
    let mut bytes = Vec::with_capacity(4 + self.token.len() + self.payload.0.len() + 16);

    let byte1 = Byte1 { ver: self.ver, ty: self.ty, tkl: self.token.len() as u8 };
    bytes.push(byte1.into());
    bytes.push(self.code.into());
    bytes.extend(<[u8; 2]>::from(self.id));
    bytes.extend(self.token.0);

    self.opts.sort_stable();

    let mut prev = OptNumber(0);
    for opt in self.opts.iter() {
      if let Some(def) = OptDef::of(opt.number) {
        // a value that disagrees with the registered format is a bug
        // in the caller, not a wire condition
        assert!(opt.value.compatible(def.format),
                "option {:?}: value {:?} incompatible with registered format {:?}",
                opt.number,
                opt.value,
                def.format);
      }

      let value = opt.value.wire_bytes();
      let delta = opt.number.0 - prev.0;

      let (delta_nibble, delta_ext) =
        ext_nibble(delta).ok_or(MessageToBytesError::OptionGapTooLarge(delta))?;
      let (len_nibble, len_ext) = u32::try_from(value.len()).ok()
                                                            .and_then(ext_nibble)
                                                            .ok_or(MessageToBytesError::OptionTooLong(value.len()))?;

      bytes.push(delta_nibble << 4 | len_nibble);
      bytes.extend(delta_ext);
      bytes.extend(len_ext);
      bytes.extend(value);

      prev = opt.number;
    }

    if !self.payload.0.is_empty() {
      bytes.push(0xff);
      bytes.extend(self.payload.0);
    }

    Ok(bytes)
  }
}
