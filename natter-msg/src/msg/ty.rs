use core::fmt;

/// The message type, from the two bits after the version field:
/// Confirmable (0), Non-confirmable (1), Acknowledgement (2) or
/// Reset (3).
///
/// The codec only carries the type; retransmission of Confirmables
/// and ACK/Reset matching are the application's concern.
///
/// See [RFC7252 §4.2-4.3](https://datatracker.ietf.org/doc/html/rfc7252#section-4.2)
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub enum Type {
  /// Wants an Acknowledgement (or Reset) back from the receiver.
  Con,
  /// Fire-and-forget; suited to traffic like periodic sensor
  /// readings, where the next sample supersedes a lost one.
  Non,
  /// Confirms that a specific Confirmable message arrived, and may
  /// piggyback the response to it.
  Ack,
  /// Tells the sender its message arrived but could not be placed,
  /// e.g. the receiver rebooted and lost the state needed to make
  /// sense of it.
  Reset,
}

impl Type {
  /// Read a type out of the 2-bit wire field (higher bits are ignored).
  pub(crate) fn from_wire(b: u8) -> Type {
    match b & 0b11 {
      | 0 => Type::Con,
      | 1 => Type::Non,
      | 2 => Type::Ack,
      | _ => Type::Reset,
    }
  }
}

impl From<Type> for u8 {
  fn from(ty: Type) -> u8 {
    match ty {
      | Type::Con => 0,
      | Type::Non => 1,
      | Type::Ack => 2,
      | Type::Reset => 3,
    }
  }
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
                  | Type::Con => "Confirmable",
                  | Type::Non => "NonConfirmable",
                  | Type::Ack => "Acknowledgement",
                  | Type::Reset => "Reset",
                })
  }
}
