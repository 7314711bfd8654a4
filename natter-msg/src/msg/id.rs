/// Transport-level message correlator: 16 bits, big-endian in bytes
/// 2-3 of the header.
///
/// Receivers use it to spot retransmitted duplicates and to pair an
/// Acknowledgement or Reset with the message that provoked it
/// (RFC 7252 §4); this crate carries the value through the codec and
/// leaves both of those jobs to the application.
#[derive(Copy, Clone, Hash, PartialEq, PartialOrd, Debug, Eq, Ord, Default)]
pub struct Id(pub u16);

impl Id {
  /// Read an Id out of the two header bytes, network byte order.
  pub fn from_be_bytes(bs: [u8; 2]) -> Id {
    Id(u16::from_be_bytes(bs))
  }
}

impl From<Id> for [u8; 2] {
  fn from(id: Id) -> [u8; 2] {
    id.0.to_be_bytes()
  }
}
