/// Protocol version, read from the top two bits of a message.
///
/// RFC 7252 defines exactly one version, 1, and the decoder rejects
/// everything else, so a `Version` in a parsed message always holds
/// 1. It is kept as a field anyway so the header round-trips without
/// special cases.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Version(pub u8);

impl Default for Version {
  fn default() -> Version {
    Version(1)
  }
}
