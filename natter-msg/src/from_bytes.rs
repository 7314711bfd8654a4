/// Trait for fallibly reading a data structure off a byte buffer
pub trait TryFromBytes<A: AsRef<[u8]>>: Sized {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert from some sequence of bytes `A` into `Self`
  fn try_from_bytes(bytes: A) -> Result<Self, Self::Error>;
}
