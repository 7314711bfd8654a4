use tinyvec::ArrayVec;

/// Message token: 0 to 8 opaque bytes chosen by the sender of a
/// request, echoed back in the matching response.
///
/// Where [`Id`](super::Id) correlates messages at the transport
/// layer, the token correlates a request with its response at the
/// application layer.
///
/// See [RFC7252 §5.3.1](https://datatracker.ietf.org/doc/html/rfc7252#section-5.3.1)
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Debug)]
pub struct Token(pub ArrayVec<[u8; 8]>);

impl Token {
  /// Copy up to 8 bytes into a token, `None` if the slice is longer.
  pub fn from_slice(bytes: &[u8]) -> Option<Token> {
    if bytes.len() > 8 {
      return None;
    }

    let mut token = Token::default();
    token.0.extend_from_slice(bytes);
    Some(token)
  }

  /// Length of the token in bytes (0 to 8).
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether the token is the zero-length token.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
