/// Media type carried by the Content-Format and Accept options.
///
/// The numeric values come from the CoAP Content-Formats registry
/// ([RFC7252 §12.3](https://datatracker.ietf.org/doc/html/rfc7252#section-12.3)).
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentFormat {
  /// `text/plain; charset=utf-8`
  Text,
  /// `application/link-format`
  LinkFormat,
  /// `application/xml`
  Xml,
  /// `application/octet-stream`
  OctetStream,
  /// `application/exi`
  Exi,
  /// `application/json`
  Json,
  /// A media type this crate has no name for
  Other(u16),
}

impl From<ContentFormat> for u16 {
  fn from(f: ContentFormat) -> u16 {
    match f {
      | ContentFormat::Text => 0,
      | ContentFormat::LinkFormat => 40,
      | ContentFormat::Xml => 41,
      | ContentFormat::OctetStream => 42,
      | ContentFormat::Exi => 47,
      | ContentFormat::Json => 50,
      | ContentFormat::Other(n) => n,
    }
  }
}

impl From<u16> for ContentFormat {
  fn from(n: u16) -> ContentFormat {
    match n {
      | 0 => ContentFormat::Text,
      | 40 => ContentFormat::LinkFormat,
      | 41 => ContentFormat::Xml,
      | 42 => ContentFormat::OctetStream,
      | 47 => ContentFormat::Exi,
      | 50 => ContentFormat::Json,
      | n => ContentFormat::Other(n),
    }
  }
}
