use crate::cursor::Cursor;
use crate::msg::parse_error::MessageParseError;

/// Content-Format / Accept media types
pub mod content_format;
/// The known-option registry
pub mod registry;
/// Typed option values
pub mod value;

pub use content_format::*;
pub use registry::*;
pub use value::*;

/// Identifies an option within a message, e.g. Uri-Path is 11.
///
/// Registered numbers fit in 16 bits; the type is wider so that
/// encode-time gap arithmetic can observe (and reject) deltas the
/// wire format cannot express.
///
/// See [RFC7252 §5.4.6](https://datatracker.ietf.org/doc/html/rfc7252#section-5.4.6)
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptNumber(pub u32);

macro_rules! opt_number {
  (#[doc = $doc:expr] $name:ident = $n:literal) => {
    #[doc = $doc]
    pub const $name: OptNumber = OptNumber($n);
  };
}

opt_number!(#[doc = "If-Match (RFC7252 §5.10.8.1)"]       IF_MATCH = 1);
opt_number!(#[doc = "Uri-Host (RFC7252 §5.10.1)"]         URI_HOST = 3);
opt_number!(#[doc = "ETag (RFC7252 §5.10.6)"]             ETAG = 4);
opt_number!(#[doc = "If-None-Match (RFC7252 §5.10.8.2)"]  IF_NONE_MATCH = 5);
opt_number!(#[doc = "Observe (RFC7641 §2)"]               OBSERVE = 6);
opt_number!(#[doc = "Uri-Port (RFC7252 §5.10.1)"]         URI_PORT = 7);
opt_number!(#[doc = "Location-Path (RFC7252 §5.10.7)"]    LOCATION_PATH = 8);
opt_number!(#[doc = "Uri-Path (RFC7252 §5.10.1)"]         URI_PATH = 11);
opt_number!(#[doc = "Content-Format (RFC7252 §5.10.3)"]   CONTENT_FORMAT = 12);
opt_number!(#[doc = "Max-Age (RFC7252 §5.10.5)"]          MAX_AGE = 14);
opt_number!(#[doc = "Uri-Query (RFC7252 §5.10.1)"]        URI_QUERY = 15);
opt_number!(#[doc = "Accept (RFC7252 §5.10.4)"]           ACCEPT = 17);
opt_number!(#[doc = "Location-Query (RFC7252 §5.10.7)"]   LOCATION_QUERY = 20);
opt_number!(#[doc = "Proxy-Uri (RFC7252 §5.10.2)"]        PROXY_URI = 35);
opt_number!(#[doc = "Proxy-Scheme (RFC7252 §5.10.2)"]     PROXY_SCHEME = 39);
opt_number!(#[doc = "Size1 (RFC7252 §5.10.9)"]            SIZE1 = 60);

opt_number!(#[doc = "Vendor: device id (experimental block)"]     VENDOR_ID = 65000);
opt_number!(#[doc = "Vendor: device key (experimental block)"]    VENDOR_KEY = 65001);
opt_number!(#[doc = "Vendor: access id (experimental block)"]     ACCESS_ID = 65002);
opt_number!(#[doc = "Vendor: access key (experimental block)"]    ACCESS_KEY = 65003);
opt_number!(#[doc = "Vendor: payload crc32 (experimental block)"] CHECK_CRC32 = 65004);
opt_number!(#[doc = "Vendor: encoder type (experimental block)"]  ENCODER_TYPE = 65005);
opt_number!(#[doc = "Vendor: encoder id (experimental block)"]    ENCODER_ID = 65006);
opt_number!(#[doc = "Vendor: flag bits (experimental block)"]     FLAGS = 65007);
opt_number!(#[doc = "Vendor: package number (experimental block)"] PACKAGE_NUMBER = 65100);

/// A single option entry: a number and its typed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opt {
  /// Which option this is
  pub number: OptNumber,
  /// The option's value
  pub value: OptValue,
}

/// The options attached to a message: an ordered multi-map from
/// [`OptNumber`] to [`OptValue`].
///
/// Repeatable options (Uri-Path, Uri-Query, ...) appear once per
/// value, and their relative order is meaningful; [`Opts::add`]
/// preserves insertion order, and the stable sort applied at encode
/// time keeps entries with equal numbers in the order they were
/// added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Opts(pub Vec<Opt>);

impl Opts {
  /// Append one value for `number`.
  pub fn add(&mut self, number: OptNumber, value: impl Into<OptValue>) {
    self.0.push(Opt { number, value: value.into() });
  }

  /// Append one entry per element of `values`, in order.
  ///
  /// This is the convenience used for path segments and query
  /// parameters, which repeat the same option number.
  pub fn add_many<V>(&mut self, number: OptNumber, values: impl IntoIterator<Item = V>)
    where V: Into<OptValue>
  {
    for value in values {
      self.add(number, value);
    }
  }

  /// Drop every entry with `number`.
  pub fn remove(&mut self, number: OptNumber) {
    self.0.retain(|opt| opt.number != number);
  }

  /// Replace every entry with `number` by a single new value.
  pub fn set(&mut self, number: OptNumber, value: impl Into<OptValue>) {
    self.remove(number);
    self.add(number, value);
  }

  /// The first value for `number`, `None` when absent.
  pub fn first(&self, number: OptNumber) -> Option<&OptValue> {
    self.all(number).next()
  }

  /// Every value for `number`, in insertion order.
  pub fn all(&self, number: OptNumber) -> impl Iterator<Item = &OptValue> {
    self.0
        .iter()
        .filter(move |opt| opt.number == number)
        .map(|opt| &opt.value)
  }

  /// Order entries by ascending number, preserving insertion order
  /// among equal numbers. The encoder relies on this before emitting
  /// deltas.
  pub fn sort_stable(&mut self) {
    self.0.sort_by_key(|opt| opt.number);
  }

  /// Iterate over all entries in their current order.
  pub fn iter(&self) -> impl Iterator<Item = &Opt> {
    self.0.iter()
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether there are no entries.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<'a> IntoIterator for &'a Opts {
  type Item = &'a Opt;
  type IntoIter = core::slice::Iter<'a, Opt>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// Resolve a 4-bit delta or length nibble into its value, consuming
/// extension bytes as the nibble dictates: 0-12 literal, 13 reads one
/// byte (+13), 14 reads two big-endian bytes (+269), 15 is reserved.
pub(crate) fn parse_ext<A: AsRef<[u8]>>(nibble: u8,
                                        bytes: &mut Cursor<A>)
                                        -> Result<u32, MessageParseError> {
  match nibble {
    | 13 => bytes.next()
                 .map(|b| u32::from(b) + 13)
                 .ok_or(MessageParseError::Truncated),
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(u32::from(u16::from_be_bytes([a, b])) + 269),
      | _ => Err(MessageParseError::Truncated),
    },
    | 15 => Err(MessageParseError::UnexpectedExtendedMarker),
    | n => Ok(u32::from(n)),
  }
}

/// Consume the option block, up to and including the payload marker
/// when one is present. The cursor is left at the first payload byte
/// (or the end of the buffer).
pub(crate) fn parse_opts<A: AsRef<[u8]>>(bytes: &mut Cursor<A>)
                                         -> Result<Opts, MessageParseError> {
  let mut opts = Opts::default();
  let mut prev = OptNumber(0);

  while let Some(head) = bytes.next() {
    if head == 0xff {
      break;
    }

    let delta = parse_ext(head >> 4, bytes)?;
    let len = parse_ext(head & 0b1111, bytes)? as usize;

    // saturate rather than wrap on absurdly long inputs
    let number = OptNumber(prev.0.saturating_add(delta));
    let value = bytes.take_exact(len).ok_or(MessageParseError::Truncated)?;
    prev = number;

    let def = match OptDef::of(number) {
      | Some(def) => def,
      // unknown option: skip it, but its number still seeds the
      // next delta (RFC7252 §5.4.1, simplified)
      | None => continue,
    };

    if len < def.min_len || len > def.max_len {
      // illegal value length: skip (RFC7252 §5.4.3)
      continue;
    }

    opts.0.push(Opt { number, value: OptValue::parse(number, def, value) });
  }

  Ok(opts)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(bytes: &[u8]) -> Result<Opts, MessageParseError> {
    parse_opts(&mut Cursor::new(bytes))
  }

  #[test]
  fn single_opt() {
    // delta 11 (Uri-Path), length 4
    let opts = parse(&[0xb4, b'c', b'o', b'r', b'e']).unwrap();
    assert_eq!(opts.0,
               vec![Opt { number: URI_PATH, value: OptValue::String("core".into()) }]);
  }

  #[test]
  fn extended_delta() {
    // delta nibble 13, ext byte 1 => 14 (Max-Age), length 1
    let opts = parse(&[0xd1, 14 - 13, 60]).unwrap();
    assert_eq!(opts.0, vec![Opt { number: MAX_AGE, value: OptValue::Uint(60) }]);
  }

  #[test]
  fn word_extended_delta() {
    // delta nibble 14, ext word 65000 - 269 => VENDOR_ID, length 0
    let ext = (65000u16 - 269).to_be_bytes();
    let opts = parse(&[0xe0, ext[0], ext[1]]).unwrap();
    assert_eq!(opts.0,
               vec![Opt { number: VENDOR_ID, value: OptValue::String("".into()) }]);
  }

  #[test]
  fn reserved_nibble() {
    assert_eq!(parse(&[0xf1, 0]), Err(MessageParseError::UnexpectedExtendedMarker));
    assert_eq!(parse(&[0x1f, 0]), Err(MessageParseError::UnexpectedExtendedMarker));
  }

  #[test]
  fn truncated_ext() {
    assert_eq!(parse(&[0xd1]), Err(MessageParseError::Truncated));
    assert_eq!(parse(&[0xe1, 0x01]), Err(MessageParseError::Truncated));
  }

  #[test]
  fn truncated_value() {
    assert_eq!(parse(&[0xb4, b'c']), Err(MessageParseError::Truncated));
  }

  #[test]
  fn unknown_opt_skipped_but_advances() {
    // option 2 is unassigned; Uri-Path follows with delta 9
    let opts = parse(&[0x21, 0xaa, 0x94, b'c', b'o', b'r', b'e']).unwrap();
    assert_eq!(opts.0,
               vec![Opt { number: URI_PATH, value: OptValue::String("core".into()) }]);
  }

  #[test]
  fn illegal_length_skipped() {
    // Content-Format permits at most 2 value bytes
    let opts = parse(&[0xc3, 1, 2, 3]).unwrap();
    assert!(opts.is_empty());
  }

  #[test]
  fn multi_value_order_kept() {
    let mut opts = Opts::default();
    opts.add_many(URI_PATH, ["a", "b"]);
    opts.add(URI_QUERY, "q=1");
    opts.add(URI_PATH, "c");

    let paths: Vec<_> = opts.all(URI_PATH).collect();
    assert_eq!(paths,
               vec![&OptValue::String("a".into()),
                    &OptValue::String("b".into()),
                    &OptValue::String("c".into())]);

    opts.sort_stable();
    let order: Vec<_> = opts.iter().map(|o| o.number).collect();
    assert_eq!(order, vec![URI_PATH, URI_PATH, URI_PATH, URI_QUERY]);
  }

  #[test]
  fn set_replaces_all() {
    let mut opts = Opts::default();
    opts.add_many(URI_PATH, ["a", "b"]);
    opts.set(URI_PATH, "c");
    assert_eq!(opts.len(), 1);
    assert_eq!(opts.first(URI_PATH), Some(&OptValue::String("c".into())));

    opts.remove(URI_PATH);
    assert_eq!(opts.first(URI_PATH), None);
  }
}
