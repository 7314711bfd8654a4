use super::OptNumber;

/// Option value formats (RFC7252 §3.2).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueFormat {
  /// Zero bytes of value
  Empty,
  /// Raw bytes
  Opaque,
  /// 0-4 byte big-endian unsigned integer
  Uint,
  /// UTF-8 text
  String,
}

/// Registry entry for a known option number: its value format and
/// the permitted value length range in bytes.
///
/// Decoded options whose length falls outside `[min_len, max_len]`
/// are dropped (RFC7252 §5.4.3); numbers with no entry at all are
/// dropped too (a simplification of the §5.4.1 elective/critical
/// rules).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OptDef {
  /// How the value bytes are interpreted
  pub format: ValueFormat,
  /// Smallest permitted value length
  pub min_len: usize,
  /// Largest permitted value length
  pub max_len: usize,
}

impl OptDef {
  /// Look up the registry entry for `n`, `None` when `n` is unknown.
  ///
  /// Covers the RFC7252 §5.10 base registry plus the experimental
  /// vendor block at 65000-65100.
  pub fn of(n: OptNumber) -> Option<OptDef> {
    let def =
      |format, min_len, max_len| Some(OptDef { format, min_len, max_len });

    match n.0 {
      | 1 => def(ValueFormat::Opaque, 0, 8),      // If-Match
      | 3 => def(ValueFormat::String, 1, 255),    // Uri-Host
      | 4 => def(ValueFormat::Opaque, 1, 8),      // ETag
      | 5 => def(ValueFormat::Empty, 0, 0),       // If-None-Match
      | 6 => def(ValueFormat::Uint, 0, 3),        // Observe
      | 7 => def(ValueFormat::Uint, 0, 2),        // Uri-Port
      | 8 => def(ValueFormat::String, 0, 255),    // Location-Path
      | 11 => def(ValueFormat::String, 0, 255),   // Uri-Path
      | 12 => def(ValueFormat::Uint, 0, 2),       // Content-Format
      | 14 => def(ValueFormat::Uint, 0, 4),       // Max-Age
      | 15 => def(ValueFormat::String, 0, 255),   // Uri-Query
      | 17 => def(ValueFormat::Uint, 0, 2),       // Accept
      | 20 => def(ValueFormat::String, 0, 255),   // Location-Query
      | 35 => def(ValueFormat::String, 1, 1034),  // Proxy-Uri
      | 39 => def(ValueFormat::String, 1, 255),   // Proxy-Scheme
      | 60 => def(ValueFormat::Uint, 0, 4),       // Size1
      | 65000..=65003 => def(ValueFormat::String, 0, 255),
      | 65004..=65007 | 65100 => def(ValueFormat::Uint, 0, 4),
      | _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::msg::opt::{CONTENT_FORMAT, IF_NONE_MATCH, PROXY_URI, URI_PATH};

  #[test]
  fn base_registry() {
    assert_eq!(OptDef::of(URI_PATH),
               Some(OptDef { format: ValueFormat::String, min_len: 0, max_len: 255 }));
    assert_eq!(OptDef::of(CONTENT_FORMAT),
               Some(OptDef { format: ValueFormat::Uint, min_len: 0, max_len: 2 }));
    assert_eq!(OptDef::of(IF_NONE_MATCH),
               Some(OptDef { format: ValueFormat::Empty, min_len: 0, max_len: 0 }));
    assert_eq!(OptDef::of(PROXY_URI).unwrap().max_len, 1034);
  }

  #[test]
  fn vendor_block() {
    assert_eq!(OptDef::of(OptNumber(65000)).unwrap().format, ValueFormat::String);
    assert_eq!(OptDef::of(OptNumber(65007)).unwrap().format, ValueFormat::Uint);
    assert_eq!(OptDef::of(OptNumber(65100)).unwrap().format, ValueFormat::Uint);
    assert_eq!(OptDef::of(OptNumber(65008)), None);
  }

  #[test]
  fn unknown_numbers() {
    for n in [0u32, 2, 999, 2048, 64999, 65101] {
      assert_eq!(OptDef::of(OptNumber(n)), None);
    }
  }
}
