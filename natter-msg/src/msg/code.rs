use core::fmt;

/// # Message Code
///
/// 8-bit class/detail pair packed on the wire as `class * 32 + detail`.
///
/// |class|meaning|
/// |---|---|
/// |`0`|Message is empty (0.00) or a request|
/// |`2`|Message is a success response|
/// |`4`|Message is a client error response|
/// |`5`|Message is a server error response|
/// |`6`, `7`|Reserved by RFC 7252; carries the vendor response block here|
///
/// ```
/// use natter_msg::Code;
///
/// assert_eq!(Code::new(2, 5), Code::from(0b010_00101));
/// ```
///
/// See [RFC7252 §12.1](https://datatracker.ietf.org/doc/html/rfc7252#section-12.1)
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Code {
  /// Request / response class (the 3 high bits)
  pub class: u8,
  /// Granular detail within the class (the 5 low bits, range `[0, 32)`)
  pub detail: u8,
}

impl Code {
  /// Create a new Code
  ///
  /// ```
  /// use natter_msg::Code;
  ///
  /// let content = Code::new(2, 05);
  /// ```
  pub const fn new(class: u8, detail: u8) -> Code {
    Code { class, detail }
  }

  /// Whether this code lies in the request range (0.01-0.31)
  pub fn is_request(&self) -> bool {
    self.class == 0 && self.detail > 0
  }

  /// Whether this code lies in the response range (2.00-7.31)
  pub fn is_response(&self) -> bool {
    self.class >= 2
  }

  /// The dotted human form, e.g. `['2', '.', '0', '5']`
  pub fn to_human(&self) -> [char; 4] {
    let to_char = |d: u8| char::from_digit(d.into(), 10).unwrap_or('?');
    [to_char(self.class), '.', to_char(self.detail / 10), to_char(self.detail % 10)]
  }

  /// The registered name of this code, `None` when unassigned.
  pub fn name(&self) -> Option<&'static str> {
    name_of(*self)
  }
}

impl From<u8> for Code {
  fn from(b: u8) -> Code {
    Code { class: b >> 5, detail: b & 0b11111 }
  }
}

impl From<Code> for u8 {
  fn from(code: Code) -> u8 {
    code.class << 5 | code.detail
  }
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.name() {
      | Some(name) => f.write_str(name),
      | None => write!(f, "Unknown (0x{:02x})", u8::from(*self)),
    }
  }
}

macro_rules! code {
  (#[doc = $doc:expr] $name:ident = $c:literal . $d:literal) => {
    #[doc = $doc]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: Code = Code::new($c, $d);
  };
}

// Methods (0.xx)
code!(#[doc = "0.01 GET"]    GET = 0 . 01);
code!(#[doc = "0.02 POST"]   POST = 0 . 02);
code!(#[doc = "0.03 PUT"]    PUT = 0 . 03);
code!(#[doc = "0.04 DELETE"] DELETE = 0 . 04);

// Success responses (2.xx)
code!(#[doc = "2.01 Created"] CREATED = 2 . 01);
code!(#[doc = "2.02 Deleted"] DELETED = 2 . 02);
code!(#[doc = "2.03 Valid"]   VALID = 2 . 03);
code!(#[doc = "2.04 Changed"] CHANGED = 2 . 04);
code!(#[doc = "2.05 Content"] CONTENT = 2 . 05);

// Client error responses (4.xx)
code!(#[doc = "4.00 Bad Request"]              BAD_REQUEST = 4 . 00);
code!(#[doc = "4.01 Unauthorized"]             UNAUTHORIZED = 4 . 01);
code!(#[doc = "4.02 Bad Option"]               BAD_OPTION = 4 . 02);
code!(#[doc = "4.03 Forbidden"]                FORBIDDEN = 4 . 03);
code!(#[doc = "4.04 Not Found"]                NOT_FOUND = 4 . 04);
code!(#[doc = "4.05 Method Not Allowed"]       METHOD_NOT_ALLOWED = 4 . 05);
code!(#[doc = "4.06 Not Acceptable"]           NOT_ACCEPTABLE = 4 . 06);
code!(#[doc = "4.12 Precondition Failed"]      PRECONDITION_FAILED = 4 . 12);
code!(#[doc = "4.13 Request Entity Too Large"] REQUEST_ENTITY_TOO_LARGE = 4 . 13);
code!(#[doc = "4.15 Unsupported Content-Format"] UNSUPPORTED_CONTENT_FORMAT = 4 . 15);

// Server error responses (5.xx)
code!(#[doc = "5.00 Internal Server Error"]  INTERNAL_SERVER_ERROR = 5 . 00);
code!(#[doc = "5.01 Not Implemented"]        NOT_IMPLEMENTED = 5 . 01);
code!(#[doc = "5.02 Bad Gateway"]            BAD_GATEWAY = 5 . 02);
code!(#[doc = "5.03 Service Unavailable"]    SERVICE_UNAVAILABLE = 5 . 03);
code!(#[doc = "5.04 Gateway Timeout"]        GATEWAY_TIMEOUT = 5 . 04);
code!(#[doc = "5.05 Proxying Not Supported"] PROXYING_NOT_SUPPORTED = 5 . 05);

// Vendor response block (6.xx / 7.xx, reserved by RFC 7252 but used
// by deployed telemetry firmware this endpoint talks to)
code!(#[doc = "6.00 vendor: request handled"]            VENDOR_OK = 6 . 00);
code!(#[doc = "6.01 vendor: new parameters available"]   VENDOR_PARAM_UPDATE = 6 . 01);
code!(#[doc = "6.02 vendor: new firmware available"]     VENDOR_FIRMWARE_UPDATE = 6 . 02);
code!(#[doc = "6.03 vendor: user command pending"]       VENDOR_USER_COMMAND = 6 . 03);
code!(#[doc = "6.28 vendor: enter flight mode"]          VENDOR_FLIGHT_MODE = 6 . 28);
code!(#[doc = "7.00 vendor: bad activation key"]         VENDOR_BAD_KEY = 7 . 00);
code!(#[doc = "7.01 vendor: bad data"]                   VENDOR_BAD_DATA = 7 . 01);
code!(#[doc = "7.02 vendor: unknown device or sensor"]   VENDOR_UNKNOWN_DEVICE = 7 . 02);
code!(#[doc = "7.03 vendor: timestamp expired"]          VENDOR_TIME_EXPIRED = 7 . 03);
code!(#[doc = "7.04 vendor: unsupported protocol rev"]   VENDOR_BAD_PROTOCOL_VERSION = 7 . 04);
code!(#[doc = "7.05 vendor: protocol parse failure"]     VENDOR_PROTOCOL_PARSE_ERROR = 7 . 05);
code!(#[doc = "7.06 vendor: request timed out"]          VENDOR_REQUEST_TIMEOUT = 7 . 06);
code!(#[doc = "7.07 vendor: option parse failure"]       VENDOR_OPTION_PARSE_ERROR = 7 . 07);
code!(#[doc = "7.08 vendor: unsupported option method"]  VENDOR_BAD_OPTION_METHOD = 7 . 08);
code!(#[doc = "7.09 vendor: unsupported packet type"]    VENDOR_BAD_PACKET_TYPE = 7 . 09);
code!(#[doc = "7.10 vendor: payload decode failure"]     VENDOR_DATA_DECODE_ERROR = 7 . 10);
code!(#[doc = "7.11 vendor: bad packet length field"]    VENDOR_BAD_PACKET_LENGTH = 7 . 11);
code!(#[doc = "7.12 vendor: relay upstream busy"]        VENDOR_RELAY_BUSY = 7 . 12);
code!(#[doc = "7.13 vendor: gateway upstream busy"]      VENDOR_GATEWAY_BUSY = 7 . 13);
code!(#[doc = "7.14 vendor: cache service fault"]        VENDOR_CACHE_ERROR = 7 . 14);
code!(#[doc = "7.15 vendor: table store fault"]          VENDOR_TABLE_STORE_ERROR = 7 . 15);
code!(#[doc = "7.16 vendor: database fault"]             VENDOR_DATABASE_ERROR = 7 . 16);
code!(#[doc = "7.17 vendor: unsupported encoding"]       VENDOR_BAD_ENCODING = 7 . 17);
code!(#[doc = "7.18 vendor: device already registered"]  VENDOR_DEVICE_REREGISTERED = 7 . 18);
code!(#[doc = "7.19 vendor: SIM already in use"]         VENDOR_SIM_IN_USE = 7 . 19);
code!(#[doc = "7.20 vendor: SIM not registered"]         VENDOR_SIM_UNREGISTERED = 7 . 20);
code!(#[doc = "7.21 vendor: forced device update failed"] VENDOR_DEVICE_UPDATE_FAILED = 7 . 21);

fn name_of(code: Code) -> Option<&'static str> {
  let name = match (code.class, code.detail) {
    | (0, 1) => "GET",
    | (0, 2) => "POST",
    | (0, 3) => "PUT",
    | (0, 4) => "DELETE",
    | (2, 1) => "Created",
    | (2, 2) => "Deleted",
    | (2, 3) => "Valid",
    | (2, 4) => "Changed",
    | (2, 5) => "Content",
    | (4, 0) => "BadRequest",
    | (4, 1) => "Unauthorized",
    | (4, 2) => "BadOption",
    | (4, 3) => "Forbidden",
    | (4, 4) => "NotFound",
    | (4, 5) => "MethodNotAllowed",
    | (4, 6) => "NotAcceptable",
    | (4, 12) => "PreconditionFailed",
    | (4, 13) => "RequestEntityTooLarge",
    | (4, 15) => "UnsupportedContentFormat",
    | (5, 0) => "InternalServerError",
    | (5, 1) => "NotImplemented",
    | (5, 2) => "BadGateway",
    | (5, 3) => "ServiceUnavailable",
    | (5, 4) => "GatewayTimeout",
    | (5, 5) => "ProxyingNotSupported",
    | (6, 0) => "VendorOk",
    | (6, 1) => "VendorParamUpdate",
    | (6, 2) => "VendorFirmwareUpdate",
    | (6, 3) => "VendorUserCommand",
    | (6, 28) => "VendorFlightMode",
    | (7, 0) => "VendorBadKey",
    | (7, 1) => "VendorBadData",
    | (7, 2) => "VendorUnknownDevice",
    | (7, 3) => "VendorTimeExpired",
    | (7, 4) => "VendorBadProtocolVersion",
    | (7, 5) => "VendorProtocolParseError",
    | (7, 6) => "VendorRequestTimeout",
    | (7, 7) => "VendorOptionParseError",
    | (7, 8) => "VendorBadOptionMethod",
    | (7, 9) => "VendorBadPacketType",
    | (7, 10) => "VendorDataDecodeError",
    | (7, 11) => "VendorBadPacketLength",
    | (7, 12) => "VendorRelayBusy",
    | (7, 13) => "VendorGatewayBusy",
    | (7, 14) => "VendorCacheError",
    | (7, 15) => "VendorTableStoreError",
    | (7, 16) => "VendorDatabaseError",
    | (7, 17) => "VendorBadEncoding",
    | (7, 18) => "VendorDeviceReregistered",
    | (7, 19) => "VendorSimInUse",
    | (7, 20) => "VendorSimUnregistered",
    | (7, 21) => "VendorDeviceUpdateFailed",
    | _ => return None,
  };
  Some(name)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_code() {
    let byte = 0b_01_000101u8;
    let code = Code::from(byte);
    assert_eq!(code, Code { class: 2, detail: 5 });
  }

  #[test]
  fn serialize_code() {
    let code = Code { class: 2, detail: 5 };
    assert_eq!(u8::from(code), 0b_010_00101u8);
  }

  #[test]
  fn wire_values() {
    assert_eq!(u8::from(GET), 1);
    assert_eq!(u8::from(CONTENT), 69);
    assert_eq!(u8::from(NOT_FOUND), 132);
    assert_eq!(u8::from(INTERNAL_SERVER_ERROR), 160);
    assert_eq!(u8::from(VENDOR_OK), 192);
    assert_eq!(u8::from(VENDOR_USER_COMMAND), 195);
    assert_eq!(u8::from(VENDOR_FLIGHT_MODE), 220);
    assert_eq!(u8::from(VENDOR_BAD_KEY), 224);
    assert_eq!(u8::from(VENDOR_DEVICE_UPDATE_FAILED), 245);
  }

  #[test]
  fn to_human() {
    assert_eq!(String::from_iter(CONTENT.to_human()), "2.05");
    assert_eq!(String::from_iter(PRECONDITION_FAILED.to_human()), "4.12");
  }

  #[test]
  fn display() {
    assert_eq!(CONTENT.to_string(), "Content");
    assert_eq!(GET.to_string(), "GET");
    assert_eq!(VENDOR_OK.to_string(), "VendorOk");
    assert_eq!(Code::new(1, 0).to_string(), "Unknown (0x20)");
  }

  #[test]
  fn ranges() {
    assert!(GET.is_request());
    assert!(!GET.is_response());
    assert!(CONTENT.is_response());
    assert!(!Code::new(0, 0).is_request());
  }
}
