//! Low-level representation of CoAP (RFC 7252) messages and their
//! bit-exact wire codec.
//!
//! The most notable item is [`Message`]: a CoAP message very close
//! to the actual byte layout, together with [`TryFromBytes`] for
//! parsing datagrams and [`TryIntoBytes`] for serializing them.
//!
//! ## Options
//! Options are carried as typed values ([`OptValue`]): the registry
//! of known option numbers ([`OptDef`]) decides how value bytes are
//! interpreted on decode, and length bounds outside of which a
//! received option is dropped rather than failing the whole message.
//!
//! ## Totality
//! Parsing is total over malformed input: any byte string yields
//! either a `Message` or one of the five [`MessageParseError`]
//! variants, never a panic.
//!
//! ```
//! use natter_msg::{code, Id, Message, TryFromBytes, TryIntoBytes, Type, URI_PATH};
//!
//! let mut req = Message::new(Type::Con, code::GET, Id(0x1234));
//! req.opts.add(URI_PATH, "sensors");
//! req.opts.add(URI_PATH, "temp");
//!
//! let bytes = req.clone().try_into_bytes().unwrap();
//! assert_eq!(Message::try_from_bytes(bytes).unwrap(), req);
//! ```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(not(test), deny(unsafe_code))]
#![cfg_attr(not(test), warn(unreachable_pub))]

mod cursor;

#[doc(hidden)]
pub mod from_bytes;

/// Message structs
pub mod msg;

#[doc(hidden)]
pub mod to_bytes;

#[doc(inline)]
pub use from_bytes::TryFromBytes;
#[doc(inline)]
pub use msg::*;
#[doc(inline)]
pub use to_bytes::{MessageToBytesError, TryIntoBytes};
