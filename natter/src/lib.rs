//! A minimal wire-level CoAP ([RFC 7252]) endpoint over UDP.
//!
//! The codec lives in [`natter_msg`] (re-exported here as [`msg`]);
//! this crate adds the part that touches the network:
//!
//! - [`listen_and_serve`] / [`serve`]: a read loop that parses each
//!   inbound datagram and hands it to a [`Handler`] on its own
//!   thread, transmitting whatever reply the handler returns
//! - [`transmit`] / [`receive`]: one-shot send and receive of single
//!   messages over a [`std::net::UdpSocket`]
//! - a `RUOK`/`IMOK` liveness probe answered before CoAP parsing,
//!   for load balancers that poke the port (see
//!   [`trace::set_health_monitor`])
//!
//! There is deliberately no reliability layer here: no retransmission
//! of confirmable messages, no deduplication, no ACK matching. The
//! handler sees every datagram that parses, and what it does with
//! tokens and message ids is its own business.
//!
//! [RFC 7252]: https://datatracker.ietf.org/doc/html/rfc7252

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(not(test), deny(unsafe_code))]
#![cfg_attr(not(test), warn(unreachable_pub))]

mod error;
/// The listen/dispatch loop and single-message helpers
pub mod server;
/// Runtime flags and the trace hook
pub mod trace;

pub use error::Error;
/// The message codec, re-exported for convenience.
pub use natter_msg as msg;
pub use server::{listen_and_serve, receive, serve, set_response_timeout, transmit, Handler,
                 MAX_PACKET_LEN};
