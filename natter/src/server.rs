//! The datagram listen/dispatch loop.
//!
//! [`serve`] reads datagrams one at a time and hands each one to its
//! own thread, so a slow or panicking handler never stalls the read
//! loop or takes the process down.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use natter_msg::{Message, TryFromBytes, TryIntoBytes};

use crate::trace;
use crate::Error;

/// Largest datagram the listen loop will read, one ethernet MTU.
pub const MAX_PACKET_LEN: usize = 1500;

const PROBE_REQUEST: &[u8] = b"RUOK";
const PROBE_REPLY: &[u8] = b"IMOK";

static RESPONSE_TIMEOUT_MS: AtomicU64 = AtomicU64::new(2_000);

/// Read deadline applied by [`receive`]. Defaults to 2 seconds.
pub fn set_response_timeout(timeout: Duration) {
  RESPONSE_TIMEOUT_MS.store(timeout.as_millis() as u64, Ordering::Relaxed);
}

fn response_timeout() -> Duration {
  Duration::from_millis(RESPONSE_TIMEOUT_MS.load(Ordering::Relaxed))
}

/// Something that answers CoAP messages.
///
/// One inbound datagram is one call; calls happen concurrently, one
/// thread per datagram, so implementations must be happy to be
/// invoked from many threads at once.
///
/// Returning `Some` transmits that message back to the peer the
/// request came from. Plain functions and closures of the right
/// shape are handlers too:
///
/// ```no_run
/// use natter::msg::{code, Message, Type};
///
/// natter::listen_and_serve("0.0.0.0:5683", |_socket: &std::net::UdpSocket,
///                                           _peer: std::net::SocketAddr,
///                                           req: &Message| {
///   let mut rep = Message::new(Type::Ack, code::NOT_FOUND, req.id);
///   rep.token = req.token;
///   Some(rep)
/// }).unwrap();
/// ```
pub trait Handler: Send + Sync {
  /// Handle one decoded message, optionally producing a reply.
  fn serve(&self, socket: &UdpSocket, peer: SocketAddr, req: &Message) -> Option<Message>;
}

impl<F> Handler for F
  where F: Fn(&UdpSocket, SocketAddr, &Message) -> Option<Message> + Send + Sync
{
  fn serve(&self, socket: &UdpSocket, peer: SocketAddr, req: &Message) -> Option<Message> {
    self(socket, peer, req)
  }
}

/// Bind a UDP socket on `addr` and serve requests forever.
pub fn listen_and_serve<A: ToSocketAddrs>(addr: A,
                                          handler: impl Handler + 'static)
                                          -> Result<(), Error> {
  let socket = UdpSocket::bind(addr)?;
  serve(socket, handler)
}

/// Process datagrams arriving on `socket` forever.
///
/// Transient read errors (timeouts and the like) back off 5ms and
/// retry; any other read error is logged and the loop keeps going.
/// Everything that can go wrong with a single packet, from a
/// malformed datagram to a panicking handler, is likewise logged and
/// dropped without disturbing the loop.
pub fn serve(socket: UdpSocket, handler: impl Handler + 'static) -> Result<(), Error> {
  let socket = Arc::new(socket);
  let handler = Arc::new(handler);
  let mut buf = [0u8; MAX_PACKET_LEN];

  loop {
    match socket.recv_from(&mut buf) {
      | Ok((n, peer)) => {
        // the read buffer is reused immediately, each task owns a copy
        let dgram = buf[..n].to_vec();
        let socket = Arc::clone(&socket);
        let handler = Arc::clone(&handler);

        thread::spawn(move || handle_packet(&socket, &dgram, peer, handler.as_ref()));
      },
      | Err(e) if transient(&e) => thread::sleep(Duration::from_millis(5)),
      | Err(e) => trace::error(format_args!("recv failed: {e}")),
    }
  }
}

fn transient(e: &io::Error) -> bool {
  matches!(e.kind(),
           io::ErrorKind::WouldBlock
           | io::ErrorKind::TimedOut
           | io::ErrorKind::Interrupted
           | io::ErrorKind::ConnectionRefused
           | io::ErrorKind::ConnectionReset)
}

fn is_probe(dgram: &[u8]) -> bool {
  trace::health_monitor_enabled() && dgram == PROBE_REQUEST
}

fn handle_packet(socket: &UdpSocket, dgram: &[u8], peer: SocketAddr, handler: &dyn Handler) {
  let probe = is_probe(dgram);

  // probe traffic is frequent and boring, keep it out of the traces
  if trace::debug_enabled() && !probe {
    trace::info(format_args!("recvd {}b <- {}: {:02X?}", dgram.len(), peer, dgram));
  }

  if probe {
    if let Err(e) = socket.send_to(PROBE_REPLY, peer) {
      trace::error(format_args!("probe reply -> {peer} failed: {e}"));
    }
    return;
  }

  let req = match Message::try_from_bytes(dgram) {
    | Ok(req) => req,
    | Err(e) => {
      trace::error(format_args!("dropping undecodable datagram <- {peer}: {e:?}"));
      return;
    },
  };

  let handled = panic::catch_unwind(AssertUnwindSafe(|| {
                  handler.serve(socket, peer, &req)
                         .map(|rep| transmit(socket, Some(peer), rep))
                }));

  match handled {
    | Ok(Some(Err(e))) => trace::error(format_args!("reply -> {peer} failed: {e:?}")),
    | Ok(_) => {},
    | Err(_) => trace::error(format_args!("handler panicked on packet <- {peer}")),
  }
}

/// Serialize `msg` and send it to `peer`, or to the socket's
/// connected destination when `peer` is `None`.
pub fn transmit(socket: &UdpSocket, peer: Option<SocketAddr>, msg: Message) -> Result<(), Error> {
  let bytes = msg.try_into_bytes()?;

  match peer {
    | Some(peer) => socket.send_to(&bytes, peer)?,
    | None => socket.send(&bytes)?,
  };

  Ok(())
}

/// Read one datagram off `socket` and parse it, waiting at most the
/// configured response timeout (see [`set_response_timeout`]).
pub fn receive(socket: &UdpSocket, buf: &mut [u8]) -> Result<Message, Error> {
  socket.set_read_timeout(Some(response_timeout()))?;

  let (n, _) = socket.recv_from(buf)?;
  Ok(Message::try_from_bytes(&buf[..n])?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn transient_errors() {
    assert!(transient(&io::Error::from(io::ErrorKind::WouldBlock)));
    assert!(transient(&io::Error::from(io::ErrorKind::TimedOut)));
    assert!(!transient(&io::Error::from(io::ErrorKind::PermissionDenied)));
  }

  #[test]
  fn probe_needs_exact_bytes() {
    trace::set_health_monitor(true);
    assert!(is_probe(b"RUOK"));
    assert!(!is_probe(b"RUOK?"));
    assert!(!is_probe(b"RUO"));
  }
}
