use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use natter::msg::*;
use natter::{receive, serve, transmit, Error};

fn start_server(handler: impl natter::Handler + 'static) -> SocketAddr {
  let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
  let addr = socket.local_addr().unwrap();
  thread::spawn(move || serve(socket, handler));
  addr
}

fn client() -> UdpSocket {
  let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
  socket.set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
  socket
}

fn echo_path(_: &UdpSocket, _: SocketAddr, req: &Message) -> Option<Message> {
  if req.path_string() == "boom" {
    panic!("kaboom");
  }

  let mut rep = Message::new(Type::Ack, code::CONTENT, req.id);
  rep.token = req.token;
  rep.opts.set(CONTENT_FORMAT, ContentFormat::Text);
  rep.payload = Payload(req.path_string().into_bytes());
  Some(rep)
}

#[test]
fn request_response_end_to_end() {
  let addr = start_server(echo_path);
  let sock = client();

  let mut req = Message::new(Type::Con, code::GET, Id(0x1234));
  req.token = Token::from_slice(&[0x2a]).unwrap();
  req.set_path_string("/.well-known/core");
  transmit(&sock, Some(addr), req).unwrap();

  let mut buf = [0u8; 1500];
  let rep = receive(&sock, &mut buf).unwrap();

  assert_eq!(rep.ty, Type::Ack);
  assert_eq!(rep.code, code::CONTENT);
  assert_eq!(rep.id, Id(0x1234));
  assert_eq!(rep.token, Token::from_slice(&[0x2a]).unwrap());
  assert_eq!(rep.payload, Payload(b".well-known/core".to_vec()));
}

#[test]
fn liveness_probe_never_reaches_handler() {
  natter::trace::set_health_monitor(true);

  let handled = Arc::new(AtomicBool::new(false));
  let flag = Arc::clone(&handled);
  let addr = start_server(move |_: &UdpSocket, _: SocketAddr, req: &Message| {
               flag.store(true, Ordering::SeqCst);
               let mut rep = Message::new(Type::Ack, code::VENDOR_OK, req.id);
               rep.token = req.token;
               Some(rep)
             });

  let sock = client();
  sock.send_to(b"RUOK", addr).unwrap();

  let mut buf = [0u8; 16];
  let (n, _) = sock.recv_from(&mut buf).unwrap();
  assert_eq!(&buf[..n], b"IMOK");
  assert!(!handled.load(Ordering::SeqCst));

  // a real message still gets through to the handler
  transmit(&sock, Some(addr), Message::new(Type::Con, code::GET, Id(1))).unwrap();
  let mut buf = [0u8; 1500];
  let rep = receive(&sock, &mut buf).unwrap();
  assert_eq!(rep.code, code::VENDOR_OK);
  assert!(handled.load(Ordering::SeqCst));
}

#[test]
fn malformed_datagrams_do_not_stop_the_loop() {
  let addr = start_server(echo_path);
  let sock = client();

  // version 0, then a short packet
  sock.send_to(&[0x00, 0x01, 0x00, 0x01], addr).unwrap();
  sock.send_to(&[0x40], addr).unwrap();

  let mut req = Message::new(Type::Con, code::GET, Id(2));
  req.set_path_string("/still/alive");
  transmit(&sock, Some(addr), req).unwrap();

  let mut buf = [0u8; 1500];
  let rep = receive(&sock, &mut buf).unwrap();
  assert_eq!(rep.payload, Payload(b"still/alive".to_vec()));
}

#[test]
fn panicking_handler_is_isolated() {
  let addr = start_server(echo_path);
  let sock = client();

  let mut req = Message::new(Type::Con, code::GET, Id(3));
  req.set_path_string("/boom");
  transmit(&sock, Some(addr), req).unwrap();

  let mut req = Message::new(Type::Con, code::GET, Id(4));
  req.set_path_string("/after");
  transmit(&sock, Some(addr), req).unwrap();

  let mut buf = [0u8; 1500];
  let rep = receive(&sock, &mut buf).unwrap();
  assert_eq!(rep.id, Id(4));
  assert_eq!(rep.payload, Payload(b"after".to_vec()));
}

#[test]
fn receive_reports_undecodable_replies() {
  let a = client();
  let b = client();

  b.send_to(b"not a coap message, sorry", a.local_addr().unwrap())
   .unwrap();

  let mut buf = [0u8; 1500];
  match receive(&a, &mut buf) {
    | Err(Error::FromBytes(_)) => {},
    | other => panic!("expected parse error, got {other:?}"),
  }
}

#[test]
fn connected_socket_transmit() {
  let addr = start_server(echo_path);
  let sock = client();
  sock.connect(addr).unwrap();

  let mut req = Message::new(Type::Non, code::GET, Id(5));
  req.set_path_string("/connected");
  transmit(&sock, None, req).unwrap();

  let mut buf = [0u8; 1500];
  let rep = receive(&sock, &mut buf).unwrap();
  assert_eq!(rep.payload, Payload(b"connected".to_vec()));
}
