use std::net::UdpSocket;

use natter::msg::*;

pub fn main() {
  simple_logger::init_with_level(log::Level::Info).unwrap();

  let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
  socket.connect("127.0.0.1:5683").unwrap();

  let mut req = Message::new(Type::Con, code::GET, Id(0x1234));
  req.token = Token::from_slice(&[0x2a]).unwrap();
  req.set_path_string("/hello");

  natter::transmit(&socket, None, req).unwrap();

  let mut buf = [0u8; natter::MAX_PACKET_LEN];
  match natter::receive(&socket, &mut buf) {
    | Ok(rep) => {
      log::info!("{} {}: {}",
                 rep.ty,
                 rep.code,
                 String::from_utf8_lossy(&rep.payload.0));
    },
    | Err(e) => log::error!("no response: {e:?}"),
  }
}
