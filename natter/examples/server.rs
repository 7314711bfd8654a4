use std::net::{SocketAddr, UdpSocket};

use natter::msg::*;

fn handle(_socket: &UdpSocket, peer: SocketAddr, req: &Message) -> Option<Message> {
  log::info!("{} {} /{} <- {}", req.ty, req.code, req.path_string(), peer);

  let mut rep = Message::new(Type::Ack, code::CONTENT, req.id);
  rep.token = req.token;

  match req.path_string().as_str() {
    | "hello" => {
      rep.opts.set(CONTENT_FORMAT, ContentFormat::Json);
      rep.payload = Payload(br#"{"hello": "world"}"#.to_vec());
    },
    | _ => {
      rep.code = code::NOT_FOUND;
    },
  }

  Some(rep)
}

pub fn main() {
  simple_logger::init_with_level(log::Level::Info).unwrap();

  natter::trace::set_debug(true);
  natter::trace::set_health_monitor(true);

  log::info!("listening on 0.0.0.0:5683");
  natter::listen_and_serve("0.0.0.0:5683", handle).unwrap();
}
