use actix_web::HttpRequest;
use std::net::IpAddr;
use std::str::FromStr;
use regex::Regex;
use lazy_static::lazy_static;

// Only used to log who posts comments, the address
// never ends up in the comments file.
pub fn real_ip_addr(req: &HttpRequest) -> Option<IpAddr> {
  req.connection_info()
    .realip_remote_addr()
    .and_then(parse_ip_addr)
}

// Actix gives us the address with or without the port
// part, IPv6 addresses may also come in brackets.
pub fn parse_ip_addr(addr: &str) -> Option<IpAddr> {
  lazy_static! {
    static ref PORT_REGEX: Regex = Regex::new(
      r"^\[?([^\]]+?)\]?(:\d+)?$"
    ).unwrap();
  }
  IpAddr::from_str(addr).ok().or_else(|| {
    PORT_REGEX.captures(addr)
      .and_then(|caps| caps.get(1))
      .and_then(|ip| IpAddr::from_str(ip.as_str()).ok())
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ipv4_with_port() {
    assert_eq!(Some("127.0.0.1".parse().unwrap()), parse_ip_addr("127.0.0.1:8080"));
  }

  #[test]
  fn bare_addresses() {
    assert_eq!(Some("10.1.2.3".parse().unwrap()), parse_ip_addr("10.1.2.3"));
    assert_eq!(Some("::1".parse().unwrap()), parse_ip_addr("::1"));
  }

  #[test]
  fn bracketed_ipv6_with_port() {
    assert_eq!(Some("fe80::1".parse().unwrap()), parse_ip_addr("[fe80::1]:443"));
  }

  #[test]
  fn garbage_is_none() {
    assert_eq!(None, parse_ip_addr("not an address"));
  }
}
