#![allow(dead_code)]

pub mod test_server {
    use clirest::{AppService, HttpServer, ServerHandle};
    use std::net::{SocketAddr, TcpListener};

    /// Start `service` on an ephemeral local port and wait until it accepts.
    pub fn start(service: AppService) -> (ServerHandle, SocketAddr) {
        may::config().set_stack_size(0x10000);
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let handle = HttpServer(service).start(addr).unwrap();
        handle.wait_ready().unwrap();
        (handle, addr)
    }
}

pub mod http {
    use std::collections::HashMap;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// A parsed HTTP/1.1 response.
    #[derive(Debug)]
    pub struct TestResponse {
        pub status: u16,
        pub headers: HashMap<String, String>,
        pub body: String,
    }

    impl TestResponse {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .get(&name.to_ascii_lowercase())
                .map(String::as_str)
        }

        pub fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap_or_default()
        }
    }

    fn content_length(raw: &[u8]) -> Option<(usize, usize)> {
        let text = String::from_utf8_lossy(raw);
        let head_end = text.find("\r\n\r\n")? + 4;
        let len = text[..head_end]
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.trim().parse().ok())
            .unwrap_or(0);
        Some((head_end, len))
    }

    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(500)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            if let Some((head, len)) = content_length(&buf) {
                if buf.len() >= head + len {
                    break;
                }
            }
            let mut tmp = [0u8; 4096];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    pub fn parse_response(resp: &str) -> TestResponse {
        let (head, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut lines = head.lines();
        let status = lines
            .next()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let headers = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect();
        TestResponse {
            status,
            headers,
            body: body.to_string(),
        }
    }

    /// `GET target` and parse the reply.
    pub fn get(addr: &SocketAddr, target: &str) -> TestResponse {
        request(addr, "GET", target)
    }

    pub fn request(addr: &SocketAddr, method: &str, target: &str) -> TestResponse {
        parse_response(&send_request(
            addr,
            &format!("{method} {target} HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n"),
        ))
    }
}
