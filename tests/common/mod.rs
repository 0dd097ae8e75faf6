#![allow(dead_code)]

use std::{
    io::{Read, Write},
    net::TcpListener,
    sync::{Arc, Mutex},
    thread,
};

pub fn stock(name: &str, ticker: Option<&str>) -> String {
    let ticker = ticker
        .map(|t| format!(r#"<span class="stock-ticker">{t}</span>"#))
        .unwrap_or_default();
    format!(r#"<div class="stock-name">{name}</div>{ticker}"#)
}

pub fn row(date: &str, who: &str, stock: &str, tx: &str, amount: &str) -> String {
    format!("<tr><td>{date}</td><td>{who}</td><td>{stock}</td><td>{tx}</td><td>{amount}</td></tr>")
}

pub fn page(rows: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><body><table>\
         <thead><tr><th>Date</th><th>Politician</th><th>Stock</th><th>Transaction</th><th>Amount</th></tr></thead>\
         <tbody>{}</tbody></table></body></html>",
        rows.concat()
    )
}

/// Minimal HTTP/1.1 server on a random local port. `respond` maps the
/// request target (path + query) to a status code and body.
pub struct TestServer {
    pub base: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start<F>(respond: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let target = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                seen.lock().unwrap().push(target.clone());

                let (status, body) = respond(&target);
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: text/html; charset=utf-8\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { base, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
