// ABOUTME: Minimal TCP server that answers every connection with fixed bytes
// ABOUTME: Lets tests send responses that are not valid HTTP or are cut short
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Server replying with the same bytes to every connection, then closing it
pub struct RawHttpServer {
    base_url: String,
    connections: Arc<AtomicUsize>,
}

impl RawHttpServer {
    pub fn start(reply: &'static [u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&connections);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);
                // Read the whole request head first so closing sends FIN, not RST
                read_request_head(&mut stream);
                let _ = stream.write_all(reply);
                let _ = stream.flush();
                let _ = stream.shutdown(Shutdown::Write);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            connections,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

fn read_request_head(stream: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0_u8; 1024];
    loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|window| window == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

/// Base URL of a local port with nothing listening on it
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
