//! End-to-end requests against a bound server.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use mcpreg_core::prelude::*;

fn registry() -> Registry {
    let store = EntryStore::from_entries(vec![
        Entry::new("a.tool", "1.0.0", "A"),
        Entry::new("b.tool", "1.0.0", "B"),
        Entry::new("b.tool", "1.1.0", "B newer"),
    ])
    .unwrap();
    Registry::new(store, PageLimits::default())
}

/// Send one request and return `(status, body)`.
fn request(addr: SocketAddr, method: &str, target: &str) -> (u16, String) {
    let mut stream = TcpStream::connect_timeout(&addr, Duration::from_secs(5)).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    write!(
        stream,
        "{method} {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    )
    .unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).unwrap();

    let status = raw
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap();
    let body = raw
        .split_once("\r\n\r\n")
        .map(|(_, body)| body.to_string())
        .unwrap_or_default();
    (status, body)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn serves_registry_routes_and_shuts_down() {
    let server = RegistryServer::bind(
        "127.0.0.1:0".parse().unwrap(),
        Router::new(registry()),
        2,
    )
    .unwrap();
    let addr = server.local_addr();
    assert_ne!(addr.port(), 0);

    let shutdown = server.shutdown_handle();
    let running = tokio::spawn(server.run());

    let responses = tokio::task::spawn_blocking(move || {
        vec![
            request(addr, "GET", "/health"),
            request(addr, "GET", "/v0/servers?limit=1"),
            request(addr, "GET", "/v0/servers/b.tool"),
            request(addr, "GET", "/v0/servers/b.tool?version=9.9.9"),
            request(addr, "GET", "/v0/servers?cursor=not-a-cursor!"),
            request(addr, "POST", "/v0/servers"),
        ]
    })
    .await
    .unwrap();

    let (status, body) = &responses[0];
    assert_eq!(*status, 200);
    let health: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["servers_loaded"], 2);

    let (status, body) = &responses[1];
    assert_eq!(*status, 200);
    let page: Page = serde_json::from_str(body).unwrap();
    assert_eq!(page.servers[0].name, "a.tool");
    assert!(page.metadata.next_cursor.is_some());

    let (status, body) = &responses[2];
    assert_eq!(*status, 200);
    let entry: Entry = serde_json::from_str(body).unwrap();
    assert_eq!(entry.version, "1.1.0");

    assert_eq!(responses[3].0, 404);
    assert!(responses[3].1.contains("Version 9.9.9 not found"));
    assert_eq!(responses[4].0, 400);
    assert_eq!(responses[5].0, 405);

    shutdown.shutdown();
    tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("server stops after shutdown")
        .unwrap()
        .unwrap();
}
