//! Redis store tests
//!
//! Server-backed tests run only when `OSDK_TEST_REDIS_URL` names a reachable
//! server as `host:port` or `redis://host:port`.

use osdk_domain::error::Error;
use osdk_domain::ports::providers::{MemberSwap, RemoteStore, ScoreBound};
use osdk_domain::value_objects::CacheConfig;
use osdk_providers::remote::RedisStore;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn test_config() -> Option<CacheConfig> {
    let address = std::env::var("OSDK_TEST_REDIS_URL").ok()?;
    let address = address.trim_start_matches("redis://");
    let (host, port) = address.rsplit_once(':')?;
    Some(CacheConfig::new("TestRedis", "redis").with_address(host, port.parse().ok()?))
}

fn unique_key(name: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("osdk-test:{name}:{nanos}")
}

/// Pops one complete RESP array command off the front of `buf`
fn take_command(buf: &mut Vec<u8>) -> Option<Vec<String>> {
    fn line(buf: &[u8], from: usize) -> Option<(&[u8], usize)> {
        let end = buf[from..].windows(2).position(|w| w == b"\r\n")? + from;
        Some((&buf[from..end], end + 2))
    }

    let (header, mut pos) = line(buf, 0)?;
    let count: usize = std::str::from_utf8(header.strip_prefix(b"*")?)
        .ok()?
        .parse()
        .ok()?;
    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        let (len, next) = line(buf, pos)?;
        let len: usize = std::str::from_utf8(len.strip_prefix(b"$")?)
            .ok()?
            .parse()
            .ok()?;
        if buf.len() < next + len + 2 {
            return None;
        }
        args.push(String::from_utf8_lossy(&buf[next..next + len]).into_owned());
        pos = next + len + 2;
    }
    buf.drain(..pos);
    Some(args)
}

async fn serve_connection(mut socket: TcpStream, get_reply: Option<&'static [u8]>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let Ok(read) = socket.read(&mut chunk).await else {
            return;
        };
        if read == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..read]);
        while let Some(command) = take_command(&mut buf) {
            let reply: &[u8] = match command.first().map(|c| c.to_ascii_uppercase()).as_deref() {
                Some("PING") => b"+PONG\r\n",
                Some("GET") => match get_reply {
                    Some(reply) => reply,
                    None => continue,
                },
                _ => b"+OK\r\n",
            };
            if socket.write_all(reply).await.is_err() {
                return;
            }
        }
    }
}

/// Local server that completes the handshake and PING, then answers GET
/// with `get_reply`, or never when it is `None`
async fn scripted_server(get_reply: Option<&'static [u8]>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(serve_connection(socket, get_reply));
        }
    });
    addr
}

async fn connect_scripted(get_reply: Option<&'static [u8]>) -> RedisStore {
    let addr = scripted_server(get_reply).await;
    let config = CacheConfig::new("Scripted", "redis")
        .with_address("127.0.0.1", addr.port())
        .with_timeout(Duration::from_secs(2));
    RedisStore::connect(&config).await.unwrap()
}

#[tokio::test]
async fn test_unanswered_command_is_timeout() {
    let store = connect_scripted(None)
        .await
        .with_timeout(Duration::from_millis(100));
    assert_eq!(store.timeout(), Duration::from_millis(100));

    let err = store.get("silent").await.unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {err}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_non_utf8_value_is_decode_error() {
    let store = connect_scripted(Some(b"$2\r\n\xff\xfe\r\n")).await;

    let err = store.get("binary").await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn test_unreachable_server_is_backend_unavailable() {
    // Port 1 is reserved and never runs Redis
    let config = CacheConfig::new("Nowhere", "redis")
        .with_address("127.0.0.1", 1)
        .with_timeout(Duration::from_millis(500));

    let err = RedisStore::connect(&config).await.unwrap_err();
    assert!(
        matches!(err, Error::BackendUnavailable { .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_string_roundtrip_with_expiry() {
    let Some(config) = test_config() else {
        return;
    };
    let store = RedisStore::connect(&config).await.unwrap();
    let key = unique_key("string");

    store
        .set(&key, "v", Some(Duration::from_millis(200)))
        .await
        .unwrap();
    assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("v"));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(store.get(&key).await.unwrap(), None);
}

#[tokio::test]
async fn test_sorted_set_operations() {
    let Some(config) = test_config() else {
        return;
    };
    let store = RedisStore::connect(&config).await.unwrap();
    let key = unique_key("zset");

    store.zadd(&key, "a", 10.0).await.unwrap();
    store.zadd(&key, "c", 30.0).await.unwrap();
    store.zadd(&key, "b", 20.0).await.unwrap();

    let upto = store
        .zrange_by_score(&key, ScoreBound::NegInfinity, ScoreBound::at(25))
        .await
        .unwrap();
    assert_eq!(upto, vec!["a", "b"]);

    let applied = store
        .zswap(
            &key,
            &[MemberSwap::new("a", "a2", 10.0), MemberSwap::new("gone", "gone2", 5.0)],
        )
        .await
        .unwrap();
    assert_eq!(applied, 1);
    let all = store
        .zrange_by_score(&key, ScoreBound::NegInfinity, ScoreBound::PosInfinity)
        .await
        .unwrap();
    assert_eq!(all, vec!["a2", "b", "c"]);

    let removed = store
        .zrem_range_by_score(&key, ScoreBound::NegInfinity, ScoreBound::PosInfinity)
        .await
        .unwrap();
    assert_eq!(removed, 3);
    assert!(!store.exists(&key).await.unwrap());
}
