#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use amara::{Client, ClientBuilder, LogLevel, Logger};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const USER: &str = "alice";
pub const KEY: &str = "0123456789abcdef0123456789abcdef01234567";

pub fn host(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

pub fn builder(server: &MockServer) -> ClientBuilder {
    ClientBuilder::new()
        .host(host(server))
        .username(USER)
        .api_key(KEY)
        .retry_backoff(Duration::ZERO)
        .timeout(Duration::from_secs(5))
}

pub fn client(server: &MockServer) -> Client {
    builder(server).build().expect("client")
}

/// A list envelope the way the API shapes it.
pub fn page(objects: Value, offset: u64, total: u64, next: Option<&str>) -> Value {
    json!({
        "meta": {
            "offset": offset,
            "total_count": total,
            "next": next,
            "previous": null,
        },
        "objects": objects,
    })
}

#[derive(Default)]
pub struct Recorder(pub Mutex<Vec<(LogLevel, String)>>);

impl Recorder {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn levels(&self) -> Vec<LogLevel> {
        self.0.lock().unwrap().iter().map(|(l, _)| *l).collect()
    }
}

impl Logger for Recorder {
    fn log(&self, level: LogLevel, message: &str) {
        self.0.lock().unwrap().push((level, message.to_string()));
    }
}
