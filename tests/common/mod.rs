//! Shared harness: a real server on an ephemeral port backed by memory pins.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use rc_bridge::api::build_router;
use rc_bridge::app_state::AppState;
use rc_bridge::domain::{PinLevel, PinWrite};
use rc_bridge::gpio::MemoryPins;
use rc_bridge::service::Actuator;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const PROTOCOL: &str = "rc-control-protocol";

pub struct TestServer {
    pub addr: SocketAddr,
    pub pins: MemoryPins,
    pub shutdown: watch::Sender<bool>,
    pub server: JoinHandle<()>,
}

impl TestServer {
    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{path}", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

pub async fn spawn_server() -> TestServer {
    let pins = MemoryPins::new();
    let (actuator, _task) = Actuator::spawn(Box::new(pins.clone()), 16);
    let (state, shutdown) = AppState::new(actuator, PROTOCOL);
    let app = build_router(state);

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer {
        addr,
        pins,
        shutdown,
        server,
    }
}

/// Polls until the pins show `expected`, or gives up after two seconds.
pub async fn wait_for_levels(pins: &MemoryPins, expected: [PinLevel; 4]) -> bool {
    wait_until(|| pins.levels() == expected).await
}

/// Polls until `pins` has recorded at least `count` writes.
pub async fn wait_for_history(pins: &MemoryPins, count: usize) -> Vec<PinWrite> {
    wait_until(|| pins.history().len() >= count).await;
    pins.history()
}

async fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if done() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    done()
}
