//! In-process test server.

use std::{sync::Arc, time::Duration};

use kibun_server::{AppState, build_router, domain::HeuristicAnalyzer, usecase::DelayWindow};
use tokio::{net::TcpListener, task::JoinHandle};

/// Chat server bound to an ephemeral port; stopped on drop.
pub struct TestServer {
    port: u16,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start with a short analysis delay (20-40ms) and the keyword heuristic.
    pub async fn start() -> Self {
        let window = DelayWindow::new(Duration::from_millis(20), Duration::from_millis(40))
            .expect("valid delay window");
        Self::with_window(window).await
    }

    pub async fn with_window(window: DelayWindow) -> Self {
        let state = Arc::new(AppState::new(Arc::new(HeuristicAnalyzer), window));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().expect("local addr").port();

        let handle = tokio::spawn(async move {
            axum::serve(listener, build_router(state))
                .await
                .expect("Test server crashed");
        });

        Self { port, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
