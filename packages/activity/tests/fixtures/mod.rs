//! In-process activity service for tests.

use std::sync::Arc;

use kibun_activity::{build_router, store::ActivityStore};
use tokio::{net::TcpListener, task::JoinHandle};

/// Activity service bound to an ephemeral port; stopped on drop.
pub struct TestServer {
    port: u16,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().expect("local addr").port();

        let handle = tokio::spawn(async move {
            axum::serve(listener, build_router(Arc::new(ActivityStore::new())))
                .await
                .expect("Test server crashed");
        });

        Self { port, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
