//! InMemory Repository 実装
//!
//! プロセス内のメモリのみを使用します。再起動すると全てのデータは失われます。

mod message;
mod presence;

pub use message::InMemoryMessageRepository;
pub use presence::InMemoryPresenceRepository;
