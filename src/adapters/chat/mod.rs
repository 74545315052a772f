//! Chat provider adapters.
//!
//! - `chat_engine` - ChatEngine REST client
//! - `mock` - In-process provider for tests

mod chat_engine;
mod mock;

pub use chat_engine::{ChatEngineConfig, ChatEngineProvider};
pub use mock::MockChatProvider;
