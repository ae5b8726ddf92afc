pub mod services;
pub mod storage;

pub use services::{ConsoleLogger, MemoryLogger, SystemTimeProvider};
pub use storage::InMemoryQuoteStore;
