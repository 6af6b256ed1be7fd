//! `stockpile-infra` — collaborator implementations for tests/dev.
//!
//! In-memory Product Store and Movement Log, explicit seed data, and the
//! full-stack integration tests (including the concurrent-deduction race).

pub mod movement_log;
pub mod product_store;
pub mod seed;

pub use movement_log::InMemoryMovementLog;
pub use product_store::InMemoryProductStore;
pub use seed::SeedData;
