//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature. The
//! adapters keep state behind mutexes and panic on poisoning; they are never
//! wired into the binaries.

pub mod clock;
pub mod memory;
pub mod stubs;

pub use clock::MutableClock;
pub use memory::{InMemoryCompletionRepository, InMemoryHabitRepository, InMemoryUserRepository};
pub use stubs::{PlaintextPasswordHasher, StaticIdentityResolver, StubQuoteSource};

use std::sync::{Mutex, MutexGuard};

pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("{name} mutex poisoned"),
    }
}
