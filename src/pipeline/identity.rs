//! Identifier and time sources for task assembly
//!
//! Time comes from [`mockable::Clock`]; production code uses
//! [`DefaultClock`] and tests pin the instant with [`FixedClock`].

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::{DateTime, Local, Utc};
pub use mockable::{Clock, DefaultClock};
use uuid::Uuid;

/// A clock shared between cloned services
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Produces fresh opaque identifiers
pub trait IdGenerator: Send + Sync {
    /// Return an identifier not handed out before
    fn generate(&self) -> String;
}

/// Time-ordered UUIDv7 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn generate(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic `<prefix>-1`, `<prefix>-2`, ... identifiers
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start counting from 1 under `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
