//! Common test utilities for satchel-core integration tests

pub mod mock_repos;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use satchel_core::{AuthConfig, AuthService, Clock};
use satchel_security::{PasswordError, PasswordHashing};
use satchel_shared::time::from_unix_seconds;

#[allow(unused_imports)]
pub use mock_repos::{FailingSessionRepository, MockSessionRepository, MockUserRepository};

pub const T0: i64 = 1_700_000_000;

/// Clock that only moves when told to.
pub struct ManualClock {
    now: AtomicI64,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn at(secs: i64) -> Arc<Self> {
        Arc::new(Self {
            now: AtomicI64::new(secs),
        })
    }

    pub fn set(&self, secs: i64) {
        self.now.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        from_unix_seconds(self.secs()).expect("test clock in range")
    }
}

/// Reversible "hash" so tests skip Argon2's cost.
pub struct PlainHasher;

impl PasswordHashing for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}

#[allow(dead_code)]
pub struct Harness {
    pub service: Arc<AuthService>,
    pub users: MockUserRepository,
    pub sessions: MockSessionRepository,
    pub clock: Arc<ManualClock>,
}

#[allow(dead_code)]
pub fn harness(config: AuthConfig) -> Harness {
    let users = MockUserRepository::new();
    let sessions = MockSessionRepository::new();
    let clock = ManualClock::at(T0);
    let service = AuthService::new(Arc::new(users.clone()), Arc::new(sessions.clone()), config)
        .with_hasher(Arc::new(PlainHasher))
        .with_clock(clock.clone());

    Harness {
        service: Arc::new(service),
        users,
        sessions,
        clock,
    }
}
