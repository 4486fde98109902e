use chrono::Utc;
use uuid::Uuid;

/// Source of `oauth_nonce` values.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> String;
}

/// Source of `oauth_timestamp` values, in seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> i64;
}

/// Random nonces from UUID v4, hyphens stripped.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidNonce;

impl NonceSource for UuidNonce {
    fn nonce(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Always returns the same nonce. Reproducible signatures for tests and
/// published test vectors.
#[derive(Clone, Debug)]
pub struct FixedNonce(pub String);

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn timestamp(&self) -> i64 {
        self.0
    }
}
