//! Session flags

use crate::storage::KeyValueStore;

/// Session key holding the age-verification flag.
pub const AGE_VERIFIED_KEY: &str = "hsb-age-verified";

/// Exact value marking the session as verified.
pub const AGE_VERIFIED_MARKER: &str = "true";

/// Adults-only gate, backed by a session-scoped store.
#[derive(Debug, Clone)]
pub struct AgeGate<S> {
    store: S,
}

impl<S: KeyValueStore> AgeGate<S> {
    /// Create a gate over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether the visitor has confirmed being of age in this session.
    ///
    /// Anything but the exact marker value counts as unverified.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_verified(&self) -> Result<bool, S::Error> {
        Ok(self.store.get(AGE_VERIFIED_KEY)?.as_deref() == Some(AGE_VERIFIED_MARKER))
    }

    /// Record that the visitor confirmed being of age.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn verify(&self) -> Result<(), S::Error> {
        tracing::debug!("age verified for session");

        self.store.set(AGE_VERIFIED_KEY, AGE_VERIFIED_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStore;

    use super::*;

    #[test]
    fn unverified_until_verify() -> TestResult {
        let gate = AgeGate::new(MemoryStore::new());

        assert!(!gate.is_verified()?);

        gate.verify()?;

        assert!(gate.is_verified()?);

        Ok(())
    }

    #[test]
    fn only_the_exact_marker_counts() -> TestResult {
        let store = MemoryStore::new();
        let gate = AgeGate::new(store.clone());

        for value in ["1", "TRUE", "true ", "yes"] {
            store.set(AGE_VERIFIED_KEY, value)?;
            assert!(!gate.is_verified()?, "{value:?} should not verify");
        }

        Ok(())
    }
}
