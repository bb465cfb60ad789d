use rand::distributions::Alphanumeric;
use rand::Rng;

/// Produces values for boundary-length field checks.
pub trait RandomStringGenerator: Send + Sync {
    /// A string of exactly `length` characters, independent across calls.
    fn generate(&self, length: usize) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlphanumericGenerator;

impl RandomStringGenerator for AlphanumericGenerator {
    fn generate(&self, length: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generates_exact_length(length in 0usize..600) {
            let value = AlphanumericGenerator.generate(length);
            prop_assert_eq!(value.chars().count(), length);
            prop_assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn calls_are_independent() {
        let first = AlphanumericGenerator.generate(64);
        let second = AlphanumericGenerator.generate(64);
        assert_ne!(first, second);
    }
}
