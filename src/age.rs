//! Caller-side generator for the demo age attached to new records. The store
//! only persists whatever string it is handed.

use rand::Rng;

/// Lowest age produced by [`RandomAge`].
pub const MIN_AGE: u32 = 20;
/// Highest age produced by [`RandomAge`].
pub const MAX_AGE: u32 = 50;

/// Supplies the age string for the next created record.
pub trait AgeSource {
    fn next_age(&mut self) -> String;
}

/// Uniform pseudo-random age in `[MIN_AGE, MAX_AGE]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAge;

impl AgeSource for RandomAge {
    fn next_age(&mut self) -> String {
        rand::thread_rng().gen_range(MIN_AGE..=MAX_AGE).to_string()
    }
}

/// Always hands out the same value.
#[derive(Debug, Clone)]
pub struct FixedAge(pub String);

impl AgeSource for FixedAge {
    fn next_age(&mut self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_age_stays_in_range() {
        let mut source = RandomAge;
        for _ in 0..500 {
            let age: u32 = source.next_age().parse().unwrap();
            assert!((MIN_AGE..=MAX_AGE).contains(&age), "age {age} out of range");
        }
    }

    #[test]
    fn fixed_age_repeats() {
        let mut source = FixedAge("30".to_string());
        assert_eq!(source.next_age(), "30");
        assert_eq!(source.next_age(), "30");
    }
}
