use serde::Deserialize;
use std::ops::{BitOr, BitOrAssign};

/// Error-handling policy for [`crate::ConnectivityChecker::check`].
///
/// Flags combine with `|`. The default is [`Policy::PROBLEM_AS_TRUE`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Policy(u8);

impl Policy {
    /// A clean connect failure returns `Err(Unavailable)` instead of `Ok(false)`.
    pub const EXCEPTION_ON_UNAVAILABILITY: Self = Self(1);
    /// An unexpected problem returns `Err(Problem)` instead of a boolean.
    pub const PROBLEM_AS_EXCEPTION: Self = Self(2);
    /// An unexpected problem returns `Ok(true)` unless `PROBLEM_AS_EXCEPTION` is set.
    pub const PROBLEM_AS_TRUE: Self = Self(4);

    const ALL: u8 = 1 | 2 | 4;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::PROBLEM_AS_TRUE
    }
}

impl BitOr for Policy {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Policy {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Single policy flag as written in `config.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyFlag {
    ExceptionOnUnavailability,
    ProblemAsException,
    ProblemAsTrue,
}

impl From<PolicyFlag> for Policy {
    fn from(flag: PolicyFlag) -> Self {
        match flag {
            PolicyFlag::ExceptionOnUnavailability => Policy::EXCEPTION_ON_UNAVAILABILITY,
            PolicyFlag::ProblemAsException => Policy::PROBLEM_AS_EXCEPTION,
            PolicyFlag::ProblemAsTrue => Policy::PROBLEM_AS_TRUE,
        }
    }
}

impl FromIterator<PolicyFlag> for Policy {
    fn from_iter<I: IntoIterator<Item = PolicyFlag>>(iter: I) -> Self {
        let mut policy = Policy::empty();
        for flag in iter {
            policy |= Policy::from(flag);
        }
        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_problem_as_true_only() {
        let p = Policy::default();
        assert_eq!(p.bits(), 4);
        assert!(p.contains(Policy::PROBLEM_AS_TRUE));
        assert!(!p.contains(Policy::EXCEPTION_ON_UNAVAILABILITY));
        assert!(!p.contains(Policy::PROBLEM_AS_EXCEPTION));
    }

    #[test]
    fn flags_combine_and_truncate() {
        let p = Policy::EXCEPTION_ON_UNAVAILABILITY | Policy::PROBLEM_AS_EXCEPTION;
        assert_eq!(p.bits(), 3);
        assert!(p.contains(Policy::PROBLEM_AS_EXCEPTION));
        assert!(!p.contains(Policy::PROBLEM_AS_TRUE));

        assert_eq!(Policy::from_bits_truncate(0xff).bits(), 7);
        assert_eq!(Policy::from_bits_truncate(8), Policy::empty());
    }

    #[test]
    fn empty_list_of_flags_is_empty_policy() {
        let p: Policy = Vec::<PolicyFlag>::new().into_iter().collect();
        assert_eq!(p, Policy::empty());

        let p: Policy = [PolicyFlag::ProblemAsException, PolicyFlag::ProblemAsTrue]
            .into_iter()
            .collect();
        assert_eq!(p.bits(), 6);
    }
}
