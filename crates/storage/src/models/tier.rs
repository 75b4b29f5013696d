use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rank band derived from a developer's overall average score.
///
/// Bands are closed at the bottom, so a score sitting exactly on a
/// threshold takes the higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Tier {
    SSS,
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Classifies an overall average score into its tier.
    ///
    /// Developers without any review average to 0.0 and land in `D`.
    pub fn from_score(score: f64) -> Self {
        if score >= 9.5 {
            Tier::SSS
        } else if score >= 8.5 {
            Tier::S
        } else if score >= 7.0 {
            Tier::A
        } else if score >= 5.5 {
            Tier::B
        } else if score >= 4.0 {
            Tier::C
        } else {
            Tier::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::SSS => "SSS",
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thresholds_resolve_upward() {
        assert_eq!(Tier::from_score(9.5), Tier::SSS);
        assert_eq!(Tier::from_score(8.5), Tier::S);
        assert_eq!(Tier::from_score(7.0), Tier::A);
        assert_eq!(Tier::from_score(5.5), Tier::B);
        assert_eq!(Tier::from_score(4.0), Tier::C);
    }

    #[test]
    fn scores_between_thresholds() {
        assert_eq!(Tier::from_score(10.0), Tier::SSS);
        assert_eq!(Tier::from_score(9.4999), Tier::S);
        assert_eq!(Tier::from_score(8.0), Tier::A);
        assert_eq!(Tier::from_score(6.0), Tier::B);
        assert_eq!(Tier::from_score(4.5), Tier::C);
        assert_eq!(Tier::from_score(3.9999), Tier::D);
    }

    #[test]
    fn unreviewed_developer_scores_zero_and_lands_in_d() {
        assert_eq!(Tier::from_score(0.0), Tier::D);
    }

    #[test]
    fn serializes_as_bare_name() {
        let json = serde_json::to_string(&Tier::SSS).unwrap();
        assert_eq!(json, "\"SSS\"");
        let json = serde_json::to_string(&Tier::D).unwrap();
        assert_eq!(json, "\"D\"");
    }

    fn rank(tier: Tier) -> u8 {
        match tier {
            Tier::D => 0,
            Tier::C => 1,
            Tier::B => 2,
            Tier::A => 3,
            Tier::S => 4,
            Tier::SSS => 5,
        }
    }

    proptest! {
        #[test]
        fn classification_is_monotonic(a in 0.0f64..=10.0, b in 0.0f64..=10.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(Tier::from_score(lo)) <= rank(Tier::from_score(hi)));
        }

        #[test]
        fn every_score_gets_a_tier(score in 0.0f64..=10.0) {
            // Exercises the full chain without panicking.
            let _ = Tier::from_score(score);
        }
    }
}
