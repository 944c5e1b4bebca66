use serde::{Deserialize, Serialize};

/// Display banding of the EPEF score. The thresholds are fixed business
/// constants of the broiler industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceBand {
    Excellent,
    VeryGood,
    Good,
    NeedsImprovement,
}

impl PerformanceBand {
    pub fn from_epef(epef: i64) -> Self {
        if epef >= 350 {
            PerformanceBand::Excellent
        } else if epef >= 300 {
            PerformanceBand::VeryGood
        } else if epef >= 250 {
            PerformanceBand::Good
        } else {
            PerformanceBand::NeedsImprovement
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(PerformanceBand::from_epef(350), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_epef(349), PerformanceBand::VeryGood);
        assert_eq!(PerformanceBand::from_epef(300), PerformanceBand::VeryGood);
        assert_eq!(PerformanceBand::from_epef(299), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_epef(250), PerformanceBand::Good);
        assert_eq!(
            PerformanceBand::from_epef(249),
            PerformanceBand::NeedsImprovement
        );
        assert_eq!(
            PerformanceBand::from_epef(0),
            PerformanceBand::NeedsImprovement
        );
    }
}
