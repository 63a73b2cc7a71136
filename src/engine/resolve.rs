use serde::{Deserialize, Serialize};

/// How the separation between the top two candidates is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Absolute difference between the two percentage shares, in points.
    SharePoints,
    /// Difference between the two aggregates as a fraction of the top one.
    Relative,
}

impl GapPolicy {
    pub fn default_thresholds(self) -> Thresholds {
        match self {
            Self::SharePoints => Thresholds {
                low: 10.0,
                high: 20.0,
            },
            Self::Relative => Thresholds {
                low: 0.10,
                high: 0.20,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SharePoints => "share_points",
            Self::Relative => "relative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    pub gap: GapPolicy,
    pub thresholds: Thresholds,
}

impl ResolutionPolicy {
    pub fn new(gap: GapPolicy) -> Self {
        Self {
            gap,
            thresholds: gap.default_thresholds(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Moderate,
    Low,
}

impl Confidence {
    /// Boundaries are strict: a gap equal to `low` is moderate, equal to `high` is high.
    pub fn from_gap(gap: f64, thresholds: &Thresholds) -> Self {
        if gap < thresholds.low {
            Self::Low
        } else if gap < thresholds.high {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High confidence",
            Self::Moderate => "Moderate confidence",
            Self::Low => "Low confidence - requires further analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Index into the aggregates of the recommended candidate.
    pub winner: Option<usize>,
    pub confidence: Confidence,
    /// Measured separation; `None` when there was nothing to compare.
    pub gap: Option<f64>,
}

/// Percentage share of each aggregate. An all-zero set splits evenly.
pub fn percentages(totals: &[f64]) -> Vec<f64> {
    let sum: f64 = totals.iter().sum();
    if sum <= 0.0 {
        let even = 100.0 / totals.len().max(1) as f64;
        return vec![even; totals.len()];
    }
    totals.iter().map(|total| total * 100.0 / sum).collect()
}

/// Rounds away accumulated float error so exact boundaries stay exact.
fn snap(gap: f64) -> f64 {
    (gap * GAP_PRECISION).round() / GAP_PRECISION
}

const GAP_PRECISION: f64 = 1e9;

/// Candidate indices ordered by aggregate, highest first. Ties keep input order.
pub fn rank(totals: &[f64]) -> Vec<usize> {
    let mut order = (0..totals.len()).collect::<Vec<_>>();
    order.sort_by(|a, b| totals[*b].total_cmp(&totals[*a]));
    order
}

pub fn resolve(totals: &[f64], policy: &ResolutionPolicy) -> Resolution {
    let undecided = Resolution {
        winner: None,
        confidence: Confidence::Low,
        gap: None,
    };

    let order = rank(totals);
    let (top, second) = match order.as_slice() {
        [] => return undecided,
        [only] => {
            return Resolution {
                winner: Some(*only),
                confidence: Confidence::High,
                gap: None,
            }
        }
        [top, second, ..] => (*top, *second),
    };

    let gap = match policy.gap {
        GapPolicy::SharePoints => {
            let shares = percentages(totals);
            (shares[top] - shares[second]).abs()
        }
        GapPolicy::Relative => {
            if totals[top] == 0.0 {
                return undecided;
            }
            (totals[top] - totals[second]).abs() / totals[top]
        }
    };
    let gap = snap(gap);

    let confidence = Confidence::from_gap(gap, &policy.thresholds);
    Resolution {
        winner: (confidence != Confidence::Low).then_some(top),
        confidence,
        gap: Some(gap),
    }
}
