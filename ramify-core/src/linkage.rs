//! Linkage strategies for agglomerative clustering.
//!
//! A linkage strategy answers one question during a merge: given the previous
//! distances of the two merging clusters to some third, still-active cluster,
//! what is the merged cluster's distance to that third cluster? Strategies
//! are stateless and side-effect free.

use std::str::FromStr;

use crate::error::{ClusterError, Result};

/// Rule for recomputing inter-cluster distances after a merge.
///
/// # Examples
/// ```
/// use ramify_core::Linkage;
///
/// let linkage = Linkage::from_name("Average")?;
/// assert_eq!(linkage, Linkage::Average);
/// assert_eq!(linkage.to_string(), "Average");
/// # Ok::<(), ramify_core::ClusterError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Linkage {
    /// Leaf-count-weighted mean of the two previous distances (UPGMA).
    Average,
    /// Maximum of the two previous distances (furthest neighbour).
    Complete,
    /// Minimum of the two previous distances (nearest neighbour).
    Single,
}

impl Linkage {
    /// Resolves a linkage from its canonical name.
    ///
    /// # Errors
    /// Returns [`ClusterError::UnknownLinkage`] for any name other than
    /// `Average`, `Complete`, or `Single`.
    ///
    /// # Examples
    /// ```
    /// use ramify_core::{ClusterError, Linkage};
    ///
    /// assert_eq!(Linkage::from_name("Single")?, Linkage::Single);
    /// let err = Linkage::from_name("Ward").expect_err("Ward is not supported");
    /// assert!(matches!(err, ClusterError::UnknownLinkage { .. }));
    /// # Ok::<(), ramify_core::ClusterError>(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "Average" => Ok(Self::Average),
            "Complete" => Ok(Self::Complete),
            "Single" => Ok(Self::Single),
            _ => Err(ClusterError::UnknownLinkage {
                name: name.to_owned(),
            }),
        }
    }

    /// Returns the canonical name for the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Average => "Average",
            Self::Complete => "Complete",
            Self::Single => "Single",
        }
    }

    /// Computes the merged cluster's distance to a third cluster.
    ///
    /// `to_kept` and `to_retired` are the previous distances from the kept
    /// and retired clusters to the third cluster; `kept_leaves` and
    /// `retired_leaves` are their leaf counts at the moment of the merge.
    #[must_use]
    pub fn merged_distance(
        self,
        to_kept: f64,
        to_retired: f64,
        kept_leaves: usize,
        retired_leaves: usize,
    ) -> f64 {
        match self {
            Self::Average => {
                let kept_weight = kept_leaves as f64;
                let retired_weight = retired_leaves as f64;
                (to_kept * kept_weight + to_retired * retired_weight)
                    / (kept_weight + retired_weight)
            }
            Self::Complete => to_kept.max(to_retired),
            Self::Single => to_kept.min(to_retired),
        }
    }
}

impl FromStr for Linkage {
    type Err = ClusterError;

    fn from_str(name: &str) -> Result<Self> {
        Self::from_name(name)
    }
}

impl core::fmt::Display for Linkage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Linkage::Average, 2.0, 4.0, 1, 1, 3.0)]
    #[case(Linkage::Average, 2.0, 5.0, 2, 1, 3.0)]
    #[case(Linkage::Average, 1.0, 9.0, 3, 1, 3.0)]
    #[case(Linkage::Complete, 2.0, 4.0, 1, 3, 4.0)]
    #[case(Linkage::Complete, 4.0, 2.0, 1, 3, 4.0)]
    #[case(Linkage::Single, 2.0, 4.0, 1, 3, 2.0)]
    #[case(Linkage::Single, 4.0, 2.0, 1, 3, 2.0)]
    fn merged_distance_follows_the_strategy(
        #[case] linkage: Linkage,
        #[case] to_kept: f64,
        #[case] to_retired: f64,
        #[case] kept_leaves: usize,
        #[case] retired_leaves: usize,
        #[case] expected: f64,
    ) {
        let merged = linkage.merged_distance(to_kept, to_retired, kept_leaves, retired_leaves);
        assert!(
            (merged - expected).abs() < 1e-12,
            "{linkage}: got {merged}, expected {expected}"
        );
    }

    #[rstest]
    #[case("Average", Linkage::Average)]
    #[case("Complete", Linkage::Complete)]
    #[case("Single", Linkage::Single)]
    fn names_round_trip(#[case] name: &str, #[case] expected: Linkage) {
        let parsed: Linkage = name.parse().expect("canonical names must parse");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.name(), name);
    }

    #[rstest]
    #[case("average")]
    #[case("WARD")]
    #[case("")]
    fn rejects_unknown_names(#[case] name: &str) {
        let err = Linkage::from_name(name).expect_err("non-canonical names must fail");
        assert!(matches!(err, ClusterError::UnknownLinkage { .. }));
    }
}
