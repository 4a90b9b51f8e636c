//! Builder for configuring [`Clusterer`] instances.

use crate::{Result, clusterer::Clusterer, linkage::Linkage};

/// Configures and constructs [`Clusterer`] instances.
///
/// # Examples
/// ```
/// use ramify_core::{ClustererBuilder, Linkage};
///
/// let clusterer = ClustererBuilder::new()
///     .with_linkage(Linkage::Complete)
///     .build();
/// assert_eq!(clusterer.linkage(), Linkage::Complete);
/// ```
#[derive(Debug, Clone)]
pub struct ClustererBuilder {
    linkage: Linkage,
}

impl Default for ClustererBuilder {
    fn default() -> Self {
        Self {
            linkage: Linkage::Average,
        }
    }
}

impl ClustererBuilder {
    /// Creates a builder with the default `Average` linkage.
    ///
    /// # Examples
    /// ```
    /// use ramify_core::{ClustererBuilder, Linkage};
    ///
    /// let builder = ClustererBuilder::new();
    /// assert_eq!(builder.linkage(), Linkage::Average);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the linkage strategy.
    #[must_use]
    pub const fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Overrides the linkage strategy by its canonical name.
    ///
    /// This is the path hosts with a string-keyed configuration surface use.
    ///
    /// # Errors
    /// Returns [`crate::ClusterError::UnknownLinkage`] for any name other
    /// than `Average`, `Complete`, or `Single`.
    ///
    /// # Examples
    /// ```
    /// use ramify_core::{ClustererBuilder, Linkage};
    ///
    /// let builder = ClustererBuilder::new().with_linkage_name("Single")?;
    /// assert_eq!(builder.linkage(), Linkage::Single);
    /// # Ok::<(), ramify_core::ClusterError>(())
    /// ```
    pub fn with_linkage_name(self, name: &str) -> Result<Self> {
        Ok(self.with_linkage(Linkage::from_name(name)?))
    }

    /// Returns the currently configured linkage.
    #[must_use]
    pub const fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Constructs a [`Clusterer`] from this configuration.
    #[must_use]
    pub const fn build(self) -> Clusterer {
        Clusterer::new(self.linkage)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClusterError, Linkage};

    use super::*;

    #[test]
    fn defaults_to_average_linkage() {
        assert_eq!(ClustererBuilder::new().linkage(), Linkage::Average);
    }

    #[test]
    fn name_keyed_configuration_rejects_unknown_linkages() {
        let err = ClustererBuilder::new()
            .with_linkage_name("Centroid")
            .expect_err("Centroid is not supported");
        assert!(matches!(err, ClusterError::UnknownLinkage { .. }));
    }
}
