//! Hand-off to the distance-to-history analysis subsystem.
//!
//! The distance computation itself lives outside this crate; a
//! [`DistanceHandle`] only bundles the data source and the binning
//! preferences the collaborator needs.

use crate::history::QueryService;

/// Binning preferences passed along to the distance collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceOptions {
    /// How many weeks of history the comparison looks back over.
    pub weeks: u32,
    /// Whether samples snap to bin boundaries.
    pub snap_to_bin: bool,
    /// Bin width, e.g. `"1h"`.
    pub bin_size: String,
    /// Path for extracting nested values out of dict-valued check results.
    pub dict_extractor_path: String,
}

impl Default for DistanceOptions {
    fn default() -> Self {
        DistanceOptions {
            weeks: 4,
            snap_to_bin: true,
            bin_size: "1h".to_string(),
            dict_extractor_path: String::new(),
        }
    }
}

/// Handle consumed by the distance-analysis subsystem: the query service as
/// data source plus the caller's binning preferences.
pub struct DistanceHandle<'a> {
    source: &'a QueryService,
    options: DistanceOptions,
}

impl<'a> DistanceHandle<'a> {
    pub(crate) fn new(source: &'a QueryService, options: DistanceOptions) -> Self {
        DistanceHandle { source, options }
    }

    pub fn source(&self) -> &QueryService {
        self.source
    }

    pub fn options(&self) -> &DistanceOptions {
        &self.options
    }
}

/// Capability implemented by the distance-analysis subsystem.
pub trait DistanceComputation {
    type Output;

    fn analyze(&self, handle: DistanceHandle<'_>) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_options_match_plugin_defaults() {
        let options = DistanceOptions::default();
        assert_eq!(options.weeks, 4);
        assert!(options.snap_to_bin);
        assert_eq!(options.bin_size, "1h");
        assert_eq!(options.dict_extractor_path, "");
    }
}
