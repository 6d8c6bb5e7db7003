//! RON storage format for annotation graphs.
//!
//! Every container in [`AnnotationGraph`] is an ordered `Vec`, so the same
//! construction sequence always serializes to the same string.

use super::AnnotationGraph;

impl AnnotationGraph {
    /// Serialize to a RON string.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(6)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config)
    }

    /// Deserialize from a RON string.
    pub fn from_ron_string(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}
