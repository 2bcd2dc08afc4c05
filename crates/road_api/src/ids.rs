//! String identifiers for every element of a road geometry.
//!
//! Ids are plain value types: cheap to clone, totally ordered, and hashable,
//! so they work as map keys when walking a network.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! road_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

road_id!(
    /// Identifies a whole road geometry (one network).
    RoadGeometryId
);
road_id!(
    /// Identifies a junction within a road geometry.
    JunctionId
);
road_id!(
    /// Identifies a segment within a junction.
    SegmentId
);
road_id!(
    /// Identifies a lane. Unique across the whole road geometry.
    LaneId
);
road_id!(
    /// Identifies a branch point where lane ends meet.
    BranchPointId
);
