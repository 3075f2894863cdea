//! Enumeration types for the Quakemap earthquake map.
//!
//! The depth palette, the negative-radius policy, and the legend corner.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Depth buckets
// ---------------------------------------------------------------------------

/// One of the six fixed depth ranges used to color earthquake markers.
///
/// Variants are declared shallowest first, so the derived [`Ord`] follows
/// increasing depth. Each bucket is a `(lower bound exclusive, color)` pair.
/// The shallowest bucket is unbounded below and the deepest is unbounded
/// above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DepthBucket {
    /// Depth of 10 km or less, including above-sea-level events.
    Surface,
    /// Deeper than 10 km.
    Shallow,
    /// Deeper than 30 km.
    Intermediate,
    /// Deeper than 50 km.
    Deep,
    /// Deeper than 70 km.
    VeryDeep,
    /// Deeper than 90 km.
    Deepest,
}

impl DepthBucket {
    /// Every bucket, shallowest first. Legend order.
    pub const ALL: [Self; 6] = [
        Self::Surface,
        Self::Shallow,
        Self::Intermediate,
        Self::Deep,
        Self::VeryDeep,
        Self::Deepest,
    ];

    /// Every bucket, deepest first. Classification order.
    pub const DESCENDING: [Self; 6] = [
        Self::Deepest,
        Self::VeryDeep,
        Self::Deep,
        Self::Intermediate,
        Self::Shallow,
        Self::Surface,
    ];

    /// Hex fill color for markers in this bucket.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Deepest => "#d73027",
            Self::VeryDeep => "#fc8d59",
            Self::Deep => "#fee08b",
            Self::Intermediate => "#d9ef8b",
            Self::Shallow => "#91cf60",
            Self::Surface => "#1a9850",
        }
    }

    /// Exclusive lower bound in kilometres, `None` for the open-ended
    /// shallowest bucket.
    pub const fn lower_bound_km(self) -> Option<i32> {
        match self {
            Self::Surface => None,
            Self::Shallow => Some(10),
            Self::Intermediate => Some(30),
            Self::Deep => Some(50),
            Self::VeryDeep => Some(70),
            Self::Deepest => Some(90),
        }
    }

    /// First value printed on the legend row for this bucket.
    ///
    /// Equal to the lower bound except for [`DepthBucket::Surface`], which
    /// is shown starting at `-10`.
    pub const fn legend_start_km(self) -> i32 {
        match self.lower_bound_km() {
            Some(km) => km,
            None => -10,
        }
    }

    /// The next deeper bucket, or `None` for [`DepthBucket::Deepest`].
    pub const fn deeper(self) -> Option<Self> {
        match self {
            Self::Surface => Some(Self::Shallow),
            Self::Shallow => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Deep),
            Self::Deep => Some(Self::VeryDeep),
            Self::VeryDeep => Some(Self::Deepest),
            Self::Deepest => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Radius policy
// ---------------------------------------------------------------------------

/// How the marker style treats radii below the minimum visible radius.
///
/// Negative magnitudes produce negative raw radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RadiusPolicy {
    /// Pass the raw radius through unchanged.
    Preserve,
    /// Raise any radius below the minimum visible radius up to it.
    #[default]
    Clamp,
}

// ---------------------------------------------------------------------------
// Legend position
// ---------------------------------------------------------------------------

/// Map corner the legend control is anchored to.
///
/// Serialized in the lowercase form the map library expects
/// (`bottomright`, `topleft`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum LegendPosition {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    #[default]
    BottomRight,
}
