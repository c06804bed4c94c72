//! Maneuver classification
//!
//! Buckets the bearing change at a step into a turn category so the
//! display layer can pick an arrow icon.

use crate::geo::normalize_angle;

/// Turn category for a maneuver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Depart,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
    SlightRight,
    Right,
    SharpRight,
    UTurn,
    Arrive,
}

impl Turn {
    /// Stable icon identifier for the map/banner renderer
    pub fn icon_name(&self) -> &'static str {
        match self {
            Turn::Depart => "depart",
            Turn::Straight => "straight",
            Turn::SlightLeft => "slight-left",
            Turn::Left => "left",
            Turn::SharpLeft => "sharp-left",
            Turn::SlightRight => "slight-right",
            Turn::Right => "right",
            Turn::SharpRight => "sharp-right",
            Turn::UTurn => "uturn",
            Turn::Arrive => "arrive",
        }
    }
}

/// Classify the change from `bearing_before` to `bearing_after`
///
/// Positive relative angle is a right turn, negative a left turn.
pub fn classify_turn(bearing_before: f64, bearing_after: f64) -> Turn {
    let angle = normalize_angle(bearing_after - bearing_before);
    let abs_angle = angle.abs();

    if abs_angle > 170.0 {
        Turn::UTurn
    } else if abs_angle > 120.0 {
        if angle > 0.0 {
            Turn::SharpRight
        } else {
            Turn::SharpLeft
        }
    } else if abs_angle > 60.0 {
        if angle > 0.0 {
            Turn::Right
        } else {
            Turn::Left
        }
    } else if abs_angle > 20.0 {
        if angle > 0.0 {
            Turn::SlightRight
        } else {
            Turn::SlightLeft
        }
    } else {
        Turn::Straight
    }
}
