//! Shared vector geometry for gesture detection.
//!
//! All gesture math is 2D: depth is discarded so results stay numerically
//! identical across runtimes.  Angles are in degrees.

use crate::landmarks::{Finger, HandLandmarks, Landmark};

/// Bend angle below which a finger counts as extended, in degrees.
pub const FINGER_EXTENDED_ANGLE_DEG: f64 = 40.0;

/// Euclidean distance between two landmarks in the image plane.
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Bend angle of a finger in degrees, in [0, 180].
///
/// Measures the angle between the mcp→pip and pip→tip segments: near 0 when
/// the segments are colinear (finger extended), near 180 when the tip folds
/// back toward the palm (finger curled).  A zero-length segment reads as
/// maximally curled.
pub fn finger_angle(hand: &HandLandmarks, finger: Finger) -> f64 {
    let (mcp, pip, tip) = hand.finger_chain(finger);

    let v1 = (pip.x - mcp.x, pip.y - mcp.y);
    let v2 = (tip.x - pip.x, tip.y - pip.y);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 == 0.0 || mag2 == 0.0 {
        return 180.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Whether a finger's bend angle is under the extension threshold.
pub fn is_finger_extended(hand: &HandLandmarks, finger: Finger) -> bool {
    finger_angle(hand, finger) < FINGER_EXTENDED_ANGLE_DEG
}

/// Extension confidence in [0, 1]: 1 at a perfectly straight finger,
/// falling off linearly to 0 at the extension threshold and beyond.
pub fn finger_extension_confidence(hand: &HandLandmarks, finger: Finger) -> f64 {
    let angle = finger_angle(hand, finger);
    (1.0 - angle / FINGER_EXTENDED_ANGLE_DEG).max(0.0)
}

// ── Tests ──────────────────────────────────────────────────
