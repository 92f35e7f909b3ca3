//! Per-frame gesture classification.
//!
//! Four geometric detectors score one `DetectionFrame` each; the highest
//! confidence wins, with ties resolved in a fixed evaluation order so output
//! is reproducible across runtimes.  No state is carried between frames.

use crate::geometry::{distance, finger_extension_confidence, is_finger_extended};
use crate::landmarks::{DetectionFrame, Finger, HandLandmarks};

// ── Gesture labels ─────────────────────────────────────────

/// The closed set of recognized gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    /// No gesture detected.
    None,
    /// Both wrists resting on the hips.
    HipsHalo,
    /// Index and thumb tips pinched on both hands, hands together.
    HeartHands,
    /// Index and pinky extended, middle and ring curled.
    RockSign,
    /// Index extended, all other fingers curled.
    PointSparkles,
}

impl GestureLabel {
    /// String representation, matching the report and wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::HipsHalo => "HIPS_HALO",
            Self::HeartHands => "HEART_HANDS",
            Self::RockSign => "ROCK_SIGN",
            Self::PointSparkles => "POINT_SPARKLES",
        }
    }

    /// Parse a label from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(Self::None),
            "HIPS_HALO" => Some(Self::HipsHalo),
            "HEART_HANDS" => Some(Self::HeartHands),
            "ROCK_SIGN" => Some(Self::RockSign),
            "POINT_SPARKLES" => Some(Self::PointSparkles),
            _ => None,
        }
    }
}

// ── Config ─────────────────────────────────────────────────

/// Distance thresholds for the geometric detectors, in normalized
/// screen units.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Maximum wrist-to-hip distance for hands-on-hips.
    pub hip_threshold: f64,
    /// Maximum index-to-thumb tip distance for a per-hand pinch.
    pub finger_close: f64,
    /// Maximum distance between the two hands' index tips for heart hands.
    pub hands_close: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            hip_threshold: 0.12,
            finger_close: 0.035,
            hands_close: 0.11,
        }
    }
}

// ── Frame classifier ───────────────────────────────────────

/// Stateless per-frame gesture detector.
pub struct FrameClassifier {
    /// Configuration.
    pub config: ClassifierConfig,
}

impl FrameClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    /// Classify one frame, returning the best label and its confidence.
    ///
    /// All four detectors run on every frame; each returns (NONE, 0.0) when
    /// its required landmarks are absent.  The candidate with the highest
    /// confidence wins and earlier detectors win ties.
    pub fn classify(&self, frame: &DetectionFrame) -> (GestureLabel, f64) {
        let candidates = [
            self.detect_hips_halo(frame),
            self.detect_heart_hands(frame),
            self.detect_rock_sign(frame),
            self.detect_point_sparkles(frame),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best
    }

    /// Hands on hips: both wrists within `hip_threshold` of their hips.
    fn detect_hips_halo(&self, frame: &DetectionFrame) -> (GestureLabel, f64) {
        let pose = match &frame.pose {
            Some(pose) => pose,
            None => return (GestureLabel::None, 0.0),
        };

        let left_distance = distance(&pose.left_wrist, &pose.left_hip);
        let right_distance = distance(&pose.right_wrist, &pose.right_hip);

        if left_distance < self.config.hip_threshold && right_distance < self.config.hip_threshold {
            let confidence = 1.0 - left_distance.max(right_distance) / self.config.hip_threshold;
            return (GestureLabel::HipsHalo, confidence.max(0.0));
        }

        (GestureLabel::None, 0.0)
    }

    /// Heart hands: both hands pinched, index tips close together.
    fn detect_heart_hands(&self, frame: &DetectionFrame) -> (GestureLabel, f64) {
        let hands = match &frame.hands {
            Some(hands) => hands,
            None => return (GestureLabel::None, 0.0),
        };
        let (left, right) = match (&hands.left, &hands.right) {
            (Some(left), Some(right)) => (left, right),
            _ => return (GestureLabel::None, 0.0),
        };

        let left_heart = distance(&left.index_tip, &left.thumb_tip) < self.config.finger_close;
        let right_heart = distance(&right.index_tip, &right.thumb_tip) < self.config.finger_close;
        if !left_heart || !right_heart {
            return (GestureLabel::None, 0.0);
        }

        let hands_distance = distance(&left.index_tip, &right.index_tip);
        if hands_distance < self.config.hands_close {
            let confidence = 1.0 - hands_distance / self.config.hands_close;
            return (GestureLabel::HeartHands, confidence.max(0.0));
        }

        (GestureLabel::None, 0.0)
    }

    /// Rock sign on either hand; the better-scoring hand wins.
    fn detect_rock_sign(&self, frame: &DetectionFrame) -> (GestureLabel, f64) {
        let hands = match &frame.hands {
            Some(hands) => hands,
            None => return (GestureLabel::None, 0.0),
        };

        let mut best = (GestureLabel::None, 0.0);
        for hand in [&hands.left, &hands.right].into_iter().flatten() {
            let result = check_rock_sign_hand(hand);
            if result.1 > best.1 {
                best = result;
            }
        }
        best
    }

    /// Finger point on either hand; the better-scoring hand wins.
    fn detect_point_sparkles(&self, frame: &DetectionFrame) -> (GestureLabel, f64) {
        let hands = match &frame.hands {
            Some(hands) => hands,
            None => return (GestureLabel::None, 0.0),
        };

        let mut best = (GestureLabel::None, 0.0);
        for hand in [&hands.left, &hands.right].into_iter().flatten() {
            let result = check_point_hand(hand);
            if result.1 > best.1 {
                best = result;
            }
        }
        best
    }
}

/// Score one hand for rock sign: index and pinky extended, middle and
/// ring curled.
fn check_rock_sign_hand(hand: &HandLandmarks) -> (GestureLabel, f64) {
    let index_extended = is_finger_extended(hand, Finger::Index);
    let pinky_extended = is_finger_extended(hand, Finger::Pinky);
    let middle_curled = !is_finger_extended(hand, Finger::Middle);
    let ring_curled = !is_finger_extended(hand, Finger::Ring);

    if index_extended && pinky_extended && middle_curled && ring_curled {
        let index_conf = finger_extension_confidence(hand, Finger::Index);
        let pinky_conf = finger_extension_confidence(hand, Finger::Pinky);
        let middle_conf = 1.0 - finger_extension_confidence(hand, Finger::Middle);
        let ring_conf = 1.0 - finger_extension_confidence(hand, Finger::Ring);

        let confidence = (index_conf + pinky_conf + middle_conf + ring_conf) / 4.0;
        return (GestureLabel::RockSign, confidence);
    }

    (GestureLabel::None, 0.0)
}

/// Score one hand for finger point: index extended, every other finger
/// curled.
fn check_point_hand(hand: &HandLandmarks) -> (GestureLabel, f64) {
    let index_extended = is_finger_extended(hand, Finger::Index);
    let middle_curled = !is_finger_extended(hand, Finger::Middle);
    let ring_curled = !is_finger_extended(hand, Finger::Ring);
    let pinky_curled = !is_finger_extended(hand, Finger::Pinky);

    if index_extended && middle_curled && ring_curled && pinky_curled {
        let index_conf = finger_extension_confidence(hand, Finger::Index);
        let middle_conf = 1.0 - finger_extension_confidence(hand, Finger::Middle);
        let ring_conf = 1.0 - finger_extension_confidence(hand, Finger::Ring);
        let pinky_conf = 1.0 - finger_extension_confidence(hand, Finger::Pinky);

        let confidence = (index_conf + middle_conf + ring_conf + pinky_conf) / 4.0;
        return (GestureLabel::PointSparkles, confidence);
    }

    (GestureLabel::None, 0.0)
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn lm(x: f64, y: f64) -> crate::landmarks::Landmark {
    crate::landmarks::Landmark {
        x,
        y,
        z: None,
        visibility: None,
    }
}

#[cfg(test)]
fn uniform_hand(p: crate::landmarks::Landmark) -> HandLandmarks {
    HandLandmarks {
        wrist: p,
        thumb_cmc: p,
        thumb_mcp: p,
        thumb_ip: p,
        thumb_tip: p,
        index_mcp: p,
        index_pip: p,
        index_dip: p,
        index_tip: p,
        middle_mcp: p,
        middle_pip: p,
        middle_dip: p,
        middle_tip: p,
        ring_mcp: p,
        ring_pip: p,
        ring_dip: p,
        ring_tip: p,
        pinky_mcp: p,
        pinky_pip: p,
        pinky_dip: p,
        pinky_tip: p,
    }
}

/// Set one finger's chain: extended runs straight up from the mcp, curled
/// folds the tip back past the pip.
#[cfg(test)]
fn set_chain(hand: &mut HandLandmarks, finger: Finger, x: f64, extended: bool) {
    use crate::landmarks::Landmark;

    let (mcp, pip, tip): (Landmark, Landmark, Landmark) = if extended {
        (lm(x, 0.5), lm(x, 0.4), lm(x, 0.2))
    } else {
        (lm(x, 0.5), lm(x, 0.4), lm(x, 0.55))
    };
    match finger {
        Finger::Thumb => {
            hand.thumb_mcp = mcp;
            hand.thumb_ip = pip;
            hand.thumb_tip = tip;
        }
        Finger::Index => {
            hand.index_mcp = mcp;
            hand.index_pip = pip;
            hand.index_tip = tip;
        }
        Finger::Middle => {
            hand.middle_mcp = mcp;
            hand.middle_pip = pip;
            hand.middle_tip = tip;
        }
        Finger::Ring => {
            hand.ring_mcp = mcp;
            hand.ring_pip = pip;
            hand.ring_tip = tip;
        }
        Finger::Pinky => {
            hand.pinky_mcp = mcp;
            hand.pinky_pip = pip;
            hand.pinky_tip = tip;
        }
    }
}

/// A hand posed with the given fingers extended (index, middle, ring, pinky).
#[cfg(test)]
fn posed_hand(index: bool, middle: bool, ring: bool, pinky: bool) -> HandLandmarks {
    let mut hand = uniform_hand(lm(0.5, 0.6));
    set_chain(&mut hand, Finger::Index, 0.50, index);
    set_chain(&mut hand, Finger::Middle, 0.52, middle);
    set_chain(&mut hand, Finger::Ring, 0.54, ring);
    set_chain(&mut hand, Finger::Pinky, 0.56, pinky);
    hand
}

#[cfg(test)]
fn hips_pose(
    left_wrist: crate::landmarks::Landmark,
    right_wrist: crate::landmarks::Landmark,
) -> crate::landmarks::PoseLandmarks {
    crate::landmarks::PoseLandmarks {
        nose: lm(0.5, 0.2),
        left_hip: lm(0.4, 0.6),
        right_hip: lm(0.6, 0.6),
        left_wrist,
        right_wrist,
        left_shoulder: lm(0.4, 0.3),
        right_shoulder: lm(0.6, 0.3),
        left_elbow: lm(0.4, 0.45),
        right_elbow: lm(0.6, 0.45),
    }
}

/// Two hands pinched into a heart directly in front of the chest.
#[cfg(test)]
fn heart_hands_pair() -> (HandLandmarks, HandLandmarks) {
    let mut left = uniform_hand(lm(0.3, 0.5));
    left.thumb_tip = lm(0.5, 0.5);
    left.index_mcp = lm(0.4, 0.4);
    left.index_pip = lm(0.45, 0.4);
    left.index_tip = lm(0.5, 0.5);

    let mut right = uniform_hand(lm(0.7, 0.5));
    right.thumb_tip = lm(0.5, 0.5);
    right.index_mcp = lm(0.6, 0.4);
    right.index_pip = lm(0.55, 0.4);
    right.index_tip = lm(0.5, 0.5);

    (left, right)
}

#[cfg(test)]
fn pose_frame(pose: crate::landmarks::PoseLandmarks) -> DetectionFrame {
    DetectionFrame {
        timestamp: 0.0,
        pose: Some(pose),
        hands: None,
    }
}

#[cfg(test)]
fn hands_frame(left: Option<HandLandmarks>, right: Option<HandLandmarks>) -> DetectionFrame {
    DetectionFrame {
        timestamp: 0.0,
        pose: None,
        hands: Some(crate::landmarks::FrameHands { left, right }),
    }
}

// ── Tests ──────────────────────────────────────────────────
