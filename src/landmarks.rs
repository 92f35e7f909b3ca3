//! Landmark data model for gesture classification.
//!
//! Models the 21-point hand skeleton and 9-point body pose emitted by the
//! upstream landmark extractor, one `DetectionFrame` per video frame.
//! Coordinates are normalized to [0,1]; depth is carried through but ignored
//! by all gesture math.  Includes the JSONL replay loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ── Landmark ───────────────────────────────────────────────

/// A single normalized keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized x coordinate (0-1).
    pub x: f64,
    /// Normalized y coordinate (0-1).
    pub y: f64,
    /// Normalized z coordinate, if the extractor provides depth.
    pub z: Option<f64>,
    /// Visibility score (0-1), if the extractor provides one.
    pub visibility: Option<f64>,
}

// ── Hand landmarks ─────────────────────────────────────────

/// One hand's skeleton in one frame: 21 named landmarks, fully populated
/// or absent as a whole.  Field names match the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub wrist: Landmark,
    // Thumb chain (cmc/mcp/ip/tip)
    pub thumb_cmc: Landmark,
    pub thumb_mcp: Landmark,
    pub thumb_ip: Landmark,
    pub thumb_tip: Landmark,
    // Index finger (mcp/pip/dip/tip)
    pub index_mcp: Landmark,
    pub index_pip: Landmark,
    pub index_dip: Landmark,
    pub index_tip: Landmark,
    // Middle finger
    pub middle_mcp: Landmark,
    pub middle_pip: Landmark,
    pub middle_dip: Landmark,
    pub middle_tip: Landmark,
    // Ring finger
    pub ring_mcp: Landmark,
    pub ring_pip: Landmark,
    pub ring_dip: Landmark,
    pub ring_tip: Landmark,
    // Pinky finger
    pub pinky_mcp: Landmark,
    pub pinky_pip: Landmark,
    pub pinky_dip: Landmark,
    pub pinky_tip: Landmark,
}

// ── Fingers ────────────────────────────────────────────────

/// Fingers addressable for bend-angle queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

impl HandLandmarks {
    /// The (mcp, pip, tip) joint chain used for bend-angle math.
    ///
    /// The thumb has no pip; its ip joint plays the same role.
    pub fn finger_chain(&self, finger: Finger) -> (&Landmark, &Landmark, &Landmark) {
        match finger {
            Finger::Thumb => (&self.thumb_mcp, &self.thumb_ip, &self.thumb_tip),
            Finger::Index => (&self.index_mcp, &self.index_pip, &self.index_tip),
            Finger::Middle => (&self.middle_mcp, &self.middle_pip, &self.middle_tip),
            Finger::Ring => (&self.ring_mcp, &self.ring_pip, &self.ring_tip),
            Finger::Pinky => (&self.pinky_mcp, &self.pinky_pip, &self.pinky_tip),
        }
    }
}

// ── Pose landmarks ─────────────────────────────────────────

/// The body keypoints used by gesture detection: 9 named landmarks, fully
/// populated or absent as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseLandmarks {
    pub nose: Landmark,
    pub left_hip: Landmark,
    pub right_hip: Landmark,
    pub left_wrist: Landmark,
    pub right_wrist: Landmark,
    pub left_shoulder: Landmark,
    pub right_shoulder: Landmark,
    pub left_elbow: Landmark,
    pub right_elbow: Landmark,
}

// ── Hand side ──────────────────────────────────────────────

/// Which hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

// ── Detection frame ────────────────────────────────────────

/// Hands present in a frame, keyed by side.  Either or both may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameHands {
    pub left: Option<HandLandmarks>,
    pub right: Option<HandLandmarks>,
}

impl FrameHands {
    /// Landmarks for one side, if that hand was detected.
    pub fn get(&self, side: HandSide) -> Option<&HandLandmarks> {
        match side {
            HandSide::Left => self.left.as_ref(),
            HandSide::Right => self.right.as_ref(),
        }
    }
}

/// One instant of observation from the landmark extractor.
///
/// Timestamps are seconds, ascending across a stream but not necessarily
/// evenly spaced.  A frame with neither pose nor hands is valid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    /// Capture time in seconds.
    pub timestamp: f64,
    /// Body pose, if a body was detected.
    pub pose: Option<PoseLandmarks>,
    /// Hands, if any were detected.
    pub hands: Option<FrameHands>,
}

// ── JSONL loading ──────────────────────────────────────────

/// Load detection frames from a JSONL file, one frame object per line.
///
/// Blank lines are skipped.  Parse failures report the 1-based line number.
pub fn load_frames_from_jsonl(path: &Path) -> anyhow::Result<Vec<DetectionFrame>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;

    let mut frames = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let frame: DetectionFrame = serde_json::from_str(line)
            .map_err(|e| anyhow::anyhow!("{} line {}: {}", path.display(), idx + 1, e))?;
        frames.push(frame);
    }

    debug!("loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// A hand with every landmark at the same point, to be adjusted per test.
    fn uniform_hand(p: Landmark) -> HandLandmarks {
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

    const HAND_FIELDS: [&str; 21] = [
        "wrist",
        "thumb_cmc", "thumb_mcp", "thumb_ip", "thumb_tip",
        "index_mcp", "index_pip", "index_dip", "index_tip",
        "middle_mcp", "middle_pip", "middle_dip", "middle_tip",
        "ring_mcp", "ring_pip", "ring_dip", "ring_tip",
        "pinky_mcp", "pinky_pip", "pinky_dip", "pinky_tip",
    ];

    fn hand_json() -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (i, name) in HAND_FIELDS.iter().enumerate() {
            let v = serde_json::json!({ "x": 0.1 + i as f64 * 0.01, "y": 0.5 });
            map.insert(name.to_string(), v);
        }
        serde_json::Value::Object(map)
    }

    #[test]
    fn test_finger_chain_mapping() {
        let mut hand = uniform_hand(lm(0.0, 0.0));
        hand.index_mcp = lm(0.1, 0.2);
        hand.index_pip = lm(0.3, 0.4);
        hand.index_tip = lm(0.5, 0.6);

        let (mcp, pip, tip) = hand.finger_chain(Finger::Index);
        assert_eq!((mcp.x, mcp.y), (0.1, 0.2));
        assert_eq!((pip.x, pip.y), (0.3, 0.4));
        assert_eq!((tip.x, tip.y), (0.5, 0.6));
    }

    #[test]
    fn test_thumb_chain_uses_ip() {
        let mut hand = uniform_hand(lm(0.0, 0.0));
        hand.thumb_mcp = lm(0.1, 0.1);
        hand.thumb_ip = lm(0.2, 0.2);
        hand.thumb_tip = lm(0.3, 0.3);

        let (mcp, pip, tip) = hand.finger_chain(Finger::Thumb);
        assert_eq!(mcp.x, 0.1);
        assert_eq!(pip.x, 0.2, "thumb chain should route through the ip joint");
        assert_eq!(tip.x, 0.3);
    }

    #[test]
    fn test_frame_hands_get() {
        let hands = FrameHands {
            left: Some(uniform_hand(lm(0.2, 0.2))),
            right: None,
        };
        assert!(hands.get(HandSide::Left).is_some());
        assert!(hands.get(HandSide::Right).is_none());
    }

    #[test]
    fn test_hand_side_as_str() {
        assert_eq!(HandSide::Left.as_str(), "left");
        assert_eq!(HandSide::Right.as_str(), "right");
    }

    #[test]
    fn test_finger_as_str() {
        assert_eq!(Finger::Thumb.as_str(), "thumb");
        assert_eq!(Finger::Pinky.as_str(), "pinky");
    }

    #[test]
    fn test_deserialize_minimal_frame() {
        let frame: DetectionFrame = serde_json::from_str(r#"{"timestamp": 1.5}"#).unwrap();
        assert_eq!(frame.timestamp, 1.5);
        assert!(frame.pose.is_none());
        assert!(frame.hands.is_none());
    }

    #[test]
    fn test_deserialize_frame_with_one_hand() {
        let value = serde_json::json!({
            "timestamp": 0.033,
            "hands": { "left": hand_json() },
        });
        let frame: DetectionFrame = serde_json::from_value(value).unwrap();

        let hands = frame.hands.expect("hands should be present");
        let left = hands.left.expect("left hand should be present");
        assert!(hands.right.is_none());
        assert!((left.wrist.x - 0.1).abs() < 1e-9);
        assert!((left.pinky_tip.x - 0.3).abs() < 1e-9);
        assert!(left.wrist.z.is_none());
        assert!(left.wrist.visibility.is_none());
    }

    #[test]
    fn test_deserialize_landmark_with_depth() {
        let value = serde_json::json!({ "x": 0.5, "y": 0.6, "z": -0.1, "visibility": 0.9 });
        let p: Landmark = serde_json::from_value(value).unwrap();
        assert_eq!(p.z, Some(-0.1));
        assert_eq!(p.visibility, Some(0.9));
    }

    #[test]
    fn test_load_frames_from_jsonl() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"timestamp": 0.0}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"timestamp": 0.033, "pose": null, "hands": null}}"#).unwrap();
        file.flush().unwrap();

        let frames = load_frames_from_jsonl(file.path()).unwrap();
        assert_eq!(frames.len(), 2, "blank lines should be skipped");
        assert_eq!(frames[0].timestamp, 0.0);
        assert_eq!(frames[1].timestamp, 0.033);
    }

    #[test]
    fn test_load_frames_reports_line_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"timestamp": 0.0}}"#).unwrap();
        writeln!(file, "not json").unwrap();
        file.flush().unwrap();

        let err = load_frames_from_jsonl(file.path()).unwrap_err();
        assert!(
            err.to_string().contains("line 2"),
            "Expected line number in error, got: {}",
            err,
        );
    }

    #[test]
    fn test_load_frames_missing_file() {
        let err = load_frames_from_jsonl(Path::new("/nonexistent/frames.jsonl")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
