//! Halo gesture classification over pose and hand landmark streams.
//!
//! Geometric detectors score each frame for four effect-trigger gestures;
//! a temporal tracker locks a gesture once it persists for a stability
//! window and holds the lock through brief detection dropouts.  Frames
//! arrive as JSONL detection dumps and leave as per-frame results or
//! condensed gesture intervals.

pub mod classifier;
pub mod geometry;
pub mod landmarks;
pub mod stability;
pub mod stream;

pub use classifier::{ClassifierConfig, FrameClassifier, GestureLabel};
pub use landmarks::{
    load_frames_from_jsonl, DetectionFrame, Finger, FrameHands, HandLandmarks, HandSide, Landmark,
    PoseLandmarks,
};
pub use stability::{ConfigError, StabilityTracker, TrackerConfig, TrackerState};
pub use stream::{gesture_intervals, ClassificationResult, GestureInterval, GesturePipeline};
