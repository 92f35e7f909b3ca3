//! Stream classification and interval extraction.
//!
//! `GesturePipeline` joins the stateless per-frame classifier with the
//! stability tracker so callers push frames in timestamp order and read
//! back one result per frame.  `gesture_intervals` condenses the locked
//! column of a finished run into contiguous gesture spans.

use crate::classifier::{ClassifierConfig, FrameClassifier, GestureLabel};
use crate::landmarks::DetectionFrame;
use crate::stability::{ConfigError, StabilityTracker, TrackerConfig, TrackerState};

// ── Results ────────────────────────────────────────────────

/// One classified frame: the raw detector verdict next to the stabilized
/// one, with the raw confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub timestamp: f64,
    pub raw: GestureLabel,
    pub locked: GestureLabel,
    pub confidence: f64,
}

/// A contiguous run of one locked gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInterval {
    pub label: GestureLabel,
    pub start: f64,
    pub end: f64,
}

// ── Pipeline ───────────────────────────────────────────────

/// Per-frame classifier plus tracker, fed in timestamp order.
pub struct GesturePipeline {
    classifier: FrameClassifier,
    tracker: StabilityTracker,
}

impl GesturePipeline {
    /// Pipeline with default thresholds and windows.
    pub fn new() -> Self {
        Self {
            classifier: FrameClassifier::new(),
            tracker: StabilityTracker::default(),
        }
    }

    /// Pipeline with explicit configuration.  Zero-width tracker windows
    /// are rejected here, before any frame is processed.
    pub fn with_config(
        classifier: ClassifierConfig,
        tracker: TrackerConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: FrameClassifier { config: classifier },
            tracker: StabilityTracker::new(tracker)?,
        })
    }

    /// Classify one frame and advance the tracker.
    pub fn process(&mut self, frame: &DetectionFrame) -> ClassificationResult {
        let (raw, confidence) = self.classifier.classify(frame);
        let locked = self.tracker.update(raw, confidence);
        ClassificationResult {
            timestamp: frame.timestamp,
            raw,
            locked,
            confidence,
        }
    }

    /// Lazily classify a stream of frames in order.
    pub fn classify_stream<'a>(
        &'a mut self,
        frames: impl IntoIterator<Item = &'a DetectionFrame> + 'a,
    ) -> impl Iterator<Item = ClassificationResult> + 'a {
        frames.into_iter().map(move |frame| self.process(frame))
    }

    /// Drop tracker state so a new stream starts from scratch.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn state(&self) -> &TrackerState {
        self.tracker.state()
    }
}

// ── Intervals ──────────────────────────────────────────────

/// Condense per-frame locked labels into contiguous gesture intervals.
///
/// A run ends at the timestamp of the first frame whose locked label
/// differs; a run still open at the end of the stream closes at the last
/// frame's timestamp.  NONE runs are tracked but never emitted.
pub fn gesture_intervals(results: &[ClassificationResult]) -> Vec<GestureInterval> {
    let mut intervals = Vec::new();
    let mut current: Option<(GestureLabel, f64)> = None;

    for result in results {
        let changed = match current {
            Some((label, _)) => label != result.locked,
            None => true,
        };
        if changed {
            if let Some((label, start)) = current {
                if label != GestureLabel::None {
                    intervals.push(GestureInterval {
                        label,
                        start,
                        end: result.timestamp,
                    });
                }
            }
            current = Some((result.locked, result.timestamp));
        }
    }

    if let Some((label, start)) = current {
        if label != GestureLabel::None {
            if let Some(last) = results.last() {
                intervals.push(GestureInterval {
                    label,
                    start,
                    end: last.timestamp,
                });
            }
        }
    }

    intervals
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

/// Frame with both wrists resting exactly on the hips.
#[cfg(test)]
fn hips_frame(timestamp: f64) -> DetectionFrame {
    DetectionFrame {
        timestamp,
        pose: Some(crate::landmarks::PoseLandmarks {
            nose: lm(0.5, 0.2),
            left_hip: lm(0.4, 0.6),
            right_hip: lm(0.6, 0.6),
            left_wrist: lm(0.4, 0.6),
            right_wrist: lm(0.6, 0.6),
            left_shoulder: lm(0.4, 0.3),
            right_shoulder: lm(0.6, 0.3),
            left_elbow: lm(0.4, 0.45),
            right_elbow: lm(0.6, 0.45),
        }),
        hands: None,
    }
}

#[cfg(test)]
fn empty_frame(timestamp: f64) -> DetectionFrame {
    DetectionFrame {
        timestamp,
        pose: None,
        hands: None,
    }
}

/// Hand-built result row for interval tests.
#[cfg(test)]
fn res(timestamp: f64, locked: GestureLabel) -> ClassificationResult {
    ClassificationResult {
        timestamp,
        raw: locked,
        locked,
        confidence: 0.8,
    }
}

/// Short-window pipeline: 5 frames to lock, 3 frames of grace.
#[cfg(test)]
fn short_pipeline() -> GesturePipeline {
    GesturePipeline::with_config(
        ClassifierConfig::default(),
        TrackerConfig {
            stability_frames: 5,
            lost_grace_frames: 3,
        },
    )
    .unwrap()
}

// ── Tests ──────────────────────────────────────────────────
