//! Temporal gesture stabilization.
//!
//! Raw per-frame labels flicker when landmarks jitter.  The tracker only
//! reports a gesture after it persists for a full stability window, then
//! holds the lock through short detection dropouts with a grace pool.  The
//! pool refills on lock, not on matching frames, so scattered misses drain
//! it until the lock releases.

use thiserror::Error;
use tracing::debug;

use crate::classifier::GestureLabel;

// ── Config ─────────────────────────────────────────────────

/// Frame-count windows for locking and holding gestures.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Consecutive matching frames required before a gesture locks.
    pub stability_frames: u32,
    /// Non-matching frames tolerated after a lock before it releases.
    pub lost_grace_frames: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            stability_frames: 30,
            lost_grace_frames: 12,
        }
    }
}

impl TrackerConfig {
    /// Both windows must be at least one frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stability_frames == 0 {
            return Err(ConfigError::ZeroStabilityFrames);
        }
        if self.lost_grace_frames == 0 {
            return Err(ConfigError::ZeroGraceFrames);
        }
        Ok(())
    }
}

/// Rejected tracker configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("stability_frames must be at least 1")]
    ZeroStabilityFrames,
    #[error("lost_grace_frames must be at least 1")]
    ZeroGraceFrames,
}

// ── Tracker state ──────────────────────────────────────────

/// Observable tracker state, one snapshot per processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    /// Candidate gesture currently accumulating frames, or the locked one.
    pub current_type: GestureLabel,
    /// Best confidence seen for the current candidate.
    pub current_confidence: f64,
    /// Whether the current gesture is locked.
    pub locked: bool,
    /// Consecutive frames the current candidate has matched.
    pub stability_count: u32,
    /// Most recent gesture that reached a lock.
    pub last_locked_gesture: GestureLabel,
    /// Grace frames left before a locked gesture releases.
    pub grace_frames_remaining: u32,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            current_type: GestureLabel::None,
            current_confidence: 0.0,
            locked: false,
            stability_count: 0,
            last_locked_gesture: GestureLabel::None,
            grace_frames_remaining: 0,
        }
    }
}

// ── Stability tracker ──────────────────────────────────────

/// Frame-by-frame lock/grace state machine over raw gesture labels.
pub struct StabilityTracker {
    config: TrackerConfig,
    state: TrackerState,
}

impl StabilityTracker {
    /// Create a tracker, rejecting zero-width windows.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: TrackerState::default(),
        })
    }

    /// Feed one raw classification and return the locked label for the
    /// frame, NONE while no gesture holds a lock.
    pub fn update(&mut self, label: GestureLabel, confidence: f64) -> GestureLabel {
        let stability_frames = self.config.stability_frames;
        let lost_grace_frames = self.config.lost_grace_frames;
        let st = &mut self.state;

        if st.locked {
            // Lock holds as long as the raw label agrees
            if label == st.current_type {
                return st.current_type;
            }
            // Disagreement spends grace; the lock survives until it runs out
            if st.grace_frames_remaining > 0 {
                st.grace_frames_remaining -= 1;
                return st.current_type;
            }
            debug!("Gesture lock released: {}", st.current_type.as_str());
            st.locked = false;
            st.stability_count = 0;
        }

        if label == st.current_type && label != GestureLabel::None {
            st.stability_count += 1;
            st.current_confidence = st.current_confidence.max(confidence);

            if st.stability_count >= stability_frames {
                st.locked = true;
                st.last_locked_gesture = label;
                st.grace_frames_remaining = lost_grace_frames;
                debug!(
                    "Gesture locked: {} after {} frames",
                    label.as_str(),
                    st.stability_count
                );
            }
        } else {
            // New candidate (NONE included) restarts the count
            st.current_type = label;
            st.current_confidence = confidence;
            st.stability_count = 1;
        }

        if st.locked {
            st.current_type
        } else {
            GestureLabel::None
        }
    }

    /// Drop all accumulated state, keeping the configuration.
    pub fn reset(&mut self) {
        self.state = TrackerState::default();
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }
}

impl Default for StabilityTracker {
    fn default() -> Self {
        Self {
            config: TrackerConfig::default(),
            state: TrackerState::default(),
        }
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Tracker with a short 5-frame lock and 3-frame grace window.
#[cfg(test)]
fn small_tracker() -> StabilityTracker {
    StabilityTracker::new(TrackerConfig {
        stability_frames: 5,
        lost_grace_frames: 3,
    })
    .unwrap()
}

#[cfg(test)]
fn feed(
    tracker: &mut StabilityTracker,
    label: GestureLabel,
    n: usize,
) -> Vec<GestureLabel> {
    (0..n).map(|_| tracker.update(label, 0.8)).collect()
}

// ── Tests ──────────────────────────────────────────────────
