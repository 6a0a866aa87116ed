// per-frame morph state machine
// kept free of ecs types so the frame sequence can be driven directly from tests

use bevy::prelude::*;

use crate::config::{BLEND_DECAY_RATE, BLEND_START, CLOUD_SPIN_RATE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MorphPhase {
    Blending { factor: f32 },
    // one-way, holds the factor the last rebuild used
    Settled { final_factor: f32 },
}

/// What the point cloud should do this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MorphFrame {
    Rebuild(f32),
    Spin(f32),
}

#[derive(Resource, Clone, Debug)]
pub struct MorphDriver {
    pub phase: MorphPhase,
    pub decay_rate: f32,
    pub spin_rate: f32,
}

impl Default for MorphDriver {
    fn default() -> Self {
        Self::new(BLEND_START, BLEND_DECAY_RATE, CLOUD_SPIN_RATE)
    }
}

impl MorphDriver {
    pub fn new(start_factor: f32, decay_rate: f32, spin_rate: f32) -> Self {
        Self {
            phase: MorphPhase::Blending { factor: start_factor },
            decay_rate,
            spin_rate,
        }
    }

    /// Advances one frame. `elapsed` is seconds since the loop started, not the frame delta,
    /// so the decay speeds up the longer the scene runs.
    pub fn step(&mut self, elapsed: f32) -> MorphFrame {
        match self.phase {
            MorphPhase::Blending { factor } => {
                let next = factor - elapsed * self.decay_rate;
                // the crossing frame still rebuilds, spinning starts on the frame after
                self.phase = if next >= 0.0 {
                    MorphPhase::Blending { factor: next }
                } else {
                    MorphPhase::Settled { final_factor: next }
                };
                MorphFrame::Rebuild(next)
            }
            MorphPhase::Settled { .. } => MorphFrame::Spin(self.spin_rate * elapsed),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, MorphPhase::Settled { .. })
    }

    pub fn factor(&self) -> f32 {
        match self.phase {
            MorphPhase::Blending { factor } => factor,
            MorphPhase::Settled { final_factor } => final_factor,
        }
    }
}
