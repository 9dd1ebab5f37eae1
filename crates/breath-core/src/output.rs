//! Per-tick step results handed to the emitting collaborator.

use serde::{Deserialize, Serialize};

use breath_events::{DenyReason, EmitKind};

use crate::config::VisualsConfig;

/// Smallest particle scale an emitter is asked to draw.
pub const MIN_EMITTER_SCALE: f64 = 0.1;

/// Offsets used for underwater bubbles, in blocks.
pub const UNDERWATER_FORWARD_OFFSET: f64 = 0.2;
pub const UNDERWATER_DOWN_OFFSET: f64 = 0.05;

/// Normalized description of one visual instance.
///
/// Position is expressed relative to the subject's mouth: `forward_offset`
/// along the look direction, `down_offset` below eye height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterDescriptor {
    /// RGB color, `0xRRGGBB`
    pub color: u32,
    pub scale: f64,
    pub forward_offset: f64,
    pub down_offset: f64,
}

impl EmitterDescriptor {
    /// Descriptor for a breath puff.
    pub fn air(visuals: &VisualsConfig) -> Self {
        Self {
            color: visuals.color & 0x00FF_FFFF,
            scale: visuals.size.max(MIN_EMITTER_SCALE),
            forward_offset: visuals.forward_offset,
            down_offset: visuals.down_offset,
        }
    }

    /// Descriptor for underwater bubbles. Only color and scale follow the visuals settings.
    pub fn underwater(visuals: &VisualsConfig) -> Self {
        Self {
            forward_offset: UNDERWATER_FORWARD_OFFSET,
            down_offset: UNDERWATER_DOWN_OFFSET,
            ..Self::air(visuals)
        }
    }

    /// Color split into `[r, g, b]` components in `[0, 1]`.
    pub fn rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| ((self.color >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

/// Result of one engine step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// A visual should be emitted this tick
    pub emitted: bool,
    pub emit_kind: EmitKind,
    /// Set when eligibility was evaluated this tick and denied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility_reason: Option<DenyReason>,
    /// Present whenever `emitted` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emitter: Option<EmitterDescriptor>,
}

impl StepOutcome {
    /// Nothing happened this tick.
    pub fn idle() -> Self {
        Self {
            emitted: false,
            emit_kind: EmitKind::None,
            eligibility_reason: None,
            emitter: None,
        }
    }

    /// Eligibility was evaluated and denied.
    pub fn denied(reason: Option<DenyReason>) -> Self {
        Self {
            eligibility_reason: reason,
            ..Self::idle()
        }
    }

    /// Emit one visual of `kind`.
    pub fn emit(kind: EmitKind, visuals: &VisualsConfig) -> Self {
        let emitter = match kind {
            EmitKind::Air => Some(EmitterDescriptor::air(visuals)),
            EmitKind::Underwater => Some(EmitterDescriptor::underwater(visuals)),
            EmitKind::None => None,
        };
        Self {
            emitted: emitter.is_some(),
            emit_kind: kind,
            eligibility_reason: None,
            emitter,
        }
    }

    /// Deny reason label, e.g. "underwater".
    pub fn reason_str(&self) -> Option<&'static str> {
        self.eligibility_reason.map(DenyReason::as_str)
    }
}

impl Default for StepOutcome {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_descriptor_follows_visuals() {
        let visuals = VisualsConfig::default();
        let emitter = EmitterDescriptor::air(&visuals);

        assert_eq!(emitter.color, 0xE6F2FF);
        assert_eq!(emitter.scale, 0.6);
        assert_eq!(emitter.forward_offset, 0.3);
        assert_eq!(emitter.down_offset, 0.2);
    }

    #[test]
    fn test_scale_is_floored() {
        let visuals = VisualsConfig {
            size: 0.0,
            ..VisualsConfig::default()
        };
        assert_eq!(EmitterDescriptor::air(&visuals).scale, MIN_EMITTER_SCALE);
    }

    #[test]
    fn test_underwater_uses_fixed_offsets() {
        let emitter = EmitterDescriptor::underwater(&VisualsConfig::default());

        assert_eq!(emitter.forward_offset, 0.2);
        assert_eq!(emitter.down_offset, 0.05);
        assert_eq!(emitter.scale, 0.6);
    }

    #[test]
    fn test_rgb_components() {
        let visuals = VisualsConfig {
            color: 0xFF8000,
            ..VisualsConfig::default()
        };
        let [r, g, b] = EmitterDescriptor::air(&visuals).rgb();

        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_outcome_constructors() {
        let outcome = StepOutcome::emit(EmitKind::Air, &VisualsConfig::default());
        assert!(outcome.emitted);
        assert!(outcome.emitter.is_some());

        let denied = StepOutcome::denied(Some(DenyReason::Underwater));
        assert!(!denied.emitted);
        assert_eq!(denied.emit_kind, EmitKind::None);
        assert_eq!(denied.reason_str(), Some("underwater"));

        assert_eq!(StepOutcome::default(), StepOutcome::idle());
    }

    #[test]
    fn test_outcome_serialization_skips_empty_fields() {
        let json = serde_json::to_string(&StepOutcome::idle()).unwrap();
        assert_eq!(json, r#"{"emitted":false,"emit_kind":"none"}"#);
    }
}
