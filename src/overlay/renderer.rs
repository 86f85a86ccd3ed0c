use crate::foundation::core::GazePoint;
use crate::foundation::error::{AuraError, AuraResult};
use crate::frame::Frame;
use crate::overlay::blur::BoxBlur;
use crate::overlay::color::HeatmapMapper;
use crate::overlay::composite::compose;
use crate::overlay::field::build_field;
use crate::overlay::masks::build_masks;
use crate::session::opts::OverlayOpts;

/// How gaze points outside the frame are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GazePolicy {
    /// Move the point onto the nearest edge pixel.
    #[default]
    Clamp,
    /// Fail with [`AuraError::DimensionMismatch`].
    Reject,
}

/// Single-frame overlay renderer: heatmap color, distance field, masks, composite.
///
/// Stateless between calls; every render allocates its own field, masks and planes, so one
/// renderer can be shared by worker threads.
#[derive(Clone, Debug)]
pub struct OverlayRenderer {
    mapper: HeatmapMapper,
    blur: BoxBlur,
    focus_radius: f32,
    aura_radius: f32,
    gaze_policy: GazePolicy,
}

impl OverlayRenderer {
    /// Build a renderer from validated options.
    pub fn new(opts: &OverlayOpts) -> AuraResult<Self> {
        opts.validate()?;
        Ok(Self {
            mapper: HeatmapMapper::new(opts.signal_min, opts.signal_max, opts.signal_policy)?,
            blur: BoxBlur::new(opts.blur_kernel)?,
            focus_radius: opts.focus_radius,
            aura_radius: opts.aura_radius,
            gaze_policy: opts.gaze_policy,
        })
    }

    /// Render the overlay for one frame.
    #[tracing::instrument(level = "trace", skip(self, frame), fields(w = frame.width, h = frame.height))]
    pub fn render(&self, frame: &Frame, gaze: GazePoint, signal: f64) -> AuraResult<Frame> {
        let gaze = self.resolve_gaze(gaze, frame.width, frame.height)?;
        let color = self.mapper.map(signal)?;
        let field = build_field(frame.width, frame.height, gaze)?;
        let masks = build_masks(&field, self.focus_radius, self.aura_radius)?;
        compose(frame, &masks, color, &self.blur)
    }

    fn resolve_gaze(&self, gaze: GazePoint, width: u32, height: u32) -> AuraResult<GazePoint> {
        if gaze.is_within(width, height) {
            return Ok(gaze);
        }
        match self.gaze_policy {
            GazePolicy::Clamp => {
                let clamped = gaze.clamped(width, height);
                tracing::debug!(?gaze, ?clamped, "clamped off-frame gaze point");
                Ok(clamped)
            }
            GazePolicy::Reject => Err(AuraError::DimensionMismatch {
                x: gaze.x,
                y: gaze.y,
                width,
                height,
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/renderer.rs"]
mod tests;
