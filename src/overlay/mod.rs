//! Per-frame overlay core: heatmap color, distance field, region masks and compositing.

/// Uniform box blur.
pub mod blur;
/// Signal-to-color heatmap.
pub mod color;
/// Three-region compositing.
pub mod composite;
/// Radial distance fields.
pub mod field;
/// Focus and aura masks.
pub mod masks;
/// Single-frame renderer combining the stages above.
pub mod renderer;
