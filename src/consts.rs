//! Shared numeric constants for the engine.

// ── Items ───────────────────────────────────────────────────────

/// Font size, in document units, of an emoji dropped onto the canvas.
pub const DEFAULT_ITEM_SIZE: f64 = 40.0;

// ── Selection outline ───────────────────────────────────────────

/// Outline side length as a multiple of the item's rendered font size.
pub const SELECTION_OUTLINE_SCALE: f64 = 1.2;

/// Outline stroke width before zoom is applied.
pub const SELECTION_LINE_WIDTH: f64 = 3.0;

// ── Taps ────────────────────────────────────────────────────────

/// Tap count that toggles an item or clears the selection.
pub const SINGLE_TAP: u32 = 1;

/// Tap count that fits the background into the view.
pub const DOUBLE_TAP: u32 = 2;

/// Tap count that deletes an item.
pub const TRIPLE_TAP: u32 = 3;
