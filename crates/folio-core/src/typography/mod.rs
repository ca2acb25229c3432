//! Per-field typography overrides.
//!
//! Render surfaces call [`resolve_font`] once per text field with the
//! field's flattened key. The console side enumerates eligible fields with
//! [`build_font_targets`] and writes selections with [`apply_font`].

pub mod fonts;
pub mod resolver;
pub mod targets;

pub use fonts::{font_label, FontId, FontOption, FONT_OPTIONS, GLOBAL_DEFAULT_FAMILY};
pub use resolver::{resolve_font, TypographyOverrides, DEFAULT_FALLBACK};
pub use targets::{apply_font, build_font_targets, summarise_value, FontTarget, FontTargetSection};
