//! Gallery colour palette.

use egui::Color32;

/// Top bar background - Charcoal
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x26, 0x2A, 0x33);

/// Side panel background - Slate
pub const PANEL_BG: Color32 = Color32::from_rgb(0x31, 0x36, 0x41);

/// Board area background
pub const BOARD_BG: Color32 = Color32::from_rgb(0x1E, 0x21, 0x28);

pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEC, 0xEF, 0xF4);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x9A, 0xA3, 0xB2);

pub const TAG_CHIP: Color32 = Color32::from_rgb(0x4C, 0x6E, 0xA8);
pub const SELECTED: Color32 = Color32::from_rgb(0x5E, 0x81, 0xAC);

pub const STATUS_ONLINE: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
pub const STATUS_OFFLINE: Color32 = Color32::from_rgb(0xDC, 0x35, 0x45);
pub const STATUS_BUSY: Color32 = Color32::from_rgb(0xFF, 0xC1, 0x07);

pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);
pub const BUTTON_DANGER: Color32 = Color32::from_rgb(0xB9, 0x3A, 0x3A);
