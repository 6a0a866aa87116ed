use bevy::prelude::*;

pub mod light;
pub mod morph;
pub mod stage;
pub mod ui;

// 0xRRGGBB -> srgb color
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}
