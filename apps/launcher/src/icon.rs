//! Tray icon bitmap.

pub const SIZE: u32 = 32;

/// RGBA pixels of a filled circle on a transparent background.
pub fn rgba() -> Vec<u8> {
    let center = (SIZE as f32 - 1.0) / 2.0;
    let radius = SIZE as f32 / 2.0 - 1.0;
    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let inside = dx * dx + dy * dy <= radius * radius;
            let alpha = if inside { 255 } else { 0 };
            pixels.extend_from_slice(&[30, 100, 200, alpha]);
        }
    }
    pixels
}
