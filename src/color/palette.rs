use super::Color;

pub const ORANGE: Color = Color::rgb(110, 20, 0);
pub const RED: Color = Color::rgb(250, 8, 0);
pub const BLUE: Color = Color::rgb(0, 50, 255);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const PINK: Color = Color::rgb(250, 2, 20);

/// Color of the connectivity animations
pub const WIFI: Color = Color::rgb(10, 100, 250);
/// Color of the connection lost warning
pub const ERROR: Color = Color::rgb(255, 0, 0);
pub const OFF: Color = Color::new(0, 0, 0, 0);

const THEME_COLORS: [Color; 5] = [ORANGE, RED, BLUE, WHITE, PINK];

/// Theme color for a stored color number.
///
/// Unknown numbers fall back to [`ORANGE`].
pub fn theme_color(number: i32) -> Color {
    usize::try_from(number)
        .ok()
        .and_then(|index| THEME_COLORS.get(index).copied())
        .unwrap_or(ORANGE)
}
