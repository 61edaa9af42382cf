// RGBA color values and CSS hex parsing

use crate::grid_surface_errors::GridSurfaceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = GridSurfaceError;

    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridSurfaceError::InvalidArgument(format!("invalid color `{}`", s));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let digits: Vec<u8> = hex
                    .chars()
                    .filter_map(|c| c.to_digit(16))
                    .map(|d| (d * 17) as u8)
                    .collect();
                Ok(Rgba::opaque(digits[0], digits[1], digits[2]))
            }
            6 => Ok(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!("#777777".parse::<Rgba>().unwrap(), Rgba::opaque(0x77, 0x77, 0x77));
        assert_eq!("#aaa".parse::<Rgba>().unwrap(), Rgba::opaque(0xaa, 0xaa, 0xaa));
        assert_eq!(
            "#11223380".parse::<Rgba>().unwrap(),
            Rgba::new(0x11, 0x22, 0x33, 0x80)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("777777".parse::<Rgba>().is_err());
        assert!("#77777".parse::<Rgba>().is_err());
        assert!("#zzzzzz".parse::<Rgba>().is_err());
        assert!("#ééé".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Rgba::opaque(0xaa, 0xaa, 0xaa).to_hex(), "#aaaaaa");
        assert_eq!(Rgba::TRANSPARENT.to_hex(), "#00000000");
    }
}
