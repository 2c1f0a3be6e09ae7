// Colors handed to the canvas. Hex strings and u32s (RRGGBBAA) are unpacked into channels,
// any other CSS color (rgb(), hsl(), named colors...) is kept verbatim for the canvas to read.

#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Rgba { r: u8, g: u8, b: u8, a: u8 },
    Css(String),
}

impl Color {
    pub const WHITE: Color = Color::from_u32(0xffffffff);
    pub const CYAN: Color = Color::from_u32(0x00ffffff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color::Rgba { r, g, b, a }
    }

    // Malformed hex and blank strings are rejected, everything else is left to the canvas
    pub fn parse(text: &str) -> Option<Color> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match text.strip_prefix('#') {
            Some(hex) => Color::parse_hex(hex),
            None => Some(Color::Css(text.to_owned())),
        }
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 | 4 => {
                // Each short digit expands to a doubled pair, #0ff == #00ffff
                let mut num: u32 = 0;
                for c in hex.chars() {
                    let d = c.to_digit(16)?;
                    num = (num << 8) | (d << 4 | d);
                }
                if hex.len() == 3 {
                    num = (num << 8) | 0xff;
                }
                Some(Color::from_u32(num))
            }
            6 => u32::from_str_radix(hex, 16)
                .ok()
                .map(|num| Color::from_u32((num << 8) | 0xff)),
            8 => u32::from_str_radix(hex, 16).ok().map(Color::from_u32),
            _ => None,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Color::Rgba { r, g, b, a: 0xff } => format!("#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba { r, g, b, a } => {
                format!("rgba({}, {}, {}, {})", r, g, b, *a as f64 / 255.0)
            }
            Color::Css(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::parse("#00ffff"), Some(Color::CYAN));
        assert_eq!(Color::parse("#0ff"), Some(Color::CYAN));
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(
            Color::parse("#ff000080"),
            Some(Color::Rgba { r: 0xff, g: 0, b: 0, a: 0x80 })
        );
        assert_eq!(
            Color::parse("#f008"),
            Some(Color::Rgba { r: 0xff, g: 0, b: 0, a: 0x88 })
        );
    }

    #[test]
    fn functional_and_named_colors_reach_the_canvas_unchanged() {
        let inputs = [
            "rgb(255, 0, 0)",
            "rgba(0,255,0,0.5)",
            "hsl(120, 100%, 50%)",
            "gold",
            "hotpink",
        ];
        for input in &inputs {
            let color = Color::parse(input).unwrap();
            assert_eq!(color, Color::Css((*input).to_owned()));
            assert_eq!(color.to_css(), *input);
        }
        assert_eq!(Color::parse("  gold ").unwrap().to_css(), "gold");
    }

    #[test]
    fn rejects_malformed_hex_and_blanks() {
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse(""), None);
        assert_eq!(Color::parse("   "), None);
    }

    #[test]
    fn css_output() {
        assert_eq!(Color::CYAN.to_css(), "#00ffff");
        assert_eq!(
            Color::from_u32(0x10203000).to_css(),
            "rgba(16, 32, 48, 0)"
        );
    }
}
