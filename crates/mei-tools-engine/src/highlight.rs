use std::fmt;
use std::str::FromStr;

pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#0098F0";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid highlight color '{0}', expected #rgb or #rrggbb")]
pub struct ColorError(pub String);

/// A CSS hex colour used to mark the highlighted notation element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightColor(String);

impl HighlightColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The stylesheet that colours the highlighted group and everything inside it.
    pub fn css(&self) -> String {
        let color = &self.0;
        format!(
            "#notation g.highlighted,\n#notation g.highlighted * {{\n  fill: {color};\n  color: {color};\n  stroke: {color};\n}}"
        )
    }
}

impl Default for HighlightColor {
    fn default() -> Self {
        Self(DEFAULT_HIGHLIGHT_COLOR.to_string())
    }
}

impl FromStr for HighlightColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = s.strip_prefix('#').is_some_and(|hex| {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        });
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ColorError(s.to_string()))
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#0098F0")]
    #[case("#fff")]
    #[case("  #a1B2c3 ")]
    fn test_accepts_hex_colors(#[case] input: &str) {
        assert!(input.parse::<HighlightColor>().is_ok());
    }

    #[rstest]
    #[case("0098F0")]
    #[case("#12345")]
    #[case("#ggg")]
    #[case("red; } body { display: none")]
    fn test_rejects_everything_else(#[case] input: &str) {
        assert!(input.parse::<HighlightColor>().is_err());
    }

    #[test]
    fn test_css_colours_group_and_descendants() {
        let css = "#ff0000".parse::<HighlightColor>().unwrap().css();
        assert!(css.contains("g.highlighted *"));
        assert!(css.contains("fill: #ff0000;"));
        assert!(css.contains("stroke: #ff0000;"));
    }

    #[test]
    fn test_default_color() {
        assert_eq!(HighlightColor::default().as_str(), DEFAULT_HIGHLIGHT_COLOR);
    }
}
