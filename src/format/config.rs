//! Formatting configuration for Wabbit

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl FormatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_indent_is_four() {
        assert_eq!(FormatConfig::default().indent_width, 4);
        assert_eq!(FormatConfig::new(), FormatConfig::default());
    }

    #[test]
    fn test_with_indent_width() {
        assert_eq!(FormatConfig::new().with_indent_width(2).indent_width, 2);
    }
}
