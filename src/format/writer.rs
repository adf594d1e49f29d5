//! Output writer with indentation tracking

use super::config::FormatConfig;

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    output: String,
    indent_level: usize,
    config: FormatConfig,
    /// Whether the next write starts a new line (and so needs indentation)
    at_line_start: bool,
}

impl FormatWriter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
        }
    }

    /// Get the formatted output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.config.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write an empty line; consecutive calls and calls at the start of output collapse into at most one.
    pub fn blank_line(&mut self) {
        if self.output.is_empty() || self.output.ends_with("\n\n") {
            return;
        }
        if !self.at_line_start {
            self.newline();
        }
        self.newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> FormatWriter {
        FormatWriter::new(FormatConfig::default())
    }

    #[test]
    fn test_new_writer_empty_output() {
        assert_eq!(default_writer().finish(), "");
    }

    #[test]
    fn test_indentation_applies_at_line_start_only() {
        let mut w = default_writer();
        w.writeln("while true {");
        w.indent();
        w.write("print ");
        w.writeln("1;");
        w.dedent();
        w.writeln("}");
        assert_eq!(w.finish(), "while true {\n    print 1;\n}\n");
    }

    #[test]
    fn test_custom_indent_width() {
        let mut w = FormatWriter::new(FormatConfig::new().with_indent_width(2));
        w.indent();
        w.indent();
        w.writeln("x;");
        assert_eq!(w.finish(), "    x;\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut w = default_writer();
        w.dedent();
        w.writeln("x;");
        assert_eq!(w.finish(), "x;\n");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let mut w = default_writer();
        w.blank_line();
        w.writeln("a;");
        w.blank_line();
        w.blank_line();
        w.writeln("b;");
        assert_eq!(w.finish(), "a;\n\nb;\n");
    }

    #[test]
    fn test_empty_write_does_not_indent() {
        let mut w = default_writer();
        w.indent();
        w.write("");
        w.newline();
        assert_eq!(w.finish(), "\n");
    }
}
