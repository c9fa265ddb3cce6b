//! Protein CLI output primitives.
//!
//! Everything here goes to stderr. stdout is reserved for generated sources.

use std::path::Path;

use console::style;

/// Palette
pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

/// Symbols
pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}";          // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}";  // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}";    // ◉
    pub const DOT: &str = "\u{00B7}";              // ·
}

/// Print compact version header
pub fn print_compact_header(version: &str, language: &str) {
    eprintln!(
        "  {} {} {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("protein").fg(colors::CYAN).bold(),
        style(version).dim(),
        style(symbols::DOT).fg(colors::DIM),
        language
    );
}

/// Print a success message
pub fn success(msg: &str) {
    eprintln!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
        msg
    );
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA),
        style(msg).fg(colors::MAGENTA)
    );
}

/// Print an info message
pub fn info(msg: &str) {
    eprintln!(
        "  {} {}",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        msg
    );
}

/// Print a dim/secondary message
pub fn dim(msg: &str) {
    eprintln!("  {}", style(msg).fg(colors::DIM));
}

/// Shows `path` relative to `base` when possible.
pub fn display_path(path: &Path, base: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_is_relative() {
        let shown = display_path(Path::new("/work/app/src/main/java/Widget.kt"), Path::new("/work/app"));
        assert_eq!(shown, "src/main/java/Widget.kt");
    }

    #[test]
    fn test_display_path_falls_back_to_input() {
        let shown = display_path(Path::new("/work/app"), Path::new("/work/app"));
        assert_eq!(shown, "/work/app");
    }
}
