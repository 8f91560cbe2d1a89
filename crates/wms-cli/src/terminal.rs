//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for terminal output formatting.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for emphasis (bin codes).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (step numbers, decorations).
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for distances.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for stock that covers the request.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow for partial stock.
    pub const YELLOW: &str = "\x1b[33m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
            yellow: colors::YELLOW,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
            yellow: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a graph distance with two decimals, e.g. `2.50`.
#[must_use]
pub fn format_distance(distance: f64) -> String {
    format!("{distance:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0.00");
        assert_eq!(format_distance(2.5), "2.50");
        assert_eq!(format_distance(10.125), "10.13");
    }

    #[test]
    fn test_color_palette_colored() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.reset, colors::RESET);
        assert_eq!(palette.cyan, colors::CYAN);
    }

    #[test]
    fn test_color_palette_plain() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.white_bold.is_empty());
        assert!(palette.green.is_empty());
    }

    mod supports_color_tests {
        use super::*;
        use std::env;
        use std::sync::Mutex;

        /// Environment variables are process-global, so tests modifying them must not run in parallel.
        static ENV_MUTEX: Mutex<()> = Mutex::new(());

        fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
        where
            F: FnOnce() -> R,
        {
            let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

            let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();

            for (key, value) in vars {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            let result = f();

            for (key, value) in saved {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            result
        }

        #[test]
        fn test_supports_color_no_color_set() {
            with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
                assert!(!supports_color(), "NO_COLOR=1 should disable colors");
            });
        }

        #[test]
        fn test_supports_color_term_dumb() {
            with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
                assert!(!supports_color(), "TERM=dumb should disable colors");
            });
        }

        #[test]
        fn test_supports_color_default() {
            with_env_vars(
                &[("NO_COLOR", None), ("TERM", Some("xterm-256color"))],
                || {
                    assert!(supports_color(), "Normal terminal should support colors");
                },
            );
        }
    }
}
