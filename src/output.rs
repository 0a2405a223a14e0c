//! # Terminal Output
//!
//! Decides whether the run summary printed by the CLI may use emoji markers
//! or must fall back to bracketed plain-text tags such as `[OK]`.
//!
//! The decision combines the `--color` flag with the usual environment
//! conventions: `NO_COLOR` (any value), `CLICOLOR=0`, `CLICOLOR_FORCE`,
//! `TERM=dumb`, and finally whether stdout is a terminal at all.
//!
//! ```
//! use tb_rest_merge::output::{emoji, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("never");
//! assert_eq!(emoji(&out, "✅", "[OK]"), "[OK]");
//! ```

use std::env;

/// Whether decorated output is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag (`always`, `never`, `auto`) against the
    /// environment. Unknown values behave like `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = if color_flag.eq_ignore_ascii_case("always") {
            true
        } else if color_flag.eq_ignore_ascii_case("never") {
            false
        } else {
            Self::terminal_supports_color()
        };
        Self { use_color }
    }

    fn terminal_supports_color() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        match env::var("CLICOLOR") {
            Ok(v) if v == "0" => return false,
            _ => {}
        }
        match env::var("CLICOLOR_FORCE") {
            Ok(v) if !v.is_empty() && v != "0" => return true,
            _ => {}
        }
        if env::var("TERM").is_ok_and(|term| term == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Pick the emoji marker or its plain-text tag.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
