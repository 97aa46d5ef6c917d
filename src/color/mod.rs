//! Color engine: terminal background detection and per-agent pane styling.
//!
//! Every pane gets its background from the same recipe: take the
//! terminal's baseline background, blend the occupying agent's haze color
//! into it at a state-specific fraction, and push the result onto the pane
//! as tmux window styles. The baseline itself is resolved once from an
//! environment hint and cached process-wide until explicitly reset.

mod tokens;

pub use tokens::{agent_colors, AgentColors, AgentKind};

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::tmux::{MultiplexerDriver, StyleScope};
use tokens::{
    DARK_DEFAULT_BG, HAZE_ACTIVE, HAZE_INACTIVE, HAZE_STATUS_ACCENT, HAZE_TREE_SELECTED,
    LIGHT_DEFAULT_BG, PEACEFUL_THEMING_LEVEL, TERM_BG_HINT_WEIGHT, TUI_INACTIVE_DARK,
    TUI_INACTIVE_LIGHT,
};

/// Environment variable carrying an optional `#RRGGBB` hint for the
/// terminal's real background color.
pub const TERM_BG_ENV: &str = "PANEVIEW_TERM_BG";

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a #RRGGBB color: {0:?}")]
pub struct ParseColorError(String);

/// A 24-bit color, parsed from and formatted as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Strict parse: exactly `#` plus six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        if !HEX_COLOR.is_match(hex) {
            return Err(ParseColorError(hex.to_string()));
        }
        let r = u8::from_str_radix(&hex[1..3], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[3..5], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[5..7], 16).unwrap_or(0);
        Ok(Self { r, g, b })
    }

    /// Linear blend toward `other`: 0.0 is pure `self`, 1.0 pure `other`.
    pub fn blend(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            (a as f64 + (b as f64 - a as f64) * t).round() as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Blend two hex colors; malformed input degrades to the base color.
fn blend_hex(base: &str, toward: &str, t: f64) -> String {
    match (Rgb::from_hex(base), Rgb::from_hex(toward)) {
        (Ok(a), Ok(b)) => a.blend(b, t).to_string(),
        _ => base.to_string(),
    }
}

/// Terminal appearance mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// Detect the mode from the environment's background hint. A valid
    /// hint decides by average channel brightness; anything else is dark.
    pub fn detect() -> Self {
        Self::from_hint(std::env::var(TERM_BG_ENV).ok().as_deref())
    }

    fn from_hint(hint: Option<&str>) -> Self {
        match hint.and_then(|h| Rgb::from_hex(h).ok()) {
            Some(rgb) => {
                let avg = (rgb.r as u16 + rgb.g as u16 + rgb.b as u16) / 3;
                if avg < 128 {
                    ThemeMode::Dark
                } else {
                    ThemeMode::Light
                }
            }
            None => ThemeMode::Dark,
        }
    }

    fn default_bg(self) -> &'static str {
        match self {
            ThemeMode::Dark => DARK_DEFAULT_BG,
            ThemeMode::Light => LIGHT_DEFAULT_BG,
        }
    }
}

/// Lazily resolved, explicitly invalidated terminal background.
///
/// Lifecycle: uninitialized, then resolved-and-cached on first access,
/// until [`BackgroundCache::reset`] clears it for re-resolution. The
/// process-wide instance backs [`terminal_background`]; tests use their
/// own instances with explicit hints.
pub struct BackgroundCache {
    slot: Mutex<Option<String>>,
}

impl BackgroundCache {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Resolved background, reading the hint from the environment.
    pub fn get(&self) -> String {
        self.get_with_hint(std::env::var(TERM_BG_ENV).ok().as_deref())
    }

    /// Resolved background for an explicit hint. The hint is consulted
    /// only while the cache is empty; once resolved, the cached value
    /// wins until reset.
    pub fn get_with_hint(&self, hint: Option<&str>) -> String {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = slot.as_ref() {
            return cached.clone();
        }
        let resolved = resolve_background(hint);
        debug!(background = %resolved, "terminal background resolved");
        *slot = Some(resolved.clone());
        resolved
    }

    /// Forget the cached value; the next access re-resolves from scratch.
    pub fn reset(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl Default for BackgroundCache {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_background(hint: Option<&str>) -> String {
    let mode = ThemeMode::from_hint(hint);
    let default = mode.default_bg();
    match hint {
        Some(h) if HEX_COLOR.is_match(h) => blend_hex(default, h, TERM_BG_HINT_WEIGHT),
        _ => default.to_string(),
    }
}

static TERMINAL_BG: BackgroundCache = BackgroundCache::new();

/// The terminal's baseline background as `#rrggbb`, cached process-wide
/// after the first call. The environment is not re-read until
/// [`reset_terminal_background`].
pub fn terminal_background() -> String {
    TERMINAL_BG.get()
}

/// Drop the cached background. Call after any signal that the terminal's
/// appearance changed; staleness detection is the caller's job.
pub fn reset_terminal_background() {
    TERMINAL_BG.reset()
}

/// Background for a pane occupied by `agent`, hazed at `haze_percent`
/// (0.0 = pure terminal background, 1.0 = pure haze color).
pub fn agent_pane_bg(agent: &str, haze_percent: f64) -> String {
    let kind = AgentKind::from_name(agent);
    let haze = agent_colors(kind).haze(ThemeMode::detect());
    blend_hex(&terminal_background(), haze, haze_percent)
}

/// Background for an unfocused session pane: the strongest visible tint.
pub fn inactive_pane_bg(agent: &str) -> String {
    agent_pane_bg(agent, HAZE_INACTIVE)
}

/// Background for the pane whose session is selected in the tree.
pub fn tree_selected_pane_bg(agent: &str) -> String {
    agent_pane_bg(agent, HAZE_TREE_SELECTED)
}

/// Background for the focused pane: pure terminal background, so the
/// active pane reads as clean.
pub fn active_pane_bg(agent: &str) -> String {
    agent_pane_bg(agent, HAZE_ACTIVE)
}

/// Very subtle tint for status-bar accents.
pub fn status_accent_bg(agent: &str) -> String {
    agent_pane_bg(agent, HAZE_STATUS_ACCENT)
}

/// Dimmed background for the control pane itself. Blends toward pure
/// white in dark mode and pure black in light mode rather than toward an
/// agent haze.
pub fn tui_inactive_bg() -> String {
    let bg = terminal_background();
    match ThemeMode::detect() {
        ThemeMode::Dark => blend_hex(&bg, "#ffffff", TUI_INACTIVE_DARK),
        ThemeMode::Light => blend_hex(&bg, "#000000", TUI_INACTIVE_LIGHT),
    }
}

/// Raw haze color for an agent in the current mode, unblended. For
/// legend/key UIs; pane states go through [`agent_pane_bg`].
pub fn agent_haze_color(agent: &str) -> String {
    agent_colors(AgentKind::from_name(agent))
        .haze(ThemeMode::detect())
        .to_string()
}

/// Options for [`apply_pane_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneColorOptions {
    pub is_tree_selected: bool,
    pub theming_enabled: bool,
    /// Levels at or below the peaceful threshold force `NO_COLOR` into
    /// the embedded session.
    pub theming_level: u8,
}

impl Default for PaneColorOptions {
    fn default() -> Self {
        Self {
            is_tree_selected: false,
            theming_enabled: true,
            theming_level: 3,
        }
    }
}

/// Style one session pane for its occupying agent.
///
/// Sets the unfocused and focused window styles (or clears them when
/// theming is disabled), always turns off the embedded session's own
/// status bar, and manages the peaceful-mode `NO_COLOR` override. No-op
/// when the driver is unavailable.
pub fn apply_pane_color(
    driver: &dyn MultiplexerDriver,
    pane_id: &str,
    agent_type: &str,
    tmux_session_name: &str,
    opts: &PaneColorOptions,
) {
    if !driver.is_available() {
        return;
    }

    if opts.theming_enabled {
        let fg = agent_colors(AgentKind::from_name(agent_type)).normal;
        let unfocused = if opts.is_tree_selected {
            tree_selected_pane_bg(agent_type)
        } else {
            inactive_pane_bg(agent_type)
        };
        let focused = active_pane_bg(agent_type);
        driver.set_option(
            StyleScope::Pane(pane_id),
            "window-style",
            &format!("fg={fg},bg={unfocused}"),
        );
        driver.set_option(
            StyleScope::Pane(pane_id),
            "window-active-style",
            &format!("fg={fg},bg={focused}"),
        );
    } else {
        driver.unset_option(StyleScope::Pane(pane_id), "window-style");
        driver.unset_option(StyleScope::Pane(pane_id), "window-active-style");
    }

    // The embedded session must never show its own status line, themed or
    // not.
    driver.set_option(StyleScope::Session(tmux_session_name), "status", "off");

    if opts.theming_level <= PEACEFUL_THEMING_LEVEL {
        driver.set_environment(tmux_session_name, "NO_COLOR", "1");
    } else {
        // Explicit unset so an earlier peaceful-mode setting cannot linger.
        driver.unset_environment(tmux_session_name, "NO_COLOR");
    }
}

/// Style (or unstyle) the control pane itself, border included, so an
/// unfocused control pane dims together with its border.
pub fn apply_tui_pane_color(
    driver: &dyn MultiplexerDriver,
    tui_pane_id: &str,
    theming_enabled: bool,
) {
    if !driver.is_available() {
        return;
    }

    if theming_enabled {
        let inactive = tui_inactive_bg();
        let active = terminal_background();
        driver.set_option(
            StyleScope::Pane(tui_pane_id),
            "window-style",
            &format!("bg={inactive}"),
        );
        driver.set_option(
            StyleScope::Pane(tui_pane_id),
            "window-active-style",
            &format!("bg={active}"),
        );
        driver.set_option(
            StyleScope::Window(tui_pane_id),
            "pane-border-style",
            &format!("fg={inactive}"),
        );
        driver.set_option(
            StyleScope::Window(tui_pane_id),
            "pane-active-border-style",
            &format!("fg={inactive}"),
        );
    } else {
        driver.unset_option(StyleScope::Pane(tui_pane_id), "window-style");
        driver.unset_option(StyleScope::Pane(tui_pane_id), "window-active-style");
        driver.unset_option(StyleScope::Window(tui_pane_id), "pane-border-style");
        driver.unset_option(StyleScope::Window(tui_pane_id), "pane-active-border-style");
    }
}

/// Reset a pane's focused/unfocused styles to driver defaults,
/// independent of any options path.
pub fn clear_pane_color(driver: &dyn MultiplexerDriver, pane_id: &str) {
    if !driver.is_available() {
        return;
    }
    driver.unset_option(StyleScope::Pane(pane_id), "window-style");
    driver.unset_option(StyleScope::Pane(pane_id), "window-active-style");
}
