use super::ThemeMode;

/// Known agent identities. Anything we cannot recognize maps to `Shell`,
/// the safe default, so color lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgentKind {
    Claude,
    Codex,
    Gemini,
    Aider,
    Opencode,
    #[default]
    Shell,
}

impl AgentKind {
    /// Resolve an agent name (e.g. the command or session label the
    /// controller knows it by) to an identity. Case-insensitive substring
    /// match; unrecognized names fall back to `Shell`.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("claude") {
            AgentKind::Claude
        } else if lower.contains("codex") {
            AgentKind::Codex
        } else if lower.contains("gemini") {
            AgentKind::Gemini
        } else if lower.contains("aider") {
            AgentKind::Aider
        } else if lower.contains("opencode") {
            AgentKind::Opencode
        } else {
            AgentKind::Shell
        }
    }

    /// Display name for legend/key UIs.
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Claude => "Claude",
            AgentKind::Codex => "Codex",
            AgentKind::Gemini => "Gemini",
            AgentKind::Aider => "Aider",
            AgentKind::Opencode => "OpenCode",
            AgentKind::Shell => "Shell",
        }
    }
}

/// Per-agent color triple: plain foreground plus the haze base color for
/// each theme mode.
#[derive(Debug, Clone, Copy)]
pub struct AgentColors {
    pub normal: &'static str,
    pub haze_dark: &'static str,
    pub haze_light: &'static str,
}

impl AgentColors {
    pub fn haze(&self, mode: ThemeMode) -> &'static str {
        match mode {
            ThemeMode::Dark => self.haze_dark,
            ThemeMode::Light => self.haze_light,
        }
    }
}

/// Static color token table, one entry per identity.
pub fn agent_colors(kind: AgentKind) -> &'static AgentColors {
    match kind {
        AgentKind::Claude => &AgentColors {
            normal: "#d97757",
            haze_dark: "#8a4b2f",
            haze_light: "#f0c4ad",
        },
        AgentKind::Codex => &AgentColors {
            normal: "#10a37f",
            haze_dark: "#0d6b54",
            haze_light: "#b5e3d4",
        },
        AgentKind::Gemini => &AgentColors {
            normal: "#4796e3",
            haze_dark: "#2c5d8f",
            haze_light: "#c2dcf5",
        },
        AgentKind::Aider => &AgentColors {
            normal: "#3fb950",
            haze_dark: "#2a6b38",
            haze_light: "#c8ecd0",
        },
        AgentKind::Opencode => &AgentColors {
            normal: "#e0af68",
            haze_dark: "#8f6f3a",
            haze_light: "#f3e2bd",
        },
        AgentKind::Shell => &AgentColors {
            normal: "#9e9e9e",
            haze_dark: "#4d4d4d",
            haze_light: "#d9d9d9",
        },
    }
}

/// Baseline backgrounds per theme mode.
pub const DARK_DEFAULT_BG: &str = "#000000";
pub const LIGHT_DEFAULT_BG: &str = "#fdf6e3";

/// How far the mode default is pulled toward a valid terminal background
/// hint from the environment.
pub const TERM_BG_HINT_WEIGHT: f64 = 0.8;

/// Haze fraction per pane state. Active panes stay at pure terminal
/// background so the focused pane reads as clean.
pub const HAZE_INACTIVE: f64 = 0.22;
pub const HAZE_TREE_SELECTED: f64 = 0.12;
pub const HAZE_ACTIVE: f64 = 0.0;
pub const HAZE_STATUS_ACCENT: f64 = 0.08;

/// Control-pane dimming blends toward pure white (dark mode) or pure
/// black (light mode), not toward an agent haze.
pub const TUI_INACTIVE_DARK: f64 = 0.04;
pub const TUI_INACTIVE_LIGHT: f64 = 0.06;

/// Theming levels at or below this force `NO_COLOR` into the embedded
/// session.
pub const PEACEFUL_THEMING_LEVEL: u8 = 1;
