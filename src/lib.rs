//! Pane layout and color engines for a tmux-backed AI agent session viewer.
//!
//! The viewer keeps one fixed "control" pane (the TUI itself) alongside up
//! to five session panes, each hosting one agent session inside a tmux
//! window. This crate owns two independent pieces of that picture:
//!
//! - the **layout engine** ([`layout`]): turns a session count into a
//!   declarative grid, computes concrete pane rectangles, fingerprints the
//!   structural shape of a layout, and materializes it as an ordered
//!   sequence of tmux splits;
//! - the **color engine** ([`color`]): resolves the terminal's baseline
//!   background, blends per-agent haze colors into it for each pane state,
//!   and pushes the resulting styles onto panes.
//!
//! Both engines talk to tmux only through the [`tmux::MultiplexerDriver`]
//! trait and degrade to no-ops when no driver is reachable. Deciding *when*
//! to re-layout or re-theme belongs to the surrounding controller, not to
//! this crate.

pub mod color;
pub mod layout;
pub mod tmux;

pub use color::{
    active_pane_bg, agent_haze_color, agent_pane_bg, apply_pane_color, apply_tui_pane_color,
    clear_pane_color, inactive_pane_bg, reset_terminal_background, status_accent_bg,
    terminal_background, tree_selected_pane_bg, tui_inactive_bg, AgentKind, PaneColorOptions,
    ThemeMode,
};
pub use layout::{
    apply_layout, calculate_layout, layout_signature, render_layout, LayoutGrid, PaneRect,
    PaneSize, RenderResult, SessionPaneSpec,
};
pub use tmux::{MultiplexerDriver, SplitDirection, StyleScope, TmuxClient};
