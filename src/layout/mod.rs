//! Layout engine: grid specs to pane rectangles and tmux split sequences.
//!
//! A layout is declared as a static grid (see [`LayoutSpec`]), evaluated into
//! concrete geometry by [`calculate_layout`], fingerprinted by
//! [`layout_signature`], and materialized against a live tmux window by
//! [`render_layout`]. [`apply_layout`] is the cheap resize-only path for
//! when the structural shape has not changed.

mod specs;

pub use specs::{layout_spec, LayoutCell, LayoutSpec};

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::tmux::{MultiplexerDriver, SplitDirection};

/// Most session panes a window can hold alongside the control pane.
pub const MAX_SESSION_PANES: usize = 5;

/// Sentinel standing in for "a preview slot exists" in layout signatures.
/// The previewed session's id deliberately never appears.
const PREVIEW_SENTINEL: &str = "__preview__";

/// Width and height of the control pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneSize {
    pub width: u32,
    pub height: u32,
}

/// Geometry of one session pane. `col` is zero-indexed among session
/// columns; the control column is excluded from this indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRect {
    pub row: usize,
    pub col: usize,
    pub width: u32,
    pub height: u32,
}

/// Result of evaluating a layout spec against concrete window dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGrid {
    pub tui_pane: PaneSize,
    /// One rect per session, in session-index order.
    pub session_panes: Vec<PaneRect>,
    pub rows: usize,
    /// Grid columns including the control column.
    pub cols: usize,
}

/// One session to place during [`render_layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaneSpec {
    pub session_id: String,
    /// Initial command for the new pane; empty means the default shell.
    pub command: String,
    /// Pinned to a dedicated pane, as opposed to the rotating preview slot.
    pub is_sticky: bool,
}

/// Panes created by [`render_layout`], keyed by session id. The caller
/// owns this and must keep it around for future teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub pane_map: HashMap<String, String>,
    pub tui_pane_id: String,
}

/// Evaluate the layout for `session_count` sessions against a window of
/// the given dimensions. Pure; returns `None` only when no spec covers
/// the resulting total pane count.
///
/// The control pane takes 40% of the width for layouts with up to two
/// session columns and 33% for three; the remainder is split evenly
/// across the session columns. With no sessions at all the control pane
/// takes the whole window.
pub fn calculate_layout(
    session_count: usize,
    window_width: u32,
    window_height: u32,
) -> Option<LayoutGrid> {
    let total = 1 + session_count.min(MAX_SESSION_PANES);
    let spec = layout_spec(total)?;

    let session_cols = spec.cols - 1;
    let tui_width = if session_cols == 0 {
        window_width
    } else if session_cols <= 2 {
        (window_width as f64 * 0.4).floor() as u32
    } else {
        (window_width as f64 * 0.33).floor() as u32
    };
    let session_width = if session_cols == 0 {
        0
    } else {
        window_width.saturating_sub(tui_width) / session_cols as u32
    };
    let row_height = window_height / spec.rows as u32;

    let mut session_panes: Vec<(u8, PaneRect)> = Vec::with_capacity(total - 1);
    for (row_idx, row) in spec.grid.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if let LayoutCell::Session(n) = cell {
                session_panes.push((
                    *n,
                    PaneRect {
                        row: row_idx,
                        col: col_idx - 1,
                        width: session_width,
                        height: row_height,
                    },
                ));
            }
        }
    }
    session_panes.sort_by_key(|(n, _)| *n);

    Some(LayoutGrid {
        tui_pane: PaneSize {
            width: tui_width,
            height: window_height,
        },
        session_panes: session_panes.into_iter().map(|(_, rect)| rect).collect(),
        rows: spec.rows,
        cols: spec.cols,
    })
}

/// Structural fingerprint of the layout implied by a sticky set and an
/// optional preview session.
///
/// A preview id already present among the sticky ids adds no slot; the
/// session is on screen either way. The previewed session's identity never
/// enters the signature, only whether a preview slot exists, so swapping
/// the previewed session keeps the signature stable and lets the caller
/// respawn pane content instead of rebuilding the grid. Returns the empty
/// string when no spec covers the implied pane count.
pub fn layout_signature(sticky_ids: &[&str], preview_id: Option<&str>) -> String {
    let effective_preview = preview_id
        .filter(|p| !p.is_empty() && !sticky_ids.contains(p))
        .is_some();

    let total = 1 + sticky_ids.len() + usize::from(effective_preview);
    let Some(spec) = layout_spec(total) else {
        return String::new();
    };

    let mut structural_keys: Vec<&str> = sticky_ids.to_vec();
    if effective_preview {
        structural_keys.push(PREVIEW_SENTINEL);
    }

    serde_json::to_string(&(spec.rows, spec.cols, spec.grid, structural_keys))
        .unwrap_or_default()
}

/// Tear down the previous session panes and split the window into the
/// layout for `session_specs`, returning the new pane map.
///
/// Splits run strictly in order: the top row chains left to right off the
/// control pane, then each bottom-row pane splits down from the pane above
/// it. A failed split omits its session (and anything that would have
/// chained off it) from the map rather than aborting; the caller inspects
/// the result for completeness. Specs beyond [`MAX_SESSION_PANES`] are
/// silently dropped.
pub fn render_layout(
    driver: &dyn MultiplexerDriver,
    tui_pane_id: &str,
    session_specs: &[SessionPaneSpec],
    existing_panes: &[String],
) -> Option<RenderResult> {
    if !driver.is_available() || tui_pane_id.is_empty() {
        return None;
    }

    // The control pane is never destroyed, even if listed.
    let mut seen: HashSet<&str> = HashSet::new();
    for pane_id in existing_panes {
        if pane_id == tui_pane_id || !seen.insert(pane_id) {
            continue;
        }
        if driver.pane_exists(pane_id) {
            driver.kill_pane(pane_id);
        }
    }

    let specs = &session_specs[..session_specs.len().min(MAX_SESSION_PANES)];
    let total = 1 + specs.len();
    let spec = layout_spec(total)?;
    let session_cols = spec.cols - 1;
    debug!(total, rows = spec.rows, cols = spec.cols, "rendering layout");

    let mut pane_map: HashMap<String, String> = HashMap::new();
    let mut top_panes: Vec<Option<String>> = vec![None; spec.cols];
    top_panes[0] = Some(tui_pane_id.to_string());

    // Top row: chain horizontal splits left to right. Small two-column
    // layouts give the new pane 60%, favoring the control pane; everything
    // else takes the driver's default split.
    for col in 1..spec.cols {
        let LayoutCell::Session(idx) = spec.grid[0][col] else {
            continue;
        };
        let Some(session) = specs.get(idx as usize - 1) else {
            continue;
        };
        let Some(source) = top_panes[col - 1].clone() else {
            warn!(col, "no source pane for column, skipping");
            continue;
        };
        let percent = if spec.cols == 2 && total <= 3 {
            Some(60)
        } else {
            None
        };
        let command = (!session.command.is_empty()).then_some(session.command.as_str());
        match driver.split_pane(&source, SplitDirection::Horizontal, percent, command) {
            Some(pane_id) => {
                pane_map.insert(session.session_id.clone(), pane_id.clone());
                top_panes[col] = Some(pane_id);
            }
            None => warn!(session = %session.session_id, "top-row split failed"),
        }
    }

    // Chained splits leave three session columns uneven; normalize.
    if session_cols == 3 {
        driver.even_horizontal();
    }

    // Bottom row: split down from each column's top pane.
    if spec.rows > 1 {
        for col in 1..spec.cols {
            let LayoutCell::Session(idx) = spec.grid[1][col] else {
                continue;
            };
            let Some(session) = specs.get(idx as usize - 1) else {
                continue;
            };
            let Some(source) = top_panes[col].clone() else {
                continue;
            };
            let command = (!session.command.is_empty()).then_some(session.command.as_str());
            match driver.split_pane(&source, SplitDirection::Vertical, None, command) {
                Some(pane_id) => {
                    pane_map.insert(session.session_id.clone(), pane_id);
                }
                None => warn!(session = %session.session_id, "bottom-row split failed"),
            }
        }
    }

    Some(RenderResult {
        pane_map,
        tui_pane_id: tui_pane_id.to_string(),
    })
}

/// Resize existing panes to a freshly computed grid without creating or
/// destroying anything. `pane_ids[0]` is the control pane; the rest map
/// positionally onto `grid.session_panes`.
pub fn apply_layout(driver: &dyn MultiplexerDriver, grid: &LayoutGrid, pane_ids: &[String]) {
    if pane_ids.is_empty() || !driver.is_available() {
        return;
    }
    driver.resize_pane(&pane_ids[0], grid.tui_pane.width, grid.tui_pane.height);
    for (i, rect) in grid.session_panes.iter().enumerate() {
        if let Some(pane_id) = pane_ids.get(i + 1) {
            driver.resize_pane(pane_id, rect.width, rect.height);
        }
    }
}
