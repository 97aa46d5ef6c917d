use serde::ser::{Serialize, Serializer};

/// One cell of a declarative layout grid.
///
/// `Control` marks the fixed TUI pane, `Session(n)` a 1-based session
/// slot, and `Empty` a session cell left unused by that grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCell {
    Control,
    Session(u8),
    Empty,
}

// Signature wire shape: "T" / integer / null.
impl Serialize for LayoutCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LayoutCell::Control => serializer.serialize_str("T"),
            LayoutCell::Session(n) => serializer.serialize_u8(*n),
            LayoutCell::Empty => serializer.serialize_unit(),
        }
    }
}

/// Static description of one supported layout, keyed by total pane count.
///
/// `cols` counts grid columns including the control column (column 0);
/// session columns are `cols - 1`.
#[derive(Debug, Clone, Copy)]
pub struct LayoutSpec {
    pub rows: usize,
    pub cols: usize,
    pub grid: &'static [&'static [LayoutCell]],
}

use LayoutCell::{Control as T, Empty as E, Session};

/// The fixed layout family: 1 control pane plus 0-5 session panes.
/// Index = total pane count - 1.
static SPECS: [LayoutSpec; 6] = [
    LayoutSpec {
        rows: 1,
        cols: 1,
        grid: &[&[T]],
    },
    LayoutSpec {
        rows: 1,
        cols: 2,
        grid: &[&[T, Session(1)]],
    },
    LayoutSpec {
        rows: 2,
        cols: 2,
        grid: &[&[T, Session(1)], &[T, Session(2)]],
    },
    LayoutSpec {
        rows: 2,
        cols: 3,
        grid: &[&[T, Session(1), Session(2)], &[T, Session(3), E]],
    },
    LayoutSpec {
        rows: 2,
        cols: 3,
        grid: &[&[T, Session(1), Session(2)], &[T, Session(3), Session(4)]],
    },
    LayoutSpec {
        rows: 2,
        cols: 4,
        grid: &[
            &[T, Session(1), Session(2), Session(3)],
            &[T, Session(4), Session(5), E],
        ],
    },
];

/// Look up the layout spec for a total pane count, if one exists.
pub fn layout_spec(total_panes: usize) -> Option<&'static LayoutSpec> {
    if total_panes == 0 {
        return None;
    }
    SPECS.get(total_panes - 1)
}
