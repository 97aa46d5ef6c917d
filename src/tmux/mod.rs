mod client;

pub use client::TmuxClient;

/// Direction of a pane split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// Side by side: the new pane appears to the right of the target.
    Horizontal,
    /// Stacked: the new pane appears below the target.
    Vertical,
}

/// Scope of a style option: a single pane, the window containing a pane,
/// or a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleScope<'a> {
    Pane(&'a str),
    Window(&'a str),
    Session(&'a str),
}

/// Imperative pane/window/session primitives of the terminal multiplexer.
///
/// Failure is data, not an error: a split that produces no pane returns
/// `None`, a kill that misses returns `false`, and style or environment
/// calls that fail are silent. Callers aggregate partial results instead
/// of aborting.
pub trait MultiplexerDriver {
    /// Whether the multiplexer server is reachable at all. Availability is
    /// global; there is no per-pane notion of being unavailable.
    fn is_available(&self) -> bool;

    /// Split `target`, optionally giving the new pane `percent` of the
    /// resulting space and an initial command. Returns the new pane id.
    fn split_pane(
        &self,
        target: &str,
        direction: SplitDirection,
        percent: Option<u8>,
        command: Option<&str>,
    ) -> Option<String>;

    /// Kill a pane by id. Returns `true` if the pane was killed.
    fn kill_pane(&self, pane_id: &str) -> bool;

    /// Whether a pane with this id currently exists.
    fn pane_exists(&self, pane_id: &str) -> bool;

    /// Resize a pane to explicit column/row dimensions.
    fn resize_pane(&self, pane_id: &str, width: u32, height: u32);

    /// Apply the even-horizontal layout normalization to the current window.
    fn even_horizontal(&self);

    /// Set a named style option at the given scope.
    fn set_option(&self, scope: StyleScope<'_>, name: &str, value: &str);

    /// Unset a named style option at the given scope.
    fn unset_option(&self, scope: StyleScope<'_>, name: &str);

    /// Set a session-scoped environment variable.
    fn set_environment(&self, session: &str, name: &str, value: &str);

    /// Unset a session-scoped environment variable.
    fn unset_environment(&self, session: &str, name: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{MultiplexerDriver, SplitDirection, StyleScope};
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Every driver interaction, flattened for assertions.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Split {
            target: String,
            direction: SplitDirection,
            percent: Option<u8>,
            command: Option<String>,
        },
        Kill(String),
        Resize {
            pane: String,
            width: u32,
            height: u32,
        },
        EvenHorizontal,
        SetOption {
            scope: String,
            name: String,
            value: String,
        },
        UnsetOption {
            scope: String,
            name: String,
        },
        SetEnv {
            session: String,
            name: String,
            value: String,
        },
        UnsetEnv {
            session: String,
            name: String,
        },
    }

    fn scope_key(scope: StyleScope<'_>) -> String {
        match scope {
            StyleScope::Pane(t) => format!("pane:{t}"),
            StyleScope::Window(t) => format!("window:{t}"),
            StyleScope::Session(t) => format!("session:{t}"),
        }
    }

    /// In-memory driver that records every call and mints sequential pane
    /// ids (`%1`, `%2`, ...). Splits listed in `fail_splits` (0-based
    /// attempt index) return no pane, for exercising partial layouts.
    pub struct RecordingDriver {
        pub available: bool,
        pub existing: RefCell<HashSet<String>>,
        pub calls: RefCell<Vec<Call>>,
        pub fail_splits: HashSet<usize>,
        next_id: RefCell<u32>,
        split_attempts: RefCell<usize>,
    }

    impl RecordingDriver {
        pub fn new() -> Self {
            Self {
                available: true,
                existing: RefCell::new(HashSet::new()),
                calls: RefCell::new(Vec::new()),
                fail_splits: HashSet::new(),
                next_id: RefCell::new(0),
                split_attempts: RefCell::new(0),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::new()
            }
        }

        pub fn with_panes(ids: &[&str]) -> Self {
            let driver = Self::new();
            driver
                .existing
                .borrow_mut()
                .extend(ids.iter().map(|s| s.to_string()));
            driver
        }

        pub fn split_count(&self) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, Call::Split { .. }))
                .count()
        }

        pub fn kills(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .filter_map(|c| match c {
                    Call::Kill(id) => Some(id.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl MultiplexerDriver for RecordingDriver {
        fn is_available(&self) -> bool {
            self.available
        }

        fn split_pane(
            &self,
            target: &str,
            direction: SplitDirection,
            percent: Option<u8>,
            command: Option<&str>,
        ) -> Option<String> {
            self.calls.borrow_mut().push(Call::Split {
                target: target.to_string(),
                direction,
                percent,
                command: command.map(|c| c.to_string()),
            });
            let attempt = *self.split_attempts.borrow();
            *self.split_attempts.borrow_mut() += 1;
            if self.fail_splits.contains(&attempt) {
                return None;
            }
            *self.next_id.borrow_mut() += 1;
            let id = format!("%{}", self.next_id.borrow());
            self.existing.borrow_mut().insert(id.clone());
            Some(id)
        }

        fn kill_pane(&self, pane_id: &str) -> bool {
            self.calls.borrow_mut().push(Call::Kill(pane_id.to_string()));
            self.existing.borrow_mut().remove(pane_id)
        }

        fn pane_exists(&self, pane_id: &str) -> bool {
            self.existing.borrow().contains(pane_id)
        }

        fn resize_pane(&self, pane_id: &str, width: u32, height: u32) {
            self.calls.borrow_mut().push(Call::Resize {
                pane: pane_id.to_string(),
                width,
                height,
            });
        }

        fn even_horizontal(&self) {
            self.calls.borrow_mut().push(Call::EvenHorizontal);
        }

        fn set_option(&self, scope: StyleScope<'_>, name: &str, value: &str) {
            self.calls.borrow_mut().push(Call::SetOption {
                scope: scope_key(scope),
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        fn unset_option(&self, scope: StyleScope<'_>, name: &str) {
            self.calls.borrow_mut().push(Call::UnsetOption {
                scope: scope_key(scope),
                name: name.to_string(),
            });
        }

        fn set_environment(&self, session: &str, name: &str, value: &str) {
            self.calls.borrow_mut().push(Call::SetEnv {
                session: session.to_string(),
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        fn unset_environment(&self, session: &str, name: &str) {
            self.calls.borrow_mut().push(Call::UnsetEnv {
                session: session.to_string(),
                name: name.to_string(),
            });
        }
    }
}
