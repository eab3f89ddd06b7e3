//! Interactive pagination session.
//!
//! A per-invocation state machine that walks a fixed-size paging of a result
//! list under a hard deadline. Only the actor that opened the session may
//! turn pages; anyone else gets an ephemeral rejection and the view is left
//! alone. Transition events arrive asynchronously over the session's
//! lifetime, so the deadline and the owner check are re-evaluated on every
//! event, not only the first.

use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Direction of a requested page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTurn {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Terminal; late requests are ignored.
    Closed,
}

/// What one transition request produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The page index changed; re-render the view.
    Moved,
    /// Already at the edge; nothing to redraw.
    Unchanged,
    /// The requester is not the session owner. Send them an ephemeral
    /// notice; the owner's view is untouched.
    RejectedForeignActor,
    /// The deadline passed or the session was already closed.
    Expired,
}

/// Collaborator owning the rendered view. The session asks it to drop
/// interactive controls when closing; the underlying message may already be
/// gone, so failures are swallowed.
pub trait ControlSurface {
    fn clear_controls(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Surface for callers with nothing to clean up.
pub struct NoControls;

impl ControlSurface for NoControls {
    fn clear_controls(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// One rendered page plus the data for its stable footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> PageView<'_, T> {
    /// Stable human-readable footer, e.g. `Page 2/3 | Total: 57 items`.
    pub fn footer(&self) -> String {
        format!(
            "Page {}/{} | Total: {} items",
            self.page, self.total_pages, self.total_items
        )
    }
}

pub struct PagerSession<T> {
    items: Vec<T>,
    page_size: usize,
    current: usize,
    owner: String,
    state: SessionState,
    deadline_ms: u64,
    controls_cleared: bool,
}

impl<T> PagerSession<T> {
    /// Open a session with the default page size and timeout.
    pub fn new(items: Vec<T>, owner: impl Into<String>, opened_at_ms: u64) -> Self {
        Self::with_options(
            items,
            owner,
            opened_at_ms,
            DEFAULT_PAGE_SIZE,
            DEFAULT_SESSION_TIMEOUT,
        )
    }

    /// Open a session. When everything fits on one page no interactive
    /// controls exist and the session is immediately closed after the first
    /// render; otherwise it stays active until the deadline.
    pub fn with_options(
        items: Vec<T>,
        owner: impl Into<String>,
        opened_at_ms: u64,
        page_size: usize,
        timeout: Duration,
    ) -> Self {
        assert!(page_size > 0, "page size must be positive");
        let single_page = items.len() <= page_size;
        Self {
            items,
            page_size,
            current: 0,
            owner: owner.into(),
            state: if single_page {
                SessionState::Closed
            } else {
                SessionState::Active
            },
            deadline_ms: opened_at_ms + timeout.as_millis() as u64,
            // A single-page session never rendered controls, so there is
            // nothing to clear on close.
            controls_cleared: single_page,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the rendered view currently carries interactive controls.
    pub fn has_controls(&self) -> bool {
        self.state == SessionState::Active
    }

    /// 0-based index of the current page.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// The current page with its footer data. Always renderable, even for
    /// an empty result list (one empty page).
    pub fn view(&self) -> PageView<'_, T> {
        let start = self.current * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        PageView {
            items: &self.items[start.min(self.items.len())..end],
            page: self.current + 1,
            total_pages: self.total_pages(),
            total_items: self.items.len(),
        }
    }

    /// Apply one incoming transition event.
    ///
    /// The deadline is checked first: a late event closes the session
    /// (clearing controls at most once) and is otherwise ignored. Foreign
    /// actors are rejected without touching the page index. Edge turns are
    /// no-ops that leave the session active.
    pub fn handle_turn(
        &mut self,
        actor: &str,
        turn: PageTurn,
        now_ms: u64,
        surface: &mut dyn ControlSurface,
    ) -> TurnOutcome {
        if self.state == SessionState::Closed {
            return TurnOutcome::Expired;
        }
        if now_ms >= self.deadline_ms {
            self.close(surface);
            return TurnOutcome::Expired;
        }
        if actor != self.owner {
            debug!(actor, owner = %self.owner, "page turn rejected: not the session owner");
            return TurnOutcome::RejectedForeignActor;
        }
        let moved = match turn {
            PageTurn::Prev if self.current > 0 => {
                self.current -= 1;
                true
            }
            PageTurn::Next if self.current + 1 < self.total_pages() => {
                self.current += 1;
                true
            }
            _ => false,
        };
        if moved {
            TurnOutcome::Moved
        } else {
            TurnOutcome::Unchanged
        }
    }

    /// Deadline check for callers driving a timer instead of piggybacking
    /// on transition events. Returns whether this call closed the session.
    pub fn expire_if_due(&mut self, now_ms: u64, surface: &mut dyn ControlSurface) -> bool {
        if self.state == SessionState::Active && now_ms >= self.deadline_ms {
            self.close(surface);
            true
        } else {
            false
        }
    }

    fn close(&mut self, surface: &mut dyn ControlSurface) {
        self.state = SessionState::Closed;
        if !self.controls_cleared {
            self.controls_cleared = true;
            if let Err(err) = surface.clear_controls() {
                warn!(error = %err, "failed to clear pager controls");
            }
        }
    }
}
