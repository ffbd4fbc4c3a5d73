//! Whiteboard session: the single owner of one board's local state.
//!
//! DESIGN
//! ======
//! `WhiteboardSession` holds the history, the active tool and style, the
//! in-progress gesture, and the open text overlay. Every handler runs to
//! completion and returns the [`Action`]s the host must carry out: remote
//! log calls for the sync adapter, overlay commands for the DOM, and redraw
//! requests. The session never waits on the network; its local state is
//! authoritative for this client's rendering.
//!
//! Only the history methods mutate the stroke list. The host is the only
//! writer of the surface, via [`WhiteboardSession::render`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, warn};

use crate::consts::{BACKGROUND_COLOR, DEFAULT_COLOR, DEFAULT_TEXT_SIZE, DEFAULT_WIDTH};
use crate::history::{History, HistoryEntry};
use crate::input::{InputState, Key, Modifiers, Shortcut, shortcut};
use crate::point::{Point, Viewport};
use crate::render;
use crate::stroke::{BoardKey, Shape, Stroke, Tool, timestamp_ms};
use crate::surface::Surface;
use crate::text::TextSession;

/// Work requested by a session handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append this stroke to the remote log.
    Append(Stroke),
    /// Delete the most recent remote stroke of the board.
    DeleteMostRecent(BoardKey),
    /// Delete every remote stroke of the board.
    DeleteAll(BoardKey),
    /// Show the text overlay at `anchor` with an empty draft.
    OpenTextEditor { anchor: Point, color: String, size: f64 },
    /// Hide the text overlay.
    CloseTextEditor,
    /// Local state changed; redraw the surface.
    RenderNeeded,
}

/// Local state of one board on one client.
pub struct WhiteboardSession {
    board: BoardKey,
    user_id: String,
    history: History,
    input: InputState,
    text: Option<TextSession>,
    tool: Tool,
    color: String,
    width: f64,
    text_size: f64,
    viewport: Viewport,
}

impl WhiteboardSession {
    /// Open an empty session on `board` for `user_id`.
    #[must_use]
    pub fn new(board: BoardKey, user_id: impl Into<String>) -> Self {
        Self {
            board,
            user_id: user_id.into(),
            history: History::new(),
            input: InputState::Idle,
            text: None,
            tool: Tool::default(),
            color: DEFAULT_COLOR.to_owned(),
            width: DEFAULT_WIDTH,
            text_size: DEFAULT_TEXT_SIZE,
            viewport: Viewport::default(),
        }
    }

    // --- Board lifecycle ---

    /// Switch to another board, dropping all local state of the current one.
    pub fn open_board(&mut self, board: BoardKey) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.text.take().is_some() {
            actions.push(Action::CloseTextEditor);
        }
        self.board = board;
        self.history = History::new();
        self.input = InputState::Idle;
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Replace the committed strokes with the board's fetched log.
    ///
    /// The log is trusted to be in commit order. Strokes scoped to another
    /// board or tenant are dropped.
    pub fn load_strokes(&mut self, strokes: Vec<Stroke>) -> Vec<Action> {
        let total = strokes.len();
        let board = &self.board;
        let kept: Vec<Stroke> = strokes.into_iter().filter(|s| s.belongs_to(board)).collect();
        if kept.len() != total {
            warn!(
                board_id = %board.board_id,
                tenant_id = %board.tenant_id,
                dropped = total - kept.len(),
                "dropped strokes from another board"
            );
        }
        self.history.replace_committed(kept);
        vec![Action::RenderNeeded]
    }

    // --- Toolbar ---

    /// Set the active tool. A gesture already in progress keeps its tool.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.tool = tool;
        vec![Action::RenderNeeded]
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> Vec<Action> {
        self.color = color.into();
        vec![Action::RenderNeeded]
    }

    /// Set the line width. Non-positive widths are ignored.
    pub fn set_width(&mut self, width: f64) -> Vec<Action> {
        if !is_positive(width) {
            return Vec::new();
        }
        self.width = width;
        vec![Action::RenderNeeded]
    }

    /// Set the text size for the next text session. Non-positive sizes are ignored.
    pub fn set_text_size(&mut self, size: f64) -> Vec<Action> {
        if !is_positive(size) {
            return Vec::new();
        }
        self.text_size = size;
        vec![Action::RenderNeeded]
    }

    /// Record where the surface sits in client coordinates and how large it is.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        self.viewport = viewport;
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    /// Pointer pressed at `client` (page coordinates).
    ///
    /// With the text tool this opens a text session instead of a gesture;
    /// any uncommitted draft from a previous session is discarded.
    pub fn pointer_down(&mut self, client: Point) -> Vec<Action> {
        let at = self.viewport.to_surface(client);
        if self.tool == Tool::Text {
            if self.text.is_some() {
                debug!("discarding uncommitted text draft");
            }
            self.text = Some(TextSession::new(at, self.color.clone(), self.text_size));
            return vec![Action::OpenTextEditor { anchor: at, color: self.color.clone(), size: self.text_size }];
        }
        self.input = InputState::begin(self.tool, at);
        vec![Action::RenderNeeded]
    }

    /// Pointer moved to `client`. No-op unless a gesture is active.
    pub fn pointer_move(&mut self, client: Point) -> Vec<Action> {
        let at = self.viewport.to_surface(client);
        if self.input.track(at) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Pointer released. Commits the gesture's stroke, degenerate or not.
    pub fn pointer_up(&mut self) -> Vec<Action> {
        let Some(shape) = self.input.finish() else {
            return Vec::new();
        };
        let stroke = self.stroke_from(shape, self.color.clone(), self.width);
        self.commit(stroke)
    }

    // --- Text ---

    /// Mirror the overlay's current contents into the draft.
    pub fn text_input(&mut self, draft: impl Into<String>) -> Vec<Action> {
        if let Some(session) = self.text.as_mut() {
            session.set_draft(draft);
        }
        Vec::new()
    }

    /// Overlay blurred or Enter pressed: commit a non-blank draft and close.
    pub fn text_submit(&mut self) -> Vec<Action> {
        let Some(session) = self.text.take() else {
            return Vec::new();
        };
        let color = session.color.clone();
        let size = session.size;
        let Some(shape) = session.into_shape() else {
            return vec![Action::CloseTextEditor];
        };
        let stroke = self.stroke_from(shape, color, size);
        let mut actions = vec![Action::CloseTextEditor];
        actions.extend(self.commit(stroke));
        actions
    }

    // --- Keyboard ---

    /// Key pressed. Enter submits an open text session; otherwise board
    /// shortcuts apply.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.text.is_some() {
            if key.is_enter() {
                return self.text_submit();
            }
            return Vec::new();
        }
        match shortcut(key, modifiers, false) {
            Some(Shortcut::Undo) => self.undo(),
            Some(Shortcut::Redo) => self.redo(),
            Some(Shortcut::SelectTool(tool)) => self.set_tool(tool),
            None => Vec::new(),
        }
    }

    // --- History ---

    /// Undo the last committed entry and request deletion of the most recent
    /// remote stroke.
    pub fn undo(&mut self) -> Vec<Action> {
        if self.history.undo().is_none() {
            debug!("nothing to undo");
            return Vec::new();
        }
        vec![Action::DeleteMostRecent(self.board.clone()), Action::RenderNeeded]
    }

    /// Re-apply the most recently undone entry and re-append it remotely.
    pub fn redo(&mut self) -> Vec<Action> {
        let Some(entry) = self.history.redo() else {
            debug!("nothing to redo");
            return Vec::new();
        };
        vec![Action::Append(entry.stroke().clone()), Action::RenderNeeded]
    }

    /// Remove every stroke of the board, locally and remotely.
    pub fn clear(&mut self) -> Vec<Action> {
        self.history.clear();
        vec![Action::DeleteAll(self.board.clone()), Action::RenderNeeded]
    }

    fn commit(&mut self, stroke: Stroke) -> Vec<Action> {
        self.history.commit(HistoryEntry::new(stroke.clone()));
        vec![Action::Append(stroke), Action::RenderNeeded]
    }

    fn stroke_from(&self, shape: Shape, color: String, width: f64) -> Stroke {
        let color = if shape.tool() == Tool::Eraser { BACKGROUND_COLOR.to_owned() } else { color };
        Stroke {
            shape,
            color,
            width,
            created_by: self.user_id.clone(),
            created_at: timestamp_ms(),
            board: self.board.clone(),
        }
    }

    // --- Render ---

    /// The in-progress stroke as it would be committed now.
    #[must_use]
    pub fn preview(&self) -> Option<Stroke> {
        let shape = self.input.shape()?;
        Some(self.stroke_from(shape, self.color.clone(), self.width))
    }

    /// Redraw the whole surface.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any surface call fails.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let preview = self.preview();
        render::render(surface, self.viewport.width, self.viewport.height, self.history.strokes(), preview.as_ref())
    }

    // --- Queries ---

    #[must_use]
    pub fn board(&self) -> &BoardKey {
        &self.board
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn text_size(&self) -> f64 {
        self.text_size
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The open text session, if any.
    #[must_use]
    pub fn text_session(&self) -> Option<&TextSession> {
        self.text.as_ref()
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
