//! Reorder State Machine
//!
//! Pure drag-to-reorder logic shared by mouse and touch input.
//! Holds no DOM handles so it can be driven (and tested) without a browser.

/// Input source of a drag gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Client coordinates in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Where the dragged row lands relative to the hovered row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Row under the pointer while dragging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hover {
    pub index: usize,
    pub placement: Placement,
}

impl Hover {
    /// Insertion slot in `0..=len` this hover points at
    pub fn slot(&self) -> usize {
        match self.placement {
            Placement::Before => self.index,
            Placement::After => self.index + 1,
        }
    }
}

/// Gesture thresholds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragThresholds {
    /// Mouse movement (px, either axis) that turns a press into a drag
    pub mouse_px: i32,
    /// Touch movement (px, either axis) that turns a press into a drag
    pub touch_px: i32,
    /// Touch hold time that turns a press into a drag
    pub long_press_ms: u32,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self {
            mouse_px: 5,
            touch_px: 10,
            long_press_ms: 150,
        }
    }
}

/// Current phase of the gesture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pressed on a row, not yet moved far or held long enough
    Pending {
        index: usize,
        kind: PointerKind,
        origin: Point,
    },
    Dragging {
        index: usize,
        kind: PointerKind,
        hover: Option<Hover>,
    },
}

/// Array move resolved from a drop, in display indices
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Drag-to-reorder state machine: `Idle -> Pending -> Dragging -> Idle`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragMachine {
    phase: DragPhase,
    thresholds: DragThresholds,
}

impl DragMachine {
    pub fn new(thresholds: DragThresholds) -> Self {
        Self {
            phase: DragPhase::Idle,
            thresholds,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn thresholds(&self) -> DragThresholds {
        self.thresholds
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, DragPhase::Pending { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Index of the row being dragged
    pub fn dragging_index(&self) -> Option<usize> {
        match self.phase {
            DragPhase::Dragging { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn hover(&self) -> Option<Hover> {
        match self.phase {
            DragPhase::Dragging { hover, .. } => hover,
            _ => None,
        }
    }

    /// Slot where the placeholder is drawn, if any
    pub fn placeholder_slot(&self) -> Option<usize> {
        self.hover().map(|h| h.slot())
    }

    /// Pointer went down on a row. Any gesture in flight is abandoned.
    pub fn press(&mut self, index: usize, kind: PointerKind, origin: Point) {
        self.phase = DragPhase::Pending { index, kind, origin };
    }

    /// Pointer moved. Returns true when this move started the drag.
    pub fn moved(&mut self, at: Point) -> bool {
        if let DragPhase::Pending { index, kind, origin } = self.phase {
            let limit = match kind {
                PointerKind::Mouse => self.thresholds.mouse_px,
                PointerKind::Touch => self.thresholds.touch_px,
            };
            let dx = (at.x - origin.x).abs();
            let dy = (at.y - origin.y).abs();
            if dx > limit || dy > limit {
                self.phase = DragPhase::Dragging { index, kind, hover: None };
                return true;
            }
        }
        false
    }

    /// Long-press timer fired. Only a pending touch turns into a drag.
    pub fn long_press_elapsed(&mut self) -> bool {
        if let DragPhase::Pending { index, kind: PointerKind::Touch, .. } = self.phase {
            self.phase = DragPhase::Dragging {
                index,
                kind: PointerKind::Touch,
                hover: None,
            };
            return true;
        }
        false
    }

    /// Pointer is over row `index` whose box spans `row_top..row_top + row_height`
    pub fn hover_row(&mut self, index: usize, pointer_y: f64, row_top: f64, row_height: f64) {
        if let DragPhase::Dragging { index: dragged, kind, .. } = self.phase {
            let hover = if index == dragged {
                None
            } else {
                let middle = row_top + row_height / 2.0;
                let placement = if pointer_y < middle { Placement::Before } else { Placement::After };
                Some(Hover { index, placement })
            };
            self.phase = DragPhase::Dragging { index: dragged, kind, hover };
        }
    }

    /// Pointer left the list
    pub fn leave(&mut self) {
        if let DragPhase::Dragging { index, kind, .. } = self.phase {
            self.phase = DragPhase::Dragging { index, kind, hover: None };
        }
    }

    /// Pointer lifted. Always returns to idle.
    pub fn release(&mut self) -> Option<Reorder> {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            DragPhase::Dragging { index: from, hover: Some(hover), .. } => {
                let slot = hover.slot();
                let to = if slot > from { slot - 1 } else { slot };
                (to != from).then_some(Reorder { from, to })
            }
            _ => None,
        }
    }

    /// Abandon the gesture without reordering
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// The list was re-rendered with `len` rows; drop a gesture whose row is gone
    pub fn sync_len(&mut self, len: usize) -> bool {
        let index = match self.phase {
            DragPhase::Pending { index, .. } | DragPhase::Dragging { index, .. } => index,
            DragPhase::Idle => return false,
        };
        if index >= len {
            self.cancel();
            return true;
        }
        if let DragPhase::Dragging { index, kind, hover: Some(hover) } = self.phase {
            if hover.index >= len {
                self.phase = DragPhase::Dragging { index, kind, hover: None };
            }
        }
        false
    }
}
