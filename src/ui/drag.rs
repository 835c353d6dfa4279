//! Drag-to-reorder tracking.
//!
//! A drag carries the index of the row being moved. While the pointer hovers
//! another row, the dragged row only swaps in once the pointer has crossed
//! the hovered row's vertical midpoint, coming from the dragged row's side.

use tracing::trace;

/// In-flight drag payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragItem {
    pub index: usize,
}

/// Vertical extent of a rendered row, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f32,
    pub bottom: f32,
}

impl RowBounds {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Bounds of a terminal row area starting at line `y` spanning `height` lines
    pub fn from_lines(y: u16, height: u16) -> Self {
        Self::new(f32::from(y), f32::from(y) + f32::from(height))
    }

    /// Distance from the top edge to the midpoint
    pub fn middle(&self) -> f32 {
        (self.bottom - self.top) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverDecision {
    /// Hovering the dragged row itself
    SameRow,
    /// The pointer position is unknown
    NoPointer,
    /// Dragging down, pointer still above the midpoint
    BeforeMidpointDown,
    /// Dragging up, pointer still below the midpoint
    BeforeMidpointUp,
    /// Move the dragged row to the hovered position
    Move { from: usize, to: usize },
}

/// Decide what a hover event over row `hover_index` means for the drag
pub fn decide_hover(
    drag_index: usize,
    hover_index: usize,
    bounds: RowBounds,
    pointer_y: Option<f32>,
) -> HoverDecision {
    if drag_index == hover_index {
        return HoverDecision::SameRow;
    }

    let hover_middle_y = bounds.middle();
    let Some(pointer_y) = pointer_y else {
        return HoverDecision::NoPointer;
    };
    let hover_client_y = pointer_y - bounds.top;

    if drag_index < hover_index && hover_client_y < hover_middle_y {
        return HoverDecision::BeforeMidpointDown;
    }
    if drag_index > hover_index && hover_client_y > hover_middle_y {
        return HoverDecision::BeforeMidpointUp;
    }

    HoverDecision::Move {
        from: drag_index,
        to: hover_index,
    }
}

/// Drag session owned by the table container
#[derive(Debug, Default)]
pub struct DragSession {
    item: Option<DragItem>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, index: usize) {
        trace!(target: "drag", "Drag started on row {}", index);
        self.item = Some(DragItem { index });
    }

    pub fn end(&mut self) -> Option<DragItem> {
        let item = self.item.take();
        if let Some(item) = item {
            trace!(target: "drag", "Drag ended at row {}", item.index);
        }
        item
    }

    pub fn is_active(&self) -> bool {
        self.item.is_some()
    }

    pub fn item(&self) -> Option<DragItem> {
        self.item
    }

    pub fn item_mut(&mut self) -> Option<&mut DragItem> {
        self.item.as_mut()
    }
}
