//! Drag-gesture tracking over the rendered page

use std::fmt;

/// A pointer position in canvas pixel coordinates (origin at the canvas' top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle described by its top-left corner and a non-negative size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    /// Build the rectangle spanned by two arbitrary corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Raw corners of a selection, in the order the gesture produced them
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Selection {
    pub start: Point,
    pub end: Option<Point>,
}

impl Selection {
    fn starting_at(start: Point) -> Self {
        Self { start, end: None }
    }

    /// Normalized form; a selection without a second corner collapses onto the first
    pub fn normalized(&self) -> NormalizedRect {
        NormalizedRect::from_corners(self.start, self.end.unwrap_or(self.start))
    }

    /// Human-readable form of the raw corners, used for display and clipboard copy
    pub fn coordinate_label(&self) -> String {
        let (x2, y2) = match self.end {
            Some(end) => (format_coord(end.x), format_coord(end.y)),
            None => ("-".to_string(), "-".to_string()),
        };
        format!(
            "x1: {}, y1: {}, x2: {}, y2: {}",
            format_coord(self.start.x),
            format_coord(self.start.y),
            x2,
            y2
        )
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(
                f,
                "({}, {}) - ({}, {})",
                format_coord(self.start.x),
                format_coord(self.start.y),
                format_coord(end.x),
                format_coord(end.y)
            ),
            None => write!(
                f,
                "({}, {}) - (-, -)",
                format_coord(self.start.x),
                format_coord(self.start.y)
            ),
        }
    }
}

/// Whole pixels print without a fractional part
fn format_coord(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// What the display needs after a move: the overlay geometry and the label text
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionUpdate {
    pub rect: NormalizedRect,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
}

/// Converts press/move/release sequences into a normalized rectangle.
///
/// Moves are only honored between a press and its release. Each release
/// freezes the current rectangle as the committed selection until the
/// next press or a [`SelectionTracker::reset`].
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    phase: GesturePhase,
    current: Option<Selection>,
    committed: Option<NormalizedRect>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Start a new gesture; any previous selection is replaced
    pub fn press(&mut self, point: Point) {
        self.phase = GesturePhase::Dragging;
        self.current = Some(Selection::starting_at(point));
        self.committed = None;
    }

    /// Track the pointer while dragging. Returns `None` when no gesture is active.
    pub fn motion(&mut self, point: Point) -> Option<SelectionUpdate> {
        if !self.is_dragging() {
            return None;
        }

        let selection = self.current.as_mut()?;
        selection.end = Some(point);

        Some(SelectionUpdate {
            rect: selection.normalized(),
            label: selection.coordinate_label(),
        })
    }

    /// Finish the gesture and commit the rectangle. A release without a press is ignored.
    pub fn release(&mut self) -> Option<NormalizedRect> {
        if !self.is_dragging() {
            return None;
        }
        self.phase = GesturePhase::Idle;

        let selection = self.current?;
        log::info!("Selection coordinates: {}", selection);

        let rect = selection.normalized();
        self.committed = Some(rect);
        Some(rect)
    }

    /// Drop the in-progress and committed selection
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn normalized_rect(&self) -> Option<NormalizedRect> {
        self.current.map(|s| s.normalized())
    }

    pub fn committed(&self) -> Option<NormalizedRect> {
        self.committed
    }

    pub fn coordinate_label(&self) -> Option<String> {
        self.current.map(|s| s.coordinate_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> NormalizedRect {
        NormalizedRect {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn test_normalize_any_drag_direction() {
        let corners = [
            ((10.0, 20.0), (30.0, 60.0)),
            ((30.0, 60.0), (10.0, 20.0)),
            ((30.0, 20.0), (10.0, 60.0)),
            ((10.0, 60.0), (30.0, 20.0)),
        ];

        for ((x1, y1), (x2, y2)) in corners {
            let r = NormalizedRect::from_corners(Point::new(x1, y1), Point::new(x2, y2));
            assert_eq!(r, rect(10.0, 20.0, 20.0, 40.0));
        }
    }

    #[test]
    fn test_drag_up_and_left() {
        let mut tracker = SelectionTracker::new();
        tracker.press(Point::new(100.0, 200.0));
        let update = tracker.motion(Point::new(60.0, 150.0)).unwrap();

        assert_eq!(update.rect, rect(60.0, 150.0, 40.0, 50.0));
        assert_eq!(update.label, "x1: 100, y1: 200, x2: 60, y2: 150");
    }

    #[test]
    fn test_zero_distance_drag() {
        let mut tracker = SelectionTracker::new();
        tracker.press(Point::new(50.0, 50.0));
        let committed = tracker.release();

        assert_eq!(committed, Some(rect(50.0, 50.0, 0.0, 0.0)));
        assert!(committed.unwrap().is_empty());
        assert_eq!(tracker.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_click_after_drag_drops_previous_rect() {
        let mut tracker = SelectionTracker::new();
        tracker.press(Point::new(0.0, 0.0));
        tracker.motion(Point::new(40.0, 30.0));
        tracker.release();

        tracker.press(Point::new(70.0, 80.0));
        let committed = tracker.release();

        assert_eq!(committed, Some(rect(70.0, 80.0, 0.0, 0.0)));
        assert_eq!(tracker.committed(), committed);
        assert_eq!(
            tracker.coordinate_label().unwrap(),
            "x1: 70, y1: 80, x2: -, y2: -"
        );
    }

    #[test]
    fn test_motion_ignored_when_idle() {
        let mut tracker = SelectionTracker::new();
        assert!(tracker.motion(Point::new(5.0, 5.0)).is_none());

        tracker.press(Point::new(0.0, 0.0));
        tracker.motion(Point::new(10.0, 10.0));
        tracker.release();

        assert!(tracker.motion(Point::new(99.0, 99.0)).is_none());
        assert_eq!(tracker.committed(), Some(rect(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(tracker.normalized_rect(), Some(rect(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_release_without_press() {
        let mut tracker = SelectionTracker::new();
        assert!(tracker.release().is_none());
        assert!(tracker.committed().is_none());
    }

    #[test]
    fn test_press_replaces_previous_selection() {
        let mut tracker = SelectionTracker::new();
        tracker.press(Point::new(0.0, 0.0));
        tracker.motion(Point::new(40.0, 40.0));
        tracker.release();

        tracker.press(Point::new(7.0, 8.0));
        assert!(tracker.committed().is_none());
        assert_eq!(
            tracker.coordinate_label().unwrap(),
            "x1: 7, y1: 8, x2: -, y2: -"
        );
    }

    #[test]
    fn test_label_keeps_fractional_pixels() {
        let sel = Selection {
            start: Point::new(1.5, 2.0),
            end: Some(Point::new(3.3, 4.0)),
        };
        assert_eq!(sel.coordinate_label(), "x1: 1.5, y1: 2, x2: 3.3, y2: 4");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = SelectionTracker::new();
        tracker.press(Point::new(1.0, 1.0));
        tracker.reset();

        assert!(!tracker.is_dragging());
        assert!(tracker.selection().is_none());
        assert!(tracker.normalized_rect().is_none());
    }
}
