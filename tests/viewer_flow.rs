use snipview::error::{LoadError, RenderError};
use snipview::viewer::{
    NormalizedRect, PageController, PageSource, PdfBackend, Point, RenderOutcome, RenderedPage,
    SelectionTracker, Viewport,
};

/// In-memory stand-in for PDFium: "%PDF" followed by the page count byte
struct FakeBackend;

struct FakeDocument {
    pages: usize,
}

impl PdfBackend for FakeBackend {
    type Document = FakeDocument;

    fn load(&self, bytes: Vec<u8>) -> Result<FakeDocument, LoadError> {
        match bytes.strip_prefix(b"%PDF") {
            Some([count, ..]) => Ok(FakeDocument {
                pages: *count as usize,
            }),
            _ => Err(LoadError::Rejected("file is not a PDF".to_string())),
        }
    }
}

impl PageSource for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn page_size_points(&self, page_index: usize) -> Result<(f32, f32), RenderError> {
        // Every other page is landscape so renders are distinguishable
        if page_index % 2 == 0 {
            Ok((612.0, 792.0))
        } else {
            Ok((792.0, 612.0))
        }
    }

    fn rasterize(&self, _page_index: usize, viewport: Viewport) -> Result<RenderedPage, RenderError> {
        let stride = viewport.width as usize * 4;
        Ok(RenderedPage {
            width: viewport.width,
            height: viewport.height,
            stride,
            pixels: vec![0; stride * viewport.height as usize],
        })
    }
}

fn pdf_with_pages(pages: u8) -> Vec<u8> {
    let mut bytes = b"%PDF".to_vec();
    bytes.push(pages);
    bytes
}

fn draw(controller: &PageController<FakeDocument>, request: &snipview::viewer::RenderRequest) -> RenderOutcome {
    let result = controller.render(request);
    controller.complete_render(request, result)
}

#[test]
fn test_open_navigate_and_select() {
    let mut controller = PageController::default();
    let mut tracker = SelectionTracker::new();

    let first = controller
        .load_document(&FakeBackend, pdf_with_pages(5))
        .unwrap();
    match draw(&controller, &first) {
        RenderOutcome::Drawn(page) => assert_eq!((page.width, page.height), (918, 1188)),
        other => panic!("expected a drawn page, got {:?}", other),
    }

    let second = controller.next_page().unwrap();
    match draw(&controller, &second) {
        RenderOutcome::Drawn(page) => assert_eq!((page.width, page.height), (1188, 918)),
        other => panic!("expected a drawn page, got {:?}", other),
    }

    tracker.press(Point::new(100.0, 200.0));
    let update = tracker.motion(Point::new(60.0, 150.0)).unwrap();
    assert_eq!(
        update.rect,
        NormalizedRect {
            left: 60.0,
            top: 150.0,
            width: 40.0,
            height: 50.0
        }
    );
    assert_eq!(tracker.release(), Some(update.rect));
}

#[test]
fn test_non_pdf_bytes_leave_viewer_unloaded() {
    let mut controller: PageController<FakeDocument> = PageController::default();

    let result = controller.load_document(&FakeBackend, b"GIF89a".to_vec());

    assert!(matches!(result, Err(LoadError::Rejected(_))));
    assert_eq!(controller.page_count(), None);
    assert_eq!(controller.current_page(), None);
    assert!(controller.render_current_page().is_none());
}

#[test]
fn test_reload_replaces_previous_document() {
    let mut controller = PageController::default();
    controller
        .load_document(&FakeBackend, pdf_with_pages(9))
        .unwrap();
    controller.goto_page(7);

    let request = controller
        .load_document(&FakeBackend, pdf_with_pages(2))
        .unwrap();

    assert_eq!(request.page, 1);
    assert_eq!(controller.current_page(), Some(1));
    assert_eq!(controller.page_count(), Some(2));
}

#[test]
fn test_rapid_navigation_only_draws_latest_page() {
    let mut controller = PageController::default();
    controller
        .load_document(&FakeBackend, pdf_with_pages(4))
        .unwrap();

    let requests: Vec<_> = (0..3).filter_map(|_| controller.next_page()).collect();
    assert_eq!(requests.len(), 3);
    assert!(controller.next_page().is_none());

    // Completions arrive out of order; only the newest is drawn
    let outcomes: Vec<_> = requests.iter().rev().map(|r| draw(&controller, r)).collect();
    assert!(matches!(outcomes[0], RenderOutcome::Drawn(_)));
    assert!(matches!(outcomes[1], RenderOutcome::Stale(_)));
    assert!(matches!(outcomes[2], RenderOutcome::Stale(_)));
    assert_eq!(controller.current_page(), Some(4));
}

#[test]
fn test_each_move_yields_one_update() {
    let mut controller = PageController::default();
    let mut tracker = SelectionTracker::new();
    controller
        .load_document(&FakeBackend, pdf_with_pages(3))
        .unwrap();
    controller.goto_page(3);

    tracker.press(Point::new(10.0, 10.0));
    let moves = [Point::new(20.0, 20.0), Point::new(30.0, 25.0), Point::new(5.0, 40.0)];
    let updates: Vec<_> = moves.iter().filter_map(|p| tracker.motion(*p)).collect();
    tracker.release();

    assert_eq!(updates.len(), moves.len());
    assert_eq!(
        updates.last().map(|u| u.label.as_str()),
        Some("x1: 10, y1: 10, x2: 5, y2: 40")
    );
    assert_eq!(
        tracker.committed(),
        Some(NormalizedRect {
            left: 5.0,
            top: 10.0,
            width: 5.0,
            height: 30.0
        })
    );
    // Moves after release belong to no gesture
    assert!(tracker.motion(Point::new(90.0, 90.0)).is_none());
}

#[test]
fn test_selection_survives_navigation_until_next_press() {
    let mut controller = PageController::default();
    let mut tracker = SelectionTracker::new();
    controller
        .load_document(&FakeBackend, pdf_with_pages(2))
        .unwrap();

    tracker.press(Point::new(50.0, 50.0));
    tracker.release();
    controller.next_page();

    assert_eq!(
        tracker.committed(),
        Some(NormalizedRect {
            left: 50.0,
            top: 50.0,
            width: 0.0,
            height: 0.0
        })
    );
}
