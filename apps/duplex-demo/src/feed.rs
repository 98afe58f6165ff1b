//! The demo's scrolling feed.

use std::cell::RefCell;
use std::rc::Rc;

use duplex_foundation::{
    NestedScrollingChildHelper, NestedScrollingParent, ScrollAxes, ScrollDelta,
};
use duplex_refresh::{Edge, ScrollableContent};

pub const ITEM_HEIGHT: f32 = 72.0;
pub const PAGE_SIZE: usize = 10;

/// A list of text rows that scrolls itself and hands its overscroll to a
/// nested-scrolling parent.
pub struct Feed {
    items: Vec<String>,
    generation: u32,
    scroll_offset: f32,
    viewport_height: f32,
    helper: NestedScrollingChildHelper,
}

impl Feed {
    pub fn new(viewport_height: f32) -> Self {
        let mut helper = NestedScrollingChildHelper::new();
        helper.set_nested_scrolling_enabled(true);
        let mut feed = Self {
            items: Vec::new(),
            generation: 0,
            scroll_offset: 0.0,
            viewport_height,
            helper,
        };
        feed.reload();
        feed
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn max_scroll(&self) -> f32 {
        (self.items.len() as f32 * ITEM_HEIGHT - self.viewport_height).max(0.0)
    }

    pub fn can_scroll(&self, direction: i32) -> bool {
        if direction < 0 {
            self.scroll_offset > 0.0
        } else {
            self.scroll_offset < self.max_scroll()
        }
    }

    /// Scrolls all the way toward `edge`.
    pub fn jump_to(&mut self, edge: Edge) {
        self.scroll_offset = match edge {
            Edge::Top => 0.0,
            Edge::Bottom => self.max_scroll(),
        };
    }

    /// Replaces the feed with a fresh first page.
    pub fn reload(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.scroll_offset = 0.0;
        self.append_page();
    }

    pub fn append_page(&mut self) {
        let start = self.items.len();
        let generation = self.generation;
        self.items
            .extend((start..start + PAGE_SIZE).map(|i| format!("item {i} (load {generation})")));
    }

    pub fn set_parent<P: NestedScrollingParent + 'static>(&mut self, parent: &Rc<RefCell<P>>) {
        self.helper.set_parent(parent);
    }

    pub fn start_nested_scroll(&mut self) -> bool {
        self.helper.start_nested_scroll(ScrollAxes::VERTICAL)
    }

    pub fn stop_nested_scroll(&mut self) {
        self.helper.stop_nested_scroll();
    }

    /// Scrolls by `dy` with the parent getting first and last say. Returns
    /// what the feed itself could not scroll.
    pub fn scroll_by(&mut self, dy: f32) -> f32 {
        let pre = self.helper.dispatch_nested_pre_scroll(ScrollDelta::vertical(dy));
        let remaining = dy - pre.y;
        let target = (self.scroll_offset + remaining).clamp(0.0, self.max_scroll());
        let scrolled = target - self.scroll_offset;
        self.scroll_offset = target;
        let unconsumed = remaining - scrolled;
        self.helper.dispatch_nested_scroll(
            ScrollDelta::vertical(scrolled),
            ScrollDelta::vertical(unconsumed),
        );
        unconsumed
    }
}

/// Shares the feed with the container as its content.
pub struct FeedContent(pub Rc<RefCell<Feed>>);

impl ScrollableContent for FeedContent {
    fn can_scroll_vertically(&self, direction: i32) -> bool {
        self.0
            .try_borrow()
            .map(|feed| feed.can_scroll(direction))
            .unwrap_or(false)
    }

    fn is_nested_scrolling_enabled(&self) -> bool {
        true
    }
}
