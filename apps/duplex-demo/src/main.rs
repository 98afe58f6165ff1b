//! Scripted walk through the duplex refresh container.
//!
//! Runs without a window: a simulated user pulls both edges, taps rows that
//! start refreshes programmatically and scrolls a nested feed, while fake
//! network loads finish a few seconds after each refresh starts.

mod feed;
mod script;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{ensure, Context, Result};
use duplex_foundation::{MotionAction, MotionEvent};
use duplex_refresh::{DuplexSwipeRefresh, Edge, EdgeMap, RefreshConfig};
use duplex_ui_graphics::{Color, EdgeInsets, Size};
use web_time::Instant;

use feed::{Feed, FeedContent};
use script::{Cue, Input};

const VIEWPORT: Size = Size::new(400.0, 800.0);
const FRAME_MILLIS: u64 = 16;
const LOAD_MILLIS: u64 = 3_000;
const MAX_FRAMES: usize = 10_000;

#[derive(Clone, Copy, Debug)]
struct PendingLoad {
    edge: Edge,
    ready_at_millis: u64,
}

struct Demo {
    container: Rc<RefCell<DuplexSwipeRefresh>>,
    feed: Rc<RefCell<Feed>>,
    loads: Rc<RefCell<Vec<PendingLoad>>>,
    clock_millis: Rc<Cell<u64>>,
    cues: VecDeque<Cue>,
    inputs: VecDeque<Input>,
    intercepted: bool,
    finished_loads: EdgeMap<usize>,
}

impl Demo {
    fn new() -> Result<Self> {
        let config = RefreshConfig::new()
            .with_density(2.0)
            .with_color_scheme([
                Color::from_argb(0xFF33_B5E5),
                Color::from_argb(0xFF99_CC00),
                Color::from_argb(0xFFFF_4444),
            ]);
        let mut container =
            DuplexSwipeRefresh::new(config).context("building the refresh container")?;
        container.measure(VIEWPORT, EdgeInsets::default());

        let feed = Rc::new(RefCell::new(Feed::new(VIEWPORT.height)));
        container.set_content(Box::new(FeedContent(Rc::clone(&feed))));

        let loads = Rc::new(RefCell::new(Vec::new()));
        let clock_millis = Rc::new(Cell::new(0));
        for edge in Edge::ALL {
            let loads = Rc::clone(&loads);
            let clock = Rc::clone(&clock_millis);
            container.set_on_refresh_listener(edge, move || {
                log::info!("{edge} refresh started, loading for {LOAD_MILLIS}ms");
                loads.borrow_mut().push(PendingLoad {
                    edge,
                    ready_at_millis: clock.get() + LOAD_MILLIS,
                });
            });
        }

        let container = Rc::new(RefCell::new(container));
        feed.borrow_mut().set_parent(&container);

        Ok(Self {
            container,
            feed,
            loads,
            clock_millis,
            cues: script::scenario().into(),
            inputs: VecDeque::new(),
            intercepted: false,
            finished_loads: EdgeMap::default(),
        })
    }

    fn is_done(&self) -> bool {
        self.cues.is_empty()
            && self.inputs.is_empty()
            && self.loads.borrow().is_empty()
            && !self.container.borrow().needs_frame()
            && Edge::ALL
                .iter()
                .all(|edge| !self.container.borrow().is_refreshing(*edge))
    }

    fn run(&mut self) -> Result<usize> {
        for frame in 0..MAX_FRAMES {
            if self.is_done() {
                return Ok(frame);
            }
            self.frame();
        }
        anyhow::bail!("scenario still running after {MAX_FRAMES} frames")
    }

    fn frame(&mut self) {
        let now = self.clock_millis.get() + FRAME_MILLIS;
        self.clock_millis.set(now);

        while self.cues.front().is_some_and(|cue| cue.at_millis <= now) {
            if let Some(cue) = self.cues.pop_front() {
                log::debug!("t={now}ms: {:?}", cue.step);
                let slop = self.container.borrow().thresholds().touch_slop;
                self.inputs.extend(cue.step.inputs(VIEWPORT.height / 2.0, slop));
            }
        }
        if let Some(input) = self.inputs.pop_front() {
            self.apply(input);
        }

        let events = self.container.borrow_mut().advance_frame(now * 1_000_000);
        for event in events {
            log::debug!("t={now}ms: {} indicator spinning", event.edge);
        }

        self.finish_ready_loads(now);
    }

    fn apply(&mut self, input: Input) {
        match input {
            Input::Touch(event) => self.dispatch_touch(&event),
            Input::Jump(edge) => self.feed.borrow_mut().jump_to(edge),
            Input::Tap(index) => self.tap(index),
            Input::NestedStart => {
                let accepted = self.feed.borrow_mut().start_nested_scroll();
                log::debug!("nested scroll accepted: {accepted}");
            }
            Input::NestedScroll(dy) => {
                let unconsumed = self.feed.borrow_mut().scroll_by(dy);
                log::trace!("feed scrolled by {dy}, {unconsumed} left over");
            }
            Input::NestedStop => self.feed.borrow_mut().stop_nested_scroll(),
        }
    }

    /// Parent-view dispatch: the container watches the stream until it
    /// claims it, then receives it directly.
    fn dispatch_touch(&mut self, event: &MotionEvent) {
        if event.action == MotionAction::Down {
            self.intercepted = false;
        }
        let mut container = self.container.borrow_mut();
        if self.intercepted {
            container.on_touch_event(event);
        } else {
            self.intercepted = container.on_intercept_touch_event(event);
        }
        if matches!(event.action, MotionAction::Up | MotionAction::Cancel) {
            self.intercepted = false;
        }
    }

    /// Row 0 refreshes the top, row 1 loads more at the bottom.
    fn tap(&mut self, index: usize) {
        let edge = match index {
            0 => Edge::Top,
            1 => Edge::Bottom,
            _ => return,
        };
        let item = self.feed.borrow().items().get(index).cloned();
        log::info!("tapped {item:?}, refreshing {edge}");
        self.container
            .borrow_mut()
            .set_refreshing_with_notify(edge, true, true);
    }

    fn finish_ready_loads(&mut self, now: u64) {
        let ready: Vec<PendingLoad> = {
            let mut loads = self.loads.borrow_mut();
            let (ready, waiting): (Vec<_>, Vec<_>) = loads
                .drain(..)
                .partition(|load| load.ready_at_millis <= now);
            *loads = waiting;
            ready
        };
        for load in ready {
            {
                let mut feed = self.feed.borrow_mut();
                match load.edge {
                    Edge::Top => feed.reload(),
                    Edge::Bottom => feed.append_page(),
                }
                log::info!(
                    "{} load done: {} items, generation {}",
                    load.edge,
                    feed.items().len(),
                    feed.generation()
                );
            }
            self.container.borrow_mut().set_refreshing(load.edge, false);
            self.finished_loads[load.edge] += 1;
        }
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Duplex Refresh Demo ===");
    println!("Pull the top to reload, pull the bottom to load more.");
    println!();

    let started = Instant::now();
    let mut demo = Demo::new()?;
    let frames = demo.run()?;
    let elapsed = started.elapsed();

    let feed = demo.feed.borrow();
    println!(
        "{frames} frames ({:.1}s simulated) in {:.1}ms",
        demo.clock_millis.get() as f64 / 1_000.0,
        elapsed.as_secs_f64() * 1_000.0
    );
    println!(
        "top refreshes: {}, bottom loads: {}, feed: {} items (generation {}), scrolled {:.0}px",
        demo.finished_loads.top,
        demo.finished_loads.bottom,
        feed.items().len(),
        feed.generation(),
        feed.scroll_offset()
    );
    ensure!(
        demo.finished_loads.top > 0 && demo.finished_loads.bottom > 0,
        "scenario should refresh both edges"
    );
    Ok(())
}
