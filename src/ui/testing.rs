//! Recording collaborators for host tests of the GUI context.

use std::cell::Cell;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::card::sim::SimulatedCardManager;
use crate::card::Emulator;
use crate::clock::Clock;
use crate::config::GuiConfig;
use crate::error::Error;
use crate::input::KeyQueue;
use crate::ui::menu::MenuPage;
use crate::ui::render::{Label, Renderer};
use crate::ui::{Gui, Screen};

/// Everything the GUI asked the renderer to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Load(Screen),
    Text(Label, String),
    Progress(u16),
    Page(Option<&'static str>, usize),
    Focus(usize),
    Power(bool),
    Advance(u32),
    Flush,
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    pub fail_flush: bool,
}

impl RecordingRenderer {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn loads(&self) -> Vec<Screen> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn load_screen(&mut self, screen: Screen) {
        self.calls.push(Call::Load(screen));
    }

    fn set_text(&mut self, label: Label, text: &str) {
        self.calls.push(Call::Text(label, text.to_string()));
    }

    fn set_progress(&mut self, bar_end_x: u16) {
        self.calls.push(Call::Progress(bar_end_x));
    }

    fn show_menu_page(&mut self, page: &MenuPage, focus: usize) {
        self.calls.push(Call::Page(page.title(), focus));
    }

    fn set_focus(&mut self, focus: usize) {
        self.calls.push(Call::Focus(focus));
    }

    fn set_display_on(&mut self, on: bool) {
        self.calls.push(Call::Power(on));
    }

    fn advance_clock(&mut self, elapsed_ms: u32) {
        self.calls.push(Call::Advance(elapsed_ms));
    }

    fn process_pending(&mut self) -> Result<(), Error> {
        self.calls.push(Call::Flush);
        if self.fail_flush {
            Err(Error::Display)
        } else {
            Ok(())
        }
    }
}

/// Shared, manually advanced µs clock.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn set_ms(&self, ms: u64) {
        self.now.set(ms * 1000);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now.set(self.now.get() + ms * 1000);
    }

    pub fn now_ms(&self) -> u64 {
        self.now.get() / 1000
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> u64 {
        self.now.get()
    }
}

/// Delay that moves a [`ManualClock`] forward instead of sleeping.
pub struct ClockDelay(pub ManualClock);

impl DelayNs for ClockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let clock = &self.0.now;
        clock.set(clock.get() + u64::from(ns) / 1000);
    }
}

#[derive(Default)]
pub struct RecordingEmulator {
    pub enters: u32,
    pub exits: u32,
    pub active: bool,
}

impl Emulator for RecordingEmulator {
    fn enter(&mut self) {
        self.enters += 1;
        self.active = true;
    }

    fn exit(&mut self) {
        self.exits += 1;
        self.active = false;
    }
}

pub type TestGui = Gui<
    RecordingRenderer,
    SimulatedCardManager<ClockDelay>,
    RecordingEmulator,
    KeyQueue<8>,
    ManualClock,
>;

/// GUI at t=0 with a reload of 10 steps x 100 ms and auto-off disabled.
pub fn gui_with(config: GuiConfig) -> (TestGui, ManualClock) {
    let clock = ManualClock::default();
    let cards = SimulatedCardManager::new(ClockDelay(clock.clone())).with_timing(10, 100);
    let mut gui = Gui::new(
        RecordingRenderer::default(),
        cards,
        RecordingEmulator::default(),
        KeyQueue::new(),
        clock.clone(),
        config,
    );
    // Latch the tick driver.
    gui.task();
    (gui, clock)
}

pub fn gui() -> (TestGui, ManualClock) {
    gui_with(GuiConfig {
        auto_off_secs: None,
        ..GuiConfig::default()
    })
}

/// Queue `key` and run one main-loop pass 1 ms later.
pub fn press(gui: &mut TestGui, clock: &ManualClock, key: crate::input::Key) {
    gui.keys_mut().press(key);
    clock.advance_ms(1);
    gui.task();
}
