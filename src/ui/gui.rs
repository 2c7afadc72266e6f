use crate::card::progress::ProgressTracker;
use crate::card::{CardManager, CardStep, Emulator};
use crate::clock::{Clock, TickDriver};
use crate::config::{BootMode, GuiConfig};
use crate::input::{Key, KeyInput};
use crate::power::{DisplayPower, PowerState};
use crate::ui::menu::{Menu, MenuEffect, NavigationState, Navigator};
use crate::ui::render::Renderer;
use crate::ui::router::{self, Reaction};
use crate::ui::status::CardIdentityCache;
use crate::ui::switch::{self, PendingCardSwitch, SwitchPhase, SwitchProgress};
use crate::ui::{Screen, ScreenManager};

/// The UI context: every piece of UI state plus the collaborators it
/// drives. Call [`Gui::task`] once per main-loop iteration.
pub struct Gui<R, C, E, K, T> {
    renderer: R,
    cards: C,
    emulator: E,
    keys: K,
    clock: T,
    config: GuiConfig,
    screens: ScreenManager,
    navigator: Navigator,
    pending: PendingCardSwitch,
    progress: ProgressTracker,
    identity: CardIdentityCache,
    ticker: TickDriver,
    power: DisplayPower,
    switches: u32,
}

impl<R, C, E, K, T> Gui<R, C, E, K, T>
where
    R: Renderer,
    C: CardManager,
    E: Emulator,
    K: KeyInput,
    T: Clock,
{
    /// Build the context with the stock menu and show the boot screen.
    pub fn new(renderer: R, cards: C, emulator: E, keys: K, clock: T, config: GuiConfig) -> Self {
        let now = clock.now_us();
        let initial = match config.boot_mode {
            BootMode::MemoryCard => Screen::Main,
            BootMode::FreePsxBoot => Screen::FreePsxBoot,
        };

        let mut gui = Self {
            renderer,
            cards,
            emulator,
            keys,
            clock,
            config,
            screens: ScreenManager::new(initial),
            navigator: Navigator::new(Menu::standard()),
            pending: PendingCardSwitch::new(),
            progress: ProgressTracker::new(),
            identity: CardIdentityCache::new(),
            ticker: TickDriver::new(),
            power: DisplayPower::new(now, config.auto_off_secs),
            switches: 0,
        };
        info!("GUI: starting on {:?}", initial);
        gui.renderer.load_screen(initial);
        gui
    }

    /// Replace the stock menu.
    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.navigator = Navigator::new(menu);
        self
    }

    /// One main-loop iteration: label sync, switch deadline, display
    /// power, then (once at least a millisecond passed) renderer clock,
    /// one key press and pending render work.
    pub fn task(&mut self) {
        self.identity.sync(&self.cards, &mut self.renderer);

        if self.pending.take_due(self.clock.now_us()) {
            self.perform_switch();
        }

        if let Some(state) = self.power.poll(self.clock.now_us()) {
            self.renderer.set_display_on(state == PowerState::Active);
        }

        if let Some(elapsed_ms) = self.ticker.advance(self.clock.now_us()) {
            self.renderer.advance_clock(elapsed_ms);
            if let Some(key) = self.keys.poll() {
                self.handle_key(key);
            }
            self.render();
        }
    }

    /// Route one key press.
    pub fn handle_key(&mut self, key: Key) {
        let now = self.clock.now_us();
        if self.power.activity(now) {
            // The press only wakes the display.
            self.renderer.set_display_on(true);
            return;
        }

        let screen = self.screens.current();
        info!("Key: {:?} on {:?}", key, screen);

        match router::route(screen, key) {
            Reaction::Ignore => {}
            Reaction::Goto(target) => self.goto(target),
            Reaction::Menu { key, fallback } => match self.navigator.handle(key) {
                MenuEffect::Unhandled => {
                    if let Some(target) = fallback {
                        self.goto(target);
                    }
                }
                MenuEffect::Unchanged => {}
                MenuEffect::Focus(focus) => self.renderer.set_focus(focus),
                MenuEffect::Page(_, focus) => {
                    self.renderer.show_menu_page(self.navigator.current_page(), focus);
                }
            },
            Reaction::SwitchCard(step) => self.request_switch(step, now),
        }
    }

    fn goto(&mut self, screen: Screen) {
        let previous = self.screens.activate(screen);
        debug!("Screen: {:?} -> {:?}", previous, screen);
        self.renderer.load_screen(screen);

        if screen == Screen::Menu {
            self.navigator.reset();
            self.renderer
                .show_menu_page(self.navigator.current_page(), self.navigator.focus());
        }
    }

    fn request_switch(&mut self, step: CardStep, now_us: u64) {
        self.emulator.exit();
        self.cards.close();
        self.cards.step(step);
        info!(
            "Card: {:?}, new card={} chan={}",
            step,
            self.cards.index(),
            self.cards.channel()
        );
        self.pending.arm(now_us, self.config.switch_debounce_ms);
    }

    fn perform_switch(&mut self) {
        info!("Switch: switching the card now");
        self.goto(Screen::CardSwitch);
        self.progress.reset();
        self.renderer.set_progress(0);
        self.render();

        let start = self.clock.now_us();
        let result = {
            let mut sink = SwitchProgress {
                renderer: &mut self.renderer,
                tracker: &mut self.progress,
                ticker: &mut self.ticker,
                clock: &self.clock,
            };
            switch::run_card_switch(&mut self.cards, &mut self.emulator, &mut sink)
        };
        if let Err(e) = result {
            warn!("Switch: card reload failed: {:?}", e);
        }
        let end = self.clock.now_us();
        info!("Switch: full card switch took {} ms", end.saturating_sub(start) / 1000);

        self.switches += 1;
        self.goto(Screen::Main);
        self.keys.flush();

        if self.power.activity(end) {
            self.renderer.set_display_on(true);
        }
    }

    fn render(&mut self) {
        if let Err(e) = self.renderer.process_pending() {
            warn!("GUI: render failed: {:?}", e);
        }
    }

    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigator.state()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn pending_switch(&self) -> &PendingCardSwitch {
        &self.pending
    }

    pub fn switch_phase(&self) -> SwitchPhase {
        if self.screens.current() == Screen::CardSwitch {
            return SwitchPhase::Switching;
        }
        match self.pending.deadline_us() {
            Some(deadline_us) => SwitchPhase::Armed { deadline_us },
            None => SwitchPhase::Idle,
        }
    }

    /// Completed card switches since boot.
    pub fn switch_count(&self) -> u32 {
        self.switches
    }

    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn cards(&self) -> &C {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut C {
        &mut self.cards
    }

    pub fn emulator(&self) -> &E {
        &self.emulator
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut K {
        &mut self.keys
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }
}
