//! ps2mc-ui firmware for the nRF52840.
//!
//! Wires the host-testable GUI context to the SSD1306 panel on TWIM0, five
//! debounced buttons and the Embassy time driver, then runs the GUI loop.

#![no_std]
#![no_main]

mod hw;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use ps2mc_ui::card::sim::SimulatedCardManager;
use ps2mc_ui::config::{GUI_TASK_PERIOD_MS, KEY_QUEUE_DEPTH};
use ps2mc_ui::{Gui, GuiConfig, Key};

use hw::display::OledRenderer;
use hw::{BringUpEmulator, ChannelKeys, EmbassyClock};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static KEYS: Channel<CriticalSectionRawMutex, Key, KEY_QUEUE_DEPTH> = Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("ps2mc-ui starting");

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let renderer = OledRenderer::new(i2c);

    let buttons = [
        (p.P0_11.degrade(), Key::Menu),
        (p.P0_12.degrade(), Key::Prev),
        (p.P0_24.degrade(), Key::Next),
        (p.P0_25.degrade(), Key::Enter),
        (p.P0_06.degrade(), Key::Back),
    ];
    for (pin, key) in buttons {
        unwrap!(spawner.spawn(hw::buttons::button_task(pin, key, KEYS.sender())));
    }

    let mut gui = Gui::new(
        renderer,
        SimulatedCardManager::new(Delay),
        BringUpEmulator::default(),
        ChannelKeys::new(KEYS.receiver()),
        EmbassyClock,
        GuiConfig::default(),
    );

    info!("ps2mc-ui ready");
    loop {
        gui.task();
        Timer::after_millis(GUI_TASK_PERIOD_MS).await;
    }
}
