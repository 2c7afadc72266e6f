//! SSD1306 OLED renderer.
//!
//! Keeps a small model of what is on screen (active screen, label texts,
//! progress line, menu snapshot, marquee position) and redraws the whole
//! frame from it in `process_pending` when something changed.

use defmt::warn;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::{String, Vec};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use ps2mc_ui::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_MENU_ITEMS, PROGRESS_LINE_WIDTH};
use ps2mc_ui::ui::menu::{MenuItem, MenuPage};
use ps2mc_ui::{Error, Label, Renderer, Screen};

/// Concrete display driver, generic over the HAL's I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const WIDTH: i32 = DISPLAY_WIDTH as i32;
const HEIGHT: i32 = DISPLAY_HEIGHT as i32;
const CHAR_W: u32 = 6;
const ROW_H: i32 = 10;
const BAR_H: u32 = 12;

const MARQUEE_TEXT: &str =
    "Press any button to deactivate FreePSXBoot and return to the Memory Card mode";
const MARQUEE_GAP_PX: u32 = 24;
const MARQUEE_PX_PER_SEC: u32 = 24;

pub struct OledRenderer<I2C> {
    display: Display<I2C>,
    screen: Screen,
    index: String<8>,
    channel: String<8>,
    progress_text: String<24>,
    bar_end_x: u16,
    menu_title: Option<&'static str>,
    menu_rows: Vec<MenuItem, MAX_MENU_ITEMS>,
    menu_focus: usize,
    marquee_ms: u32,
    marquee_px: u32,
    display_on: bool,
    dirty: bool,
}

impl<I2C> OledRenderer<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and blank it.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if display.init().is_err() {
            warn!("Display: init failed");
        }
        display.clear_buffer();
        let _ = display.flush();

        Self {
            display,
            screen: Screen::Main,
            index: String::new(),
            channel: String::new(),
            progress_text: String::new(),
            bar_end_x: 0,
            menu_title: None,
            menu_rows: Vec::new(),
            menu_focus: 0,
            marquee_ms: 0,
            marquee_px: 0,
            display_on: true,
            dirty: true,
        }
    }

    fn draw(&mut self) -> Result<(), Error> {
        self.display.clear_buffer();
        let target = &mut self.display;
        let drawn = match self.screen {
            Screen::Main => draw_main(target, &self.index, &self.channel),
            Screen::Menu => draw_menu(target, self.menu_title, &self.menu_rows, self.menu_focus),
            Screen::CardSwitch => draw_card_switch(target, self.bar_end_x, &self.progress_text),
            Screen::FreePsxBoot => draw_freepsxboot(target, self.marquee_px),
        };
        drawn.map_err(|_| Error::Display)
    }
}

impl<I2C> Renderer for OledRenderer<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn load_screen(&mut self, screen: Screen) {
        self.screen = screen;
        if screen == Screen::CardSwitch {
            self.progress_text.clear();
            let _ = self.progress_text.push_str("Read XXX kB/s");
        }
        if screen == Screen::FreePsxBoot {
            self.marquee_ms = 0;
            self.marquee_px = 0;
        }
        self.dirty = true;
    }

    fn set_text(&mut self, label: Label, text: &str) {
        match label {
            Label::CardIndex => copy_truncated(&mut self.index, text),
            Label::CardChannel => copy_truncated(&mut self.channel, text),
            Label::ProgressText => copy_truncated(&mut self.progress_text, text),
        }
        self.dirty = true;
    }

    fn set_progress(&mut self, bar_end_x: u16) {
        self.bar_end_x = bar_end_x.min(DISPLAY_WIDTH);
        self.dirty = true;
    }

    fn show_menu_page(&mut self, page: &MenuPage, focus: usize) {
        self.menu_title = page.title();
        self.menu_rows.clear();
        for item in page.items() {
            // Same capacity on both sides.
            let _ = self.menu_rows.push(*item);
        }
        self.menu_focus = focus;
        self.dirty = true;
    }

    fn set_focus(&mut self, focus: usize) {
        self.menu_focus = focus;
        self.dirty = true;
    }

    fn set_display_on(&mut self, on: bool) {
        if self.display.set_display_on(on).is_err() {
            warn!("Display: power switch to {} failed", on);
        }
        self.display_on = on;
        if on {
            self.dirty = true;
        }
    }

    fn advance_clock(&mut self, elapsed_ms: u32) {
        if self.screen != Screen::FreePsxBoot {
            return;
        }
        let period_px = MARQUEE_TEXT.len() as u32 * CHAR_W + MARQUEE_GAP_PX;
        let period_ms = period_px * 1000 / MARQUEE_PX_PER_SEC;
        self.marquee_ms = (self.marquee_ms + elapsed_ms) % period_ms;

        let px = self.marquee_ms * MARQUEE_PX_PER_SEC / 1000;
        if px != self.marquee_px {
            self.marquee_px = px;
            self.dirty = true;
        }
    }

    fn process_pending(&mut self) -> Result<(), Error> {
        // Redraw once the panel is back on.
        if !self.dirty || !self.display_on {
            return Ok(());
        }
        self.dirty = false;
        self.draw()?;
        self.display.flush().map_err(|_| Error::Display)
    }
}

fn copy_truncated<const N: usize>(dst: &mut String<N>, src: &str) {
    dst.clear();
    for c in src.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}

fn text_style(color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(color)
        .build()
}

/// Draw `text` with its top edge at `y`.
fn text_at<D>(
    target: &mut D,
    text: &str,
    x: i32,
    y: i32,
    alignment: Alignment,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(text, Point::new(x, y), text_style(color), style).draw(target)?;
    Ok(())
}

fn inverted_bar<D>(target: &mut D, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(0, y), Size::new(DISPLAY_WIDTH as u32, BAR_H))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)
}

fn title<D>(target: &mut D, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    inverted_bar(target, 0)?;
    text_at(target, text, WIDTH / 2, 1, Alignment::Center, BinaryColor::Off)
}

/// Label on the left, value flush right.
fn row<D>(target: &mut D, y: i32, label: &str, value: &str, inverted: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let color = if inverted {
        Rectangle::new(Point::new(0, y - 1), Size::new(DISPLAY_WIDTH as u32, ROW_H as u32))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)?;
        BinaryColor::Off
    } else {
        BinaryColor::On
    };
    text_at(target, label, 2, y, Alignment::Left, color)?;
    text_at(target, value, WIDTH - 2, y, Alignment::Right, color)
}

fn draw_main<D>(target: &mut D, index: &str, channel: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    title(target, "PS2 Memory Card")?;
    row(target, 20, "Card", index, false)?;
    row(target, 32, "Channel", channel, false)?;

    let bottom = HEIGHT - BAR_H as i32;
    inverted_bar(target, bottom)?;
    text_at(target, "<", 2, bottom + 1, Alignment::Left, BinaryColor::Off)?;
    text_at(target, "Menu", WIDTH / 2, bottom + 1, Alignment::Center, BinaryColor::Off)?;
    text_at(target, ">", WIDTH - 2, bottom + 1, Alignment::Right, BinaryColor::Off)
}

fn draw_menu<D>(
    target: &mut D,
    page_title: Option<&str>,
    rows: &[MenuItem],
    focus: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let top = match page_title {
        Some(text) => {
            title(target, text)?;
            BAR_H as i32 + 2
        }
        None => 2,
    };

    // Scroll so the focused row stays visible.
    let visible = ((HEIGHT - top) / ROW_H).max(1) as usize;
    let first = focus.saturating_sub(visible - 1);

    for (i, item) in rows.iter().enumerate().skip(first).take(visible) {
        let y = top + (i - first) as i32 * ROW_H;
        row(target, y, item.label, item.value.unwrap_or(""), i == focus)?;
    }
    Ok(())
}

fn draw_card_switch<D>(target: &mut D, bar_end_x: u16, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    title(target, "Loading card")?;

    if bar_end_x > 0 {
        let y = HEIGHT / 2;
        Line::new(Point::new(0, y), Point::new(i32::from(bar_end_x) - 1, y))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, PROGRESS_LINE_WIDTH))
            .draw(target)?;
    }

    text_at(target, text, WIDTH / 2, HEIGHT - ROW_H, Alignment::Center, BinaryColor::On)
}

fn draw_freepsxboot<D>(target: &mut D, marquee_px: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    title(target, "FreePSXBoot")?;
    row(target, 20, "Model", "1001v3", false)?;
    row(target, 32, "Slot", "Slot 2", false)?;

    // Two copies so the text wraps around seamlessly.
    let period = (MARQUEE_TEXT.len() as u32 * CHAR_W + MARQUEE_GAP_PX) as i32;
    let x = -(marquee_px as i32);
    let y = HEIGHT - ROW_H;
    text_at(target, MARQUEE_TEXT, x, y, Alignment::Left, BinaryColor::On)?;
    text_at(target, MARQUEE_TEXT, x + period, y, Alignment::Left, BinaryColor::On)
}
