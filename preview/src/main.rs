//! Desktop preview of the clock face
//!
//! Renders the matrix and both rings in a window. The arrow keys stand in
//! for the two front buttons and a slider replaces the light sensor.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui;
use ledclock_core::color::{BLACK, BLUE, DARK_GRAY, GREEN, ORANGE, PURPLE, RED, WHITE};
use ledclock_core::{
    AdcReader, AmbientLightSensor, ButtonConfig, ButtonEvent, ButtonId, ButtonSet,
    DEFAULT_LED_COUNT, Duration, Instant, Level, LightSensorConfig, MatrixLayout, PinId, PinReader,
    PixelRenderer, RainbowOverride, Rgb, Ring, ShimmerOverride, SmartLedDriver, Stopwatch,
    WatchdogControl,
};
use smart_leds::{RGB8, SmartLedsWrite};

/// Size of each LED in pixels
const LED_SIZE: f32 = 16.0;

/// Gap between matrix LEDs
const LED_GAP: f32 = 4.0;

const UP_PIN: PinId = 0;
const DOWN_PIN: PinId = 1;

/// Events kept in the on-screen log
const EVENT_LOG_LEN: usize = 8;

const PALETTE: [Rgb; 6] = [WHITE, RED, GREEN, BLUE, ORANGE, PURPLE];

type PreviewDriver = SmartLedDriver<FrameCounter, DEFAULT_LED_COUNT>;

/// Writer that only counts frames; the window reads the driver's stored pixels
#[derive(Default)]
struct FrameCounter {
    frames: u64,
}

impl SmartLedsWrite for FrameCounter {
    type Error = ();
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        iterator.into_iter().for_each(drop);
        self.frames += 1;
        Ok(())
    }
}

/// Two active-low buttons driven by the arrow keys
#[derive(Default)]
struct KeyPins {
    up: bool,
    down: bool,
}

impl PinReader for KeyPins {
    fn read(&mut self, pin: PinId) -> Option<Level> {
        let held = match pin {
            UP_PIN => self.up,
            DOWN_PIN => self.down,
            _ => return None,
        };
        Some(if held { Level::Low } else { Level::High })
    }
}

/// Light sensor replaced by a slider value
struct SliderAdc {
    raw: u16,
}

impl WatchdogControl for SliderAdc {}

impl AdcReader for SliderAdc {
    fn read_burst(&mut self, samples: &mut [u16]) {
        samples.fill(self.raw);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverrideMode {
    Off,
    Rainbow,
    Shimmer,
}

impl OverrideMode {
    const fn next(self) -> Self {
        match self {
            Self::Off => Self::Rainbow,
            Self::Rainbow => Self::Shimmer,
            Self::Shimmer => Self::Off,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Rainbow => "rainbow",
            Self::Shimmer => "shimmer",
        }
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_title("LED Clock Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "ledclock-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    renderer: PixelRenderer<PreviewDriver, DEFAULT_LED_COUNT>,
    buttons: ButtonSet<2>,
    up: ButtonId,
    down: ButtonId,
    pins: KeyPins,
    sensor: AmbientLightSensor<SliderAdc>,
    /// Simulated time of day
    clock: Stopwatch,
    mode: OverrideMode,
    color: usize,
    /// Show logical colors instead of what the LEDs receive
    show_logical: bool,
    events: Vec<String>,
}

impl PreviewApp {
    fn new() -> Self {
        let renderer = PixelRenderer::new(
            SmartLedDriver::new(FrameCounter::default()),
            MatrixLayout::default(),
        )
        .expect("default layout fits the default buffer");

        let mut buttons = ButtonSet::new();
        let up = buttons
            .register(&[UP_PIN], ButtonConfig::default())
            .expect("registry has room");
        let down = buttons
            .register(
                &[DOWN_PIN],
                ButtonConfig::default()
                    .with_repeat(Duration::from_millis(400), Duration::from_millis(100)),
            )
            .expect("registry has room");

        let sensor = AmbientLightSensor::new(SliderAdc { raw: 40 }, LightSensorConfig::default())
            .expect("default sensor config is valid");

        Self {
            renderer,
            buttons,
            up,
            down,
            pins: KeyPins::default(),
            sensor,
            clock: Stopwatch::start(Instant::now()),
            mode: OverrideMode::Off,
            color: 0,
            show_logical: false,
            events: Vec::new(),
        }
    }

    fn handle(&mut self, id: ButtonId, event: ButtonEvent) {
        if id == self.up && event == ButtonEvent::Press {
            self.mode = self.mode.next();
            match self.mode {
                OverrideMode::Off => self.renderer.clear_color_override(),
                OverrideMode::Rainbow => self.renderer.set_color_override(RainbowOverride::new()),
                OverrideMode::Shimmer => {
                    let matrix_len = self.renderer.layout().matrix_len();
                    self.renderer
                        .set_color_override(ShimmerOverride::new(matrix_len));
                }
            }
        }
        if id == self.down && matches!(event, ButtonEvent::Press | ButtonEvent::Repeat) {
            self.color = (self.color + 1) % PALETTE.len();
        }

        let name = if id == self.up { "up" } else { "down" };
        self.events.push(format!("{name}: {event:?}"));
        if self.events.len() > EVENT_LOG_LEN {
            self.events.remove(0);
        }
    }

    /// Compose the clock face for `now`
    fn compose(&mut self, now: Instant) {
        let elapsed = self.clock.elapsed(now).as_secs();
        let minutes = (elapsed / 60) % 60;
        let seconds = elapsed % 60;
        let color = PALETTE[self.color];
        let layout = self.renderer.layout();

        self.renderer.begin_frame(now);
        self.renderer.clear(BLACK, true);
        self.renderer
            .draw_text(0, &format!("{minutes:02}:{seconds:02}"), color);

        let outer = usize::from(layout.outer_ring);
        let inner = usize::from(layout.inner_ring);
        for pos in 0..outer {
            self.renderer
                .draw_ring_pixel(Ring::Outer, pos, DARK_GRAY, false);
        }
        #[allow(clippy::cast_possible_truncation)]
        let (minutes, seconds) = (minutes as usize, seconds as usize);
        self.renderer
            .draw_ring_pixel(Ring::Outer, minutes * outer / 60, color, true);
        self.renderer
            .draw_ring_pixel(Ring::Inner, seconds * inner / 60, RED, false);
    }

    fn paint_leds(&self, ui: &mut egui::Ui) {
        let layout = self.renderer.layout();
        let colors: &[RGB8] = if self.show_logical {
            self.renderer.pixels()
        } else {
            self.renderer.driver().raw_pixels()
        };
        let to_color32 = |index: usize| {
            colors
                .get(index)
                .map_or(egui::Color32::BLACK, |c| egui::Color32::from_rgb(c.r, c.g, c.b))
        };

        let pitch = LED_SIZE + LED_GAP;
        let width = f32::from(layout.width) * pitch;
        let height = f32::from(layout.height) * pitch;
        let inner_radius = width / 2.0 + pitch * 1.5;
        let outer_radius = inner_radius + pitch * 1.5;
        let side = outer_radius * 2.0 + pitch * 2.0;

        let (response, painter) =
            ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
        let center = response.rect.center();
        painter.rect_filled(response.rect, 8.0, egui::Color32::from_gray(20));

        let origin = center - egui::vec2(width / 2.0, height / 2.0);
        for y in 0..layout.height {
            for x in 0..layout.width {
                let index = usize::from(y) * usize::from(layout.width) + usize::from(x);
                let min = origin + egui::vec2(f32::from(x) * pitch, f32::from(y) * pitch);
                let rect = egui::Rect::from_min_size(min, egui::vec2(LED_SIZE, LED_SIZE));
                painter.rect_filled(rect, 3.0, to_color32(index));
            }
        }

        for (ring, radius) in [(Ring::Inner, inner_radius), (Ring::Outer, outer_radius)] {
            let (start, len) = layout.ring_span(ring);
            #[allow(clippy::cast_precision_loss)]
            for pos in 0..len {
                let angle = TAU * pos as f32 / len as f32 - FRAC_PI_2;
                let at = center + egui::vec2(angle.cos(), angle.sin()) * radius;
                painter.circle_filled(at, LED_SIZE / 2.0, to_color32(start + pos));
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        ctx.input(|input| {
            self.pins.up = input.key_down(egui::Key::ArrowUp);
            self.pins.down = input.key_down(egui::Key::ArrowDown);
        });
        for (id, event) in self.buttons.poll(now, &mut self.pins) {
            self.handle(id, event);
        }

        let brightness = self.sensor.get(now);
        self.renderer.set_brightness(brightness);
        self.compose(now);
        self.renderer.show();

        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Light sensor:");
                        ui.add(egui::Slider::new(&mut self.sensor.adc_mut().raw, 0..=120));
                    });
                    ui.label(format!(
                        "Level: {:.1}  Brightness: {}",
                        self.sensor.level(),
                        self.renderer.brightness()
                    ));
                    ui.checkbox(&mut self.show_logical, "Logical colors");
                    ui.label(format!(
                        "Frames sent: {}",
                        self.renderer.driver().writer().frames
                    ));
                });

                ui.add_space(16.0);

                ui.vertical(|ui| {
                    ui.label("Up: cycle effect, Down: cycle color");
                    ui.label(format!("Effect: {}", self.mode.as_str()));
                    ui.label(format!(
                        "Held: {}",
                        if self.buttons.are_any_pressed(&mut self.pins) {
                            "yes"
                        } else {
                            "no"
                        }
                    ));
                    for line in &self.events {
                        ui.monospace(line);
                    }
                });
            });

            ui.add_space(16.0);
            self.paint_leds(ui);
        });
    }
}
