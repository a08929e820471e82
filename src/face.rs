//! Face scenes for each mood
//!
//! [`MoodRenderer`] clears the canvas, draws two eyes for the mood and then
//! plays the mood's [`Cue`]. Each render starts from a cleared screen, so
//! nothing carries over between moods.
//!
//! | Mood    | Eyes                                      | Sound          |
//! |---------|-------------------------------------------|----------------|
//! | Neutral | two 50x80 blocks                          | none           |
//! | Sad     | two 50x50 blocks with a notch cut below   | [`Cue::SAD`]   |
//! | Happy   | two glowing crescents opening downward    | [`Cue::HAPPY`] |
//!
//! Coordinates assume the native 240x320 portrait orientation.

use embedded_hal::delay::DelayNs;

use crate::audio::{Buzzer, Cue, CuePlayer};
use crate::color::{Color, Rgb};
use crate::dispatcher::MoodSink;
use crate::error::RenderError;
use crate::mood::Mood;
use crate::raster::Canvas;

/// Left edge of the left and right eye blocks
const EYE_X: [i32; 2] = [60, 130];
/// Top edge of the eye blocks
const EYE_TOP: i32 = 120;
const EYE_WIDTH: i32 = 50;
const NEUTRAL_EYE_HEIGHT: i32 = 80;
const SAD_EYE_HEIGHT: i32 = 50;
/// Depth of the notch below a sad eye
const SAD_NOTCH_DEPTH: i32 = 30;

/// Centers of the happy crescents
const CRESCENT_CENTERS: [(i32, i32); 2] = [(85, 140), (155, 140)];
const CRESCENT_RADIUS: i32 = 25;
const CRESCENT_THICKNESS: i32 = 5;
const GLOW_RADIUS: i32 = 30;
const GLOW_STEP: usize = 3;
/// Crescent sweep in degrees; 270° is straight up
const CRESCENT_START_DEG: i32 = 200;
const CRESCENT_END_DEG: i32 = 340;

/// Colors used for the face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceStyle {
    /// Eye color, also the base of the happy glow ramp
    pub eye: Rgb,
    /// Screen clear color; sad notches are cut in this color
    pub background: Color,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            eye: Rgb::new(98, 35, 204),
            background: Color::BLACK,
        }
    }
}

type RenderResult<C, B> =
    core::result::Result<(), RenderError<<C as Canvas>::Error, <B as embedded_hal::pwm::ErrorType>::Error>>;

/// Draws mood faces on a canvas and plays their cues
///
/// ## Example
///
/// ```rust,no_run
/// use moodpanel::{Config, Ili9341, Mood, MoodRenderer};
/// # use embedded_hal::delay::DelayNs;
/// # use embedded_hal::pwm::{ErrorType, SetDutyCycle};
/// # use moodpanel::{Buzzer, PanelInterface};
/// # struct MockInterface;
/// # impl PanelInterface for MockInterface {
/// #     type Error = core::convert::Infallible;
/// #     fn send_command(&mut self, _: u8, _: Option<&[u8]>) -> Result<(), Self::Error> { Ok(()) }
/// #     fn write_pixels(&mut self, _: &[u8], _: u16) -> Result<(), Self::Error> { Ok(()) }
/// #     fn reset<D: DelayNs>(&mut self, _: &mut D, _: u32) {}
/// # }
/// # struct Pwm;
/// # impl ErrorType for Pwm { type Error = core::convert::Infallible; }
/// # impl SetDutyCycle for Pwm {
/// #     fn max_duty_cycle(&self) -> u16 { 65535 }
/// #     fn set_duty_cycle(&mut self, _: u16) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl Buzzer for Pwm {
/// #     fn set_frequency(&mut self, _: u32) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct Delay;
/// # impl DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
/// # let mut delay = Delay;
/// let mut display = Ili9341::new(MockInterface, Config::default());
/// let _ = display.begin(&mut delay);
///
/// let mut renderer = MoodRenderer::new(display, Pwm);
/// let _ = renderer.show(Mood::Happy, &mut delay);
/// ```
pub struct MoodRenderer<C, B>
where
    C: Canvas,
    B: Buzzer,
{
    canvas: C,
    player: CuePlayer<B>,
    style: FaceStyle,
}

impl<C, B> MoodRenderer<C, B>
where
    C: Canvas,
    B: Buzzer,
{
    /// Create a renderer with the default style
    pub fn new(canvas: C, buzzer: B) -> Self {
        Self::with_style(canvas, buzzer, FaceStyle::default())
    }

    /// Create a renderer with a custom style
    pub fn with_style(canvas: C, buzzer: B, style: FaceStyle) -> Self {
        Self {
            canvas,
            player: CuePlayer::new(buzzer),
            style,
        }
    }

    /// Current colors
    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    /// Draw the face for `mood` without sound
    pub fn render(&mut self, mood: Mood) -> Result<(), C::Error> {
        let eye = self.style.eye.to_color();
        let background = self.style.background;

        self.canvas.fill_screen(background)?;

        match mood {
            Mood::Neutral => {
                for x in EYE_X {
                    self.canvas
                        .fill_rect(x, EYE_TOP, EYE_WIDTH, NEUTRAL_EYE_HEIGHT, eye)?;
                }
            }
            Mood::Sad => {
                for x in EYE_X {
                    self.canvas
                        .fill_rect(x, EYE_TOP, EYE_WIDTH, SAD_EYE_HEIGHT, eye)?;
                }
                let base = EYE_TOP + SAD_EYE_HEIGHT;
                for x in EYE_X {
                    self.canvas.fill_triangle(
                        x,
                        base,
                        x + EYE_WIDTH,
                        base,
                        x + EYE_WIDTH / 2,
                        base + SAD_NOTCH_DEPTH,
                        background,
                    )?;
                }
            }
            Mood::Happy => {
                for (cx, cy) in CRESCENT_CENTERS {
                    self.draw_crescent(cx, cy)?;
                }
            }
        }

        Ok(())
    }

    /// Crescent with a glow that fades toward its inner edge
    fn draw_crescent(&mut self, cx: i32, cy: i32) -> Result<(), C::Error> {
        let eye = self.style.eye;

        for radius in (CRESCENT_RADIUS + 1..=GLOW_RADIUS).rev().step_by(GLOW_STEP) {
            let shade = eye.scale(radius as u32, GLOW_RADIUS as u32).to_color();
            self.canvas.fill_arc(
                cx,
                cy,
                radius,
                radius - GLOW_STEP as i32,
                CRESCENT_START_DEG,
                CRESCENT_END_DEG,
                shade,
            )?;
        }

        self.canvas.fill_arc(
            cx,
            cy,
            CRESCENT_RADIUS,
            CRESCENT_RADIUS - CRESCENT_THICKNESS,
            CRESCENT_START_DEG,
            CRESCENT_END_DEG,
            eye.to_color(),
        )
    }

    /// Draw the face for `mood` and play its cue
    pub fn show<D: DelayNs>(&mut self, mood: Mood, delay: &mut D) -> RenderResult<C, B> {
        self.render(mood).map_err(RenderError::Canvas)?;
        log::info!("{} face rendered", mood);

        if let Some(cue) = Cue::for_mood(mood) {
            self.player.play(&cue, delay).map_err(RenderError::Audio)?;
        }
        Ok(())
    }

    /// Silence the buzzer
    pub fn silence(&mut self) -> Result<(), B::Error> {
        self.player.silence()
    }

    /// Give back the canvas and buzzer
    pub fn release(self) -> (C, B) {
        (self.canvas, self.player.release())
    }
}

impl<C, B> MoodSink for MoodRenderer<C, B>
where
    C: Canvas,
    C::Error: core::fmt::Debug,
    B: Buzzer,
{
    type Error = RenderError<C::Error, B::Error>;

    fn prepare(&mut self) -> Result<(), Self::Error> {
        self.silence().map_err(RenderError::Audio)
    }

    fn show<D: DelayNs>(&mut self, mood: Mood, delay: &mut D) -> Result<(), Self::Error> {
        MoodRenderer::show(self, mood, delay)
    }
}
