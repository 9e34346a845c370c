//! ESP Core - Platform-agnostic Logic and Traits der Ampelsteuerung
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, Pure Logic und die Zustandsmaschine:
//! Phasenlogik, Pixel-Buffer, Glyphen, PWM-Arithmetik und Entprellung.

#![no_std]

pub mod button;
pub mod frame;
pub mod pwm;
pub mod signal;
pub mod traits;

// Re-exports für einfachen Zugriff
pub use button::{DEBOUNCE_WINDOW_MS, RequestCell};
pub use frame::{FrameBuffer, Glyph, LED_COUNT, MATRIX_HEIGHT, MATRIX_WIDTH, SIGN_STOP, SIGN_WALK};
pub use pwm::{CARRIER, PWM_BASE_CLOCK_HZ, PwmChannelConfig, RgbIntensity, tone_config};
pub use signal::{
    Phase, Pictogram, RED_STEP_COUNT, SignalController, SignalStep, red_phase_steps,
};
pub use traits::{Buzzer, LedError, MatrixWriter, RgbPwm};
