// LEDC-Implementierung des RgbPwm-Traits
//
// Drei LEDC-Kanäle teilen sich einen Timer mit der festen
// Träger-Frequenz aus esp-core (1 kHz); pro Phase ändern sich nur die
// Duty-Cycles.

use defmt::error;
use esp_core::pwm::{CARRIER, RgbIntensity};
use esp_core::traits::RgbPwm;
use esp_hal::ledc::LowSpeed;
use esp_hal::ledc::channel::{Channel, ChannelIFace};

/// Real Hardware RGB PWM über drei LEDC-Kanäle
///
/// Die Kanäle werden in `main` gegen den (statischen) Träger-Timer
/// konfiguriert und hier nur noch im Duty-Cycle verstellt.
pub struct LedcRgbPwm {
    red: Channel<'static, LowSpeed>,
    green: Channel<'static, LowSpeed>,
    blue: Channel<'static, LowSpeed>,
}

impl LedcRgbPwm {
    pub fn new(
        red: Channel<'static, LowSpeed>,
        green: Channel<'static, LowSpeed>,
        blue: Channel<'static, LowSpeed>,
    ) -> Self {
        Self { red, green, blue }
    }
}

impl RgbPwm for LedcRgbPwm {
    fn set_intensity(&mut self, intensity: RgbIntensity) {
        // Anteile laufen über die Zähler-Arithmetik des Trägers auf
        // die Prozent-API der LEDC
        for (channel, fraction) in [
            (&self.red, intensity.r),
            (&self.green, intensity.g),
            (&self.blue, intensity.b),
        ] {
            if channel.set_duty(CARRIER.duty_percent(fraction)).is_err() {
                error!("LEDC set_duty fehlgeschlagen");
            }
        }
    }
}
