//! PWM-Arithmetik für Ampel-LED und Buzzer
//!
//! Alle Berechnungen laufen gegen den 80 MHz APB-Takt des ESP32-C6.
//! Die Hardware-Crates übernehmen nur die fertigen Werte; dadurch ist
//! die komplette Divider/Top-Arithmetik auf dem Host testbar.

/// Basistakt der PWM-Peripherie (ESP32-C6 APB-Clock)
pub const PWM_BASE_CLOCK_HZ: u32 = 80_000_000;

/// Schrittweite der Tone-Divider-Berechnung (vgl. 12-bit Zählerbreite)
const TONE_COUNTER_STEPS: u32 = 4096;

/// Konfiguration eines PWM-Kanals
///
/// Invariante: `level <= top` (Duty-Level darf den Zähler-Umlauf
/// nicht überschreiten).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmChannelConfig {
    /// Clock-Divider (>= 1)
    pub divider: u32,
    /// Zähler-Umlaufwert ("wrap")
    pub top: u32,
    /// Duty-Level (Anzahl Zähler-Schritte high)
    pub level: u32,
}

impl PwmChannelConfig {
    /// Frequenz eines vollen Zähler-Umlaufs in Hz
    pub const fn frequency_hz(&self) -> u32 {
        PWM_BASE_CLOCK_HZ / (self.divider * (self.top + 1))
    }

    /// Duty-Level eines Anteils in [0, 1] gegen diesen Zähler-Umlauf
    ///
    /// `level = floor(anteil * (top+1))`, auf `top` geklemmt, damit die
    /// Invariante `level <= top` auch bei Anteil 1.0 hält.
    pub fn level_for(&self, fraction: f32) -> u32 {
        let level = (fraction * (self.top + 1) as f32) as u32;
        level.min(self.top)
    }

    /// Duty-Level eines Anteils als Prozent des Umlaufs (gerundet)
    ///
    /// Brücke zur Prozent-API der LEDC-Kanäle: der Anteil wird erst in
    /// Zähler-Schritte übersetzt und dann auf Prozent abgebildet.
    pub fn duty_percent(&self, fraction: f32) -> u8 {
        let level = self.level_for(fraction);
        ((level * 100 + (self.top + 1) / 2) / (self.top + 1)) as u8
    }
}

/// Träger-Konfiguration der drei Ampel-Kanäle: 80 MHz / 80 / 1000 = 1 kHz
pub const CARRIER: PwmChannelConfig = PwmChannelConfig {
    divider: 80,
    top: 999,
    level: 0,
};

/// Intensität der drei Ampel-Kanäle als Anteile in [0, 1]
///
/// Die Zustandsmaschine nutzt 0.5 für leuchtende Kanäle, um die LEDs
/// mit halber Helligkeit zu betreiben.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbIntensity {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbIntensity {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Berechnet Divider, Top und Duty-Level für eine Buzzer-Frequenz
///
/// `hz == 0` bedeutet "Buzzer aus" und liefert `None`. Für `hz > 0`
/// wird der ganzzahlige Divider so gewählt, dass die Umlauf-Frequenz
/// des Kanals `hz` entspricht (im Rahmen der Integer-Rundung), bei
/// 50 % Duty. Ein Divider von 0 (sehr hohe Frequenzen) wird auf 1
/// angehoben statt durch 0 zu teilen.
pub fn tone_config(hz: u32) -> Option<PwmChannelConfig> {
    if hz == 0 {
        return None;
    }
    // Mehr als base/2 ist nicht darstellbar: der Zähler braucht
    // mindestens zwei Schritte pro Umlauf
    let hz = hz.min(PWM_BASE_CLOCK_HZ / 2);
    let mut divider = PWM_BASE_CLOCK_HZ / hz.saturating_mul(TONE_COUNTER_STEPS);
    if divider == 0 {
        divider = 1;
    }
    let top = PWM_BASE_CLOCK_HZ / (divider * hz) - 1;
    Some(PwmChannelConfig {
        divider,
        top,
        level: (top + 1) / 2,
    })
}
