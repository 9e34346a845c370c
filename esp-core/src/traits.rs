//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::frame::FrameBuffer;
use crate::pwm::RgbIntensity;

/// Fehler-Typ für LED-Matrix-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
}

/// Trait für die 5x5 SmartLED-Matrix (WS2812/Neopixel)
///
/// Ein `write` überträgt den kompletten Frame blockierend auf die
/// Datenleitung (800 kHz Bit-Protokoll, Kanal-Reihenfolge G,R,B pro
/// Pixel, abgeschlossen durch die Reset-Lücke des Protokolls).
///
/// # Implementierungen
/// - **Production:** RmtMatrixWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockMatrixWriter (in-memory Mock)
pub trait MatrixWriter: Send {
    /// Schreibt den Pixel-Buffer auf die Matrix
    ///
    /// Blockiert bis alle Pixel übertragen wurden.
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt.
    fn write(&mut self, frame: &FrameBuffer) -> Result<(), LedError>;
}

/// Trait für die drei PWM-Kanäle der Ampel-LED
///
/// Die Träger-Frequenz ist fest (1 kHz, siehe [`crate::pwm::CARRIER`]);
/// nur die Duty-Cycles ändern sich mit der Phase.
pub trait RgbPwm: Send {
    /// Setzt die Intensität aller drei Kanäle (Anteile in [0, 1])
    /// und aktiviert sie
    fn set_intensity(&mut self, intensity: RgbIntensity);
}

/// Trait für den PWM-Buzzer
///
/// `set_frequency(0)` deaktiviert den Kanal. Die Divider/Top-Berechnung
/// (inkl. Schutz vor Divider 0) liegt in [`crate::pwm::tone_config`].
pub trait Buzzer: Send {
    /// Konfiguriert den Kanal auf `hz` bei 50 % Duty; `hz == 0` schaltet ab
    fn set_frequency(&mut self, hz: u32);
}
