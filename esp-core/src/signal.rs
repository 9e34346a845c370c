//! Zustandsmaschine des Ampel-Zyklus
//!
//! Der [`SignalController`] kennt nur Phasen, Zeiten und Übergänge -
//! keine Hardware. Die Firmware-Task setzt die hier gelieferten
//! Intensitäten, Glyphen und Wartezeiten um; die Tests auf dem Host
//! simulieren denselben Ablauf gegen eine künstliche Uhr.

use rgb::RGB8;

use crate::button::RequestCell;
use crate::frame::{Glyph, SIGN_STOP, SIGN_WALK};
use crate::pwm::RgbIntensity;

/// Feste Grün-Phase: läuft immer voll durch, ignoriert Anforderungen
pub const T_GREEN_MANDATORY_MS: u32 = 4000;
/// Flexible Grün-Phase: Obergrenze, kann durch Anforderung verkürzt werden
pub const T_GREEN_FLEXIBLE_MS: u32 = 6000;
/// Gelb-Phase
pub const T_YELLOW_MS: u32 = 3000;
/// Rot-Phase (Basiszeit)
pub const T_RED_MS: u32 = 4000;
/// Rot-Verlängerung wenn bei Rot-Eintritt eine Anforderung anstand
pub const T_RED_EXTENSION_MS: u32 = 6000;

/// Buzzer-Kadenz der Rot-Phase: drei kurze Pieptöne beim Öffnen
pub const OPEN_BEEP_HZ: u32 = 1000;
pub const OPEN_BEEP_MS: u32 = 200;
pub const OPEN_BEEP_PAUSE_MS: u32 = 100;
pub const OPEN_BEEP_COUNT: u32 = 3;
/// Ein langer, tieferer Piepton beim Schließen
pub const CLOSE_BEEP_HZ: u32 = 500;
pub const CLOSE_BEEP_MS: u32 = 800;

/// Eine Phase des Ampel-Zyklus - genau eine ist zu jedem Zeitpunkt aktiv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    MandatoryGreen,
    FlexibleGreen,
    Yellow,
    Red,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Phase {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Phase::MandatoryGreen => defmt::write!(fmt, "MandatoryGreen"),
            Phase::FlexibleGreen => defmt::write!(fmt, "FlexibleGreen"),
            Phase::Yellow => defmt::write!(fmt, "Yellow"),
            Phase::Red => defmt::write!(fmt, "Red"),
        }
    }
}

impl Phase {
    /// Ampel-Farbe der Phase (halbe Helligkeit für leuchtende Kanäle)
    pub const fn light(&self) -> RgbIntensity {
        match self {
            Phase::MandatoryGreen | Phase::FlexibleGreen => RgbIntensity::new(0.0, 0.5, 0.0),
            Phase::Yellow => RgbIntensity::new(0.5, 0.5, 0.0),
            Phase::Red => RgbIntensity::new(0.5, 0.0, 0.0),
        }
    }

    /// (Maximale) Dauer der Phase; die Rot-Verlängerung kommt über
    /// [`SignalController::red_extension_ms`] hinzu
    pub const fn duration_ms(&self) -> u32 {
        match self {
            Phase::MandatoryGreen => T_GREEN_MANDATORY_MS,
            Phase::FlexibleGreen => T_GREEN_FLEXIBLE_MS,
            Phase::Yellow => T_YELLOW_MS,
            Phase::Red => T_RED_MS,
        }
    }

    /// Nur die flexible Grün-Phase darf vorzeitig enden
    pub const fn interruptible(&self) -> bool {
        matches!(self, Phase::FlexibleGreen)
    }
}

/// Fußgänger-Piktogramme der 5x5-Matrix
///
/// Die Matrix zeigt Piktogramme nur während der Rot-Phase (und das
/// Stopp-Piktogramm als Startbild); in Grün und Gelb bleibt sie
/// unverändert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pictogram {
    Walk,
    Stop,
}

impl Pictogram {
    pub const fn glyph(&self) -> &'static Glyph {
        match self {
            Pictogram::Walk => &SIGN_WALK,
            Pictogram::Stop => &SIGN_STOP,
        }
    }

    /// Farbe vor der Intensitäts-Reduktion des Pixel-Buffers
    pub const fn color(&self) -> RGB8 {
        match self {
            Pictogram::Walk => RGB8::new(0, 255, 0),
            Pictogram::Stop => RGB8::new(255, 0, 0),
        }
    }
}

/// Ein Schritt des Rot-Phasen-Ablaufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStep {
    /// Piktogramm auf die Matrix bringen
    Show(Pictogram),
    /// Ton für `ms` Millisekunden, danach Stille
    Tone { hz: u32, ms: u32 },
    /// Pause zwischen den Öffnungs-Tönen
    Quiet { ms: u32 },
    /// Offene Querungszeit; nur dieser Schritt zählt als Phasendauer
    Hold { ms: u32 },
}

/// Schrittzahl des Rot-Skripts: je Öffnungs-Piepton ein Ton- und ein
/// Pausenschritt, dazu zwei Piktogramm-Wechsel, Querungszeit und
/// Schlusston
pub const RED_STEP_COUNT: usize = 2 * OPEN_BEEP_COUNT as usize + 4;

/// Ausgabe-Skript der Rot-Phase
///
/// Drei kurze Pieptöne kündigen die Öffnung an, dann steht das
/// Geh-Piktogramm für die Basiszeit plus Verlängerung, zum Schluss
/// wechselt die Matrix zurück auf Stopp und ein langer tiefer Ton
/// meldet das Schließen. Firmware und Host-Tests führen dasselbe
/// Skript aus.
pub const fn red_phase_steps(extension_ms: u32) -> [SignalStep; RED_STEP_COUNT] {
    [
        SignalStep::Tone { hz: OPEN_BEEP_HZ, ms: OPEN_BEEP_MS },
        SignalStep::Quiet { ms: OPEN_BEEP_PAUSE_MS },
        SignalStep::Tone { hz: OPEN_BEEP_HZ, ms: OPEN_BEEP_MS },
        SignalStep::Quiet { ms: OPEN_BEEP_PAUSE_MS },
        SignalStep::Tone { hz: OPEN_BEEP_HZ, ms: OPEN_BEEP_MS },
        SignalStep::Quiet { ms: OPEN_BEEP_PAUSE_MS },
        SignalStep::Show(Pictogram::Walk),
        SignalStep::Hold { ms: T_RED_MS + extension_ms },
        SignalStep::Show(Pictogram::Stop),
        SignalStep::Tone { hz: CLOSE_BEEP_HZ, ms: CLOSE_BEEP_MS },
    ]
}

/// Die Ampel-Zustandsmaschine
///
/// Startet in `MandatoryGreen` und läuft endlos; Übergänge hängen
/// ausschließlich von der verstrichenen Zeit und dem Anforderungs-Flag
/// ab.
#[derive(Debug)]
pub struct SignalController {
    phase: Phase,
}

impl SignalController {
    pub const fn new() -> Self {
        Self {
            phase: Phase::MandatoryGreen,
        }
    }

    /// Aktuelle Phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Rot-Verlängerung bei Phaseneintritt
    ///
    /// Steht bei Rot-Eintritt eine Anforderung an, wird sie hier
    /// konsumiert (die Anforderung gilt damit als bedient) und die
    /// Phase um [`T_RED_EXTENSION_MS`] verlängert.
    pub fn red_extension_ms(&self, request: &RequestCell) -> u32 {
        debug_assert_eq!(self.phase, Phase::Red);
        if request.take() { T_RED_EXTENSION_MS } else { 0 }
    }

    /// Schaltet nach Ablauf der aktuellen Phase weiter
    ///
    /// `request_pending` entscheidet nur den Übergang aus der festen
    /// Grün-Phase: mit Anforderung wird die flexible Grün-Phase
    /// übersprungen. Das Flag wird hier nicht gelöscht - das passiert
    /// erst, wenn die Anforderung bei Rot bedient wird.
    pub fn advance(&mut self, request_pending: bool) -> Phase {
        self.phase = match self.phase {
            Phase::MandatoryGreen if request_pending => Phase::Yellow,
            Phase::MandatoryGreen => Phase::FlexibleGreen,
            Phase::FlexibleGreen => Phase::Yellow,
            Phase::Yellow => Phase::Red,
            Phase::Red => Phase::MandatoryGreen,
        };
        self.phase
    }
}

impl Default for SignalController {
    fn default() -> Self {
        Self::new()
    }
}
