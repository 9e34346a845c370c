// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// Ampel-LED Konfiguration (drei PWM-Kanäle)
// ============================================================================

/// GPIO-Pin für den roten Ampel-Kanal (LEDC Channel 0)
pub const LED_RED_GPIO_PIN: u8 = 0;

/// GPIO-Pin für den grünen Ampel-Kanal (LEDC Channel 1)
pub const LED_GREEN_GPIO_PIN: u8 = 1;

/// GPIO-Pin für den blauen Ampel-Kanal (LEDC Channel 2)
pub const LED_BLUE_GPIO_PIN: u8 = 2;

// ============================================================================
// Fußgänger-Taster
// ============================================================================

/// GPIO-Pins der beiden Taster (aktiv-low, interne Pull-Ups)
pub const BUTTON_A_GPIO_PIN: u8 = 4;
pub const BUTTON_B_GPIO_PIN: u8 = 5;

// ============================================================================
// LED-Matrix Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung der 5x5 Matrix (WS2812)
pub const MATRIX_GPIO_PIN: u8 = 8;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// Buzzer
// ============================================================================

/// GPIO-Pin des Buzzers
pub const BUZZER_GPIO_PIN: u8 = 10;

// ============================================================================
// Zeitverhalten der Hauptschleife
// ============================================================================

/// Abfrage-Intervall der interruptiblen Wartezeit in ms
/// (die flexible Grün-Phase pollt das Anforderungs-Flag in diesem Takt)
pub const REQUEST_POLL_INTERVAL_MS: u64 = 10;

/// Wartezeit nach dem Löschen der Matrix beim Start in ms
pub const STARTUP_SETTLE_MS: u64 = 1000;
