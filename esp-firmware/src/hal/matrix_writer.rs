// RMT-Implementierung des MatrixWriter-Traits
//
// Überträgt den Pixel-Buffer über das ESP32 RMT Peripheral auf die
// WS2812-Matrix. Der Adapter erzeugt das 800-kHz-Bit-Protokoll
// (inkl. Reset-Lücke) in Hardware; die GRB-Kanal-Reihenfolge auf der
// Leitung übernimmt er aus dem WS2812-Datenblatt.

use esp_core::frame::{FrameBuffer, LED_COUNT};
use esp_core::traits::{LedError, MatrixWriter};
use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use smart_leds_trait::SmartLedsWrite;

// Buffer-Größe für 25 LEDs (25 * 3 Farben * 8 Bits + 1 Reset)
pub const MATRIX_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

/// Real Hardware Matrix Writer
///
/// Nutzt das ESP32 RMT Peripheral um die 5x5 WS2812-Matrix anzusteuern.
/// `write` blockiert, bis alle 25 Pixel übertragen sind.
///
/// Hinweis: Der Buffer muss 'static sein, daher wird er im Task erstellt
/// und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtMatrixWriter<'a> {
    matrix: SmartLedsAdapter<'a, MATRIX_BUFFER_SIZE>,
}

impl<'a> RmtMatrixWriter<'a> {
    /// Erstellt einen neuen RmtMatrixWriter
    ///
    /// Schlägt die Übernahme des RMT-Kanals fehl, bricht der
    /// Constructor ab - ohne Matrix gibt es keinen degradierten Betrieb.
    ///
    /// # Parameter
    /// - `data_pin`: GPIO Peripheral für die Matrix-Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(25) Macro)
    pub fn new(
        data_pin: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; MATRIX_BUFFER_SIZE],
    ) -> Self {
        // RMT initialisieren - Fehler hier ist fatal (Boot-Abbruch)
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .expect("RMT-Kanal konnte nicht übernommen werden");

        // SmartLED Adapter erstellen
        let matrix = SmartLedsAdapter::new(rmt.channel0, data_pin, buffer);

        Self { matrix }
    }
}

impl<'a> MatrixWriter for RmtMatrixWriter<'a> {
    fn write(&mut self, frame: &FrameBuffer) -> Result<(), LedError> {
        self.matrix
            .write(frame.pixels().iter().copied())
            .map_err(|_| LedError::WriteFailed)
    }
}
