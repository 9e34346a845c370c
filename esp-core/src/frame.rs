//! Pixel-Buffer und Glyphen für die 5x5 Fußgänger-Matrix
//!
//! Der Buffer hält 25 RGB-Pixel und wird bei jedem Rendern mutiert,
//! nie neu allokiert. Auf der Datenleitung erwartet die Matrix die
//! Kanal-Reihenfolge G,R,B pro Pixel ([`FrameBuffer::wire_bytes`]).

use rgb::RGB8;

/// Breite der LED-Matrix
pub const MATRIX_WIDTH: usize = 5;
/// Höhe der LED-Matrix
pub const MATRIX_HEIGHT: usize = 5;
/// Anzahl der LEDs in der Matrix
pub const LED_COUNT: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// 5x5 Bitmap eines Fußgänger-Symbols (Zeile 0 = oben)
pub type Glyph = [[bool; MATRIX_WIDTH]; MATRIX_HEIGHT];

/// Symbol "Überqueren erlaubt" (Pfeil, wird grün gerendert)
pub const SIGN_WALK: Glyph = [
    [false, false, true, false, false],
    [false, true, true, true, false],
    [true, false, true, false, true],
    [false, false, true, false, false],
    [false, false, true, false, false],
];

/// Symbol "Überqueren verboten" (Quadrat, wird rot gerendert)
pub const SIGN_STOP: Glyph = [
    [false, true, true, true, false],
    [true, false, false, false, true],
    [true, false, false, false, true],
    [true, false, false, false, true],
    [false, true, true, true, false],
];

/// Pixel-Buffer der Matrix
///
/// Alle Schreibzugriffe gehen durch [`FrameBuffer::set_pixel`], das die
/// Eingangswerte auf 30 % Intensität reduziert (Matrix-LEDs sind bei
/// voller Helligkeit unangenehm grell).
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [RGB8; LED_COUNT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Erstellt einen leeren (schwarzen) Buffer
    pub const fn new() -> Self {
        Self {
            pixels: [RGB8::new(0, 0, 0); LED_COUNT],
        }
    }

    /// Setzt ein Pixel, reduziert auf 30 % Intensität
    ///
    /// Die Reduktion ist ganzzahlig: `floor(v * 3 / 10)` pro Kanal.
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use esp_core::frame::FrameBuffer;
    /// let mut frame = FrameBuffer::new();
    /// frame.set_pixel(0, 255, 0, 0);
    /// assert_eq!(frame.pixel(0).r, 76); // 255 * 3 / 10
    /// ```
    pub fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        self.pixels[index] = RGB8 {
            r: (r as u16 * 3 / 10) as u8,
            g: (g as u16 * 3 / 10) as u8,
            b: (b as u16 * 3 / 10) as u8,
        };
    }

    /// Liest ein Pixel zurück (bereits intensitäts-reduziert)
    pub fn pixel(&self, index: usize) -> RGB8 {
        self.pixels[index]
    }

    /// Setzt alle Pixel auf Schwarz
    pub fn clear(&mut self) {
        self.pixels = [RGB8::new(0, 0, 0); LED_COUNT];
    }

    /// Alle Pixel in Matrix-Reihenfolge (für SmartLED-Adapter)
    pub fn pixels(&self) -> &[RGB8; LED_COUNT] {
        &self.pixels
    }

    /// Das 75-Byte Wire-Image des Frames
    ///
    /// Pro Pixel drei Bytes in der Reihenfolge G,R,B - exakt die
    /// Byte-Folge, die beim Flush auf die Datenleitung geht.
    pub fn wire_bytes(&self) -> [u8; LED_COUNT * 3] {
        let mut out = [0u8; LED_COUNT * 3];
        for (i, px) in self.pixels.iter().enumerate() {
            out[i * 3] = px.g;
            out[i * 3 + 1] = px.r;
            out[i * 3 + 2] = px.b;
        }
        out
    }

    /// Rendert ein Fußgänger-Symbol in den Buffer
    ///
    /// Löscht den Buffer und schreibt `color` an jede gesetzte
    /// Bitmap-Zelle. Zeile 0 der Bitmap landet auf der untersten
    /// physischen Zeile (`4 - y`), weil die Matrix kopfüber montiert ist.
    /// Der Aufrufer flusht anschließend über den `MatrixWriter`.
    pub fn render_glyph(&mut self, glyph: &Glyph, color: RGB8) {
        self.clear();
        for (y, row) in glyph.iter().enumerate() {
            for (x, lit) in row.iter().enumerate() {
                if *lit {
                    let index = (MATRIX_HEIGHT - 1 - y) * MATRIX_WIDTH + x;
                    self.set_pixel(index, color.r, color.g, color.b);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_pixel_reduces_intensity() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(7, 255, 100, 9);
        let px = frame.pixel(7);
        assert_eq!(px.r, 76); // floor(255 * 3 / 10)
        assert_eq!(px.g, 30); // floor(100 * 3 / 10)
        assert_eq!(px.b, 2); // floor(9 * 3 / 10)
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(3, 200, 200, 200);
        frame.clear();
        let once = frame.clone();
        frame.clear();
        for i in 0..LED_COUNT {
            assert_eq!(frame.pixel(i), RGB8::new(0, 0, 0));
            assert_eq!(frame.pixel(i), once.pixel(i));
        }
    }

    #[test]
    fn test_wire_bytes_grb_order() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(0, 255, 100, 9);
        let wire = frame.wire_bytes();
        assert_eq!(wire[0], 30); // G zuerst
        assert_eq!(wire[1], 76); // dann R
        assert_eq!(wire[2], 2); // dann B
        assert_eq!(wire.len(), 75);
    }

    #[test]
    fn test_render_glyph_flips_vertically() {
        let mut frame = FrameBuffer::new();
        // Nur Zelle (x=2, y=0) gesetzt
        let mut glyph: Glyph = [[false; 5]; 5];
        glyph[0][2] = true;
        frame.render_glyph(&glyph, RGB8::new(0, 255, 0));
        // Zeile 0 der Bitmap liegt auf der untersten physischen Zeile
        assert_eq!(frame.pixel(4 * 5 + 2), RGB8::new(0, 76, 0));
        assert_eq!(frame.pixel(2), RGB8::new(0, 0, 0));
    }

    #[test]
    fn test_render_glyph_clears_previous_frame() {
        let mut frame = FrameBuffer::new();
        frame.render_glyph(&SIGN_WALK, RGB8::new(0, 255, 0));
        frame.render_glyph(&SIGN_STOP, RGB8::new(255, 0, 0));
        // Mittelpunkt ist im Stop-Symbol dunkel, im Pfeil gesetzt
        assert_eq!(frame.pixel(2 * 5 + 2), RGB8::new(0, 0, 0));
    }
}
