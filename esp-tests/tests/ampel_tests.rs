//! Integration Tests für die Ampelsteuerung
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen Mocks für die
//! Hardware-Traits. Die Zeit-Szenarien simulieren den Ablauf der
//! Firmware-Hauptschleife gegen eine künstliche Uhr.

use esp_core::signal::{
    T_GREEN_FLEXIBLE_MS, T_GREEN_MANDATORY_MS, T_RED_EXTENSION_MS, T_RED_MS, T_YELLOW_MS,
};
use esp_core::{
    Buzzer, FrameBuffer, LED_COUNT, LedError, MatrixWriter, Phase, Pictogram, RequestCell,
    RgbIntensity, RgbPwm, SIGN_STOP, SIGN_WALK, SignalController, SignalStep, red_phase_steps,
    tone_config,
};
use rgb::RGB8;

// ============================================================================
// Mocks
// ============================================================================

#[derive(Default)]
pub struct MockMatrixWriter {
    pub frames: Vec<[u8; LED_COUNT * 3]>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockMatrixWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatrixWriter for MockMatrixWriter {
    fn write(&mut self, frame: &FrameBuffer) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.frames.push(frame.wire_bytes());
        self.write_count += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRgbPwm {
    pub last_intensity: Option<RgbIntensity>,
    pub set_count: usize,
}

impl RgbPwm for MockRgbPwm {
    fn set_intensity(&mut self, intensity: RgbIntensity) {
        self.last_intensity = Some(intensity);
        self.set_count += 1;
    }
}

#[derive(Default)]
pub struct MockBuzzer {
    /// Alle set_frequency-Aufrufe in Reihenfolge (0 = aus)
    pub calls: Vec<u32>,
}

impl Buzzer for MockBuzzer {
    fn set_frequency(&mut self, hz: u32) {
        self.calls.push(hz);
    }
}

// ============================================================================
// Tests: MockMatrixWriter (Fehlerpfad wie beim echten Writer)
// ============================================================================

#[test]
fn test_mock_matrix_writer_write() {
    let mut mock = MockMatrixWriter::new();
    let mut frame = FrameBuffer::new();
    frame.set_pixel(0, 255, 0, 0);

    mock.write(&frame).unwrap();

    assert_eq!(mock.write_count, 1);
    assert_eq!(mock.frames[0][1], 76); // R-Byte des ersten Pixels
}

#[test]
fn test_mock_matrix_writer_fail() {
    let mut mock = MockMatrixWriter::new();
    mock.fail_next_write = true;

    let result = mock.write(&FrameBuffer::new());
    assert_eq!(result, Err(LedError::WriteFailed));
    assert_eq!(mock.write_count, 0);
}

#[test]
fn test_mock_matrix_writer_recovers_after_fail() {
    let mut mock = MockMatrixWriter::new();
    mock.fail_next_write = true;

    assert!(mock.write(&FrameBuffer::new()).is_err());
    assert!(mock.write(&FrameBuffer::new()).is_ok());
    assert_eq!(mock.write_count, 1);
}

// ============================================================================
// Tests: Pixel-Buffer und Glyphen
// ============================================================================

#[test]
fn test_set_pixel_roundtrip_reduced() {
    let mut frame = FrameBuffer::new();
    for (input, expected) in [(255u8, 76u8), (100, 30), (10, 3), (9, 2), (3, 0)] {
        frame.set_pixel(0, input, input, input);
        let px = frame.pixel(0);
        assert_eq!((px.r, px.g, px.b), (expected, expected, expected));
    }
}

#[test]
fn test_clear_twice_equals_clear_once() {
    let mut frame = FrameBuffer::new();
    frame.set_pixel(12, 255, 255, 255);
    frame.clear();
    let after_once: Vec<RGB8> = (0..LED_COUNT).map(|i| frame.pixel(i)).collect();
    frame.clear();
    let after_twice: Vec<RGB8> = (0..LED_COUNT).map(|i| frame.pixel(i)).collect();
    assert_eq!(after_once, after_twice);
    assert!(after_once.iter().all(|px| *px == RGB8::new(0, 0, 0)));
}

#[test]
fn test_walk_glyph_renders_green_and_flipped() {
    let mut frame = FrameBuffer::new();
    frame.render_glyph(&SIGN_WALK, RGB8::new(0, 255, 0));

    let lit = RGB8::new(0, 76, 0);
    // Pfeilspitze: Bitmap (x=2, y=0) -> physischer Index (4-0)*5 + 2
    assert_eq!(frame.pixel(22), lit);
    // Pfeilschaft: Bitmap (x=2, y=4) -> physischer Index (4-4)*5 + 2
    assert_eq!(frame.pixel(2), lit);
    // Ecke bleibt dunkel
    assert_eq!(frame.pixel(0), RGB8::new(0, 0, 0));
}

#[test]
fn test_stop_glyph_renders_red() {
    let mut frame = FrameBuffer::new();
    frame.render_glyph(&SIGN_STOP, RGB8::new(255, 0, 0));

    let lit = RGB8::new(76, 0, 0);
    // Rahmen-Pixel: Bitmap (x=0, y=1) -> physischer Index (4-1)*5 + 0
    assert_eq!(frame.pixel(15), lit);
    // Zentrum bleibt dunkel
    assert_eq!(frame.pixel(12), RGB8::new(0, 0, 0));
}

// ============================================================================
// Tests: Phase -> Duty-Muster (genau ein Muster pro Phase)
// ============================================================================

#[test]
fn test_phase_duty_table() {
    let mut pwm = MockRgbPwm::default();

    for (phase, expected) in [
        (Phase::MandatoryGreen, RgbIntensity::new(0.0, 0.5, 0.0)),
        (Phase::FlexibleGreen, RgbIntensity::new(0.0, 0.5, 0.0)),
        (Phase::Yellow, RgbIntensity::new(0.5, 0.5, 0.0)),
        (Phase::Red, RgbIntensity::new(0.5, 0.0, 0.0)),
    ] {
        pwm.set_intensity(phase.light());
        assert_eq!(pwm.last_intensity, Some(expected));
    }
    assert_eq!(pwm.set_count, 4);
}

// ============================================================================
// Tests: Entprellung
// ============================================================================

#[test]
fn test_debounce_accepts_only_first_of_burst() {
    let cell = RequestCell::new();
    // 20 Flanken im Abstand von 2 ms - nur die erste zählt
    let mut accepted = 0;
    for i in 0..20u32 {
        if cell.publish_edge(1000 + i * 2) {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
    assert!(cell.take());
    assert!(!cell.take());
}

#[test]
fn test_debounce_window_reopens() {
    let cell = RequestCell::new();
    assert!(cell.publish_edge(1000));
    assert!(!cell.publish_edge(1040));
    assert!(cell.publish_edge(1100));
}

// ============================================================================
// Tests: Buzzer-Arithmetik
// ============================================================================

#[test]
fn test_tone_divider_floor_guard() {
    // Frequenz hoch genug, dass der naive Divider 0 ergäbe
    let cfg = tone_config(25_000).unwrap();
    assert_eq!(cfg.divider, 1);
    assert!(cfg.level <= cfg.top);
}

#[test]
fn test_buzzer_disable_on_zero() {
    assert!(tone_config(0).is_none());

    let mut buzzer = MockBuzzer::default();
    buzzer.set_frequency(1000);
    buzzer.set_frequency(0);
    assert_eq!(buzzer.calls, vec![1000, 0]);
}

// ============================================================================
// Simulation der Hauptschleife (künstliche Uhr)
// ============================================================================

/// Simuliert die Firmware-Hauptschleife: Wartezeiten rücken die Uhr vor,
/// geplante Tastendrücke werden zum jeweiligen Zeitpunkt als Flanken
/// publiziert. Die Rot-Phase führt das gleiche Ausgabe-Skript aus wie
/// die Firmware; Beep-Zeiten zählen wie im Zeitmodell der Phasen nicht.
struct Simulation {
    controller: SignalController,
    request: RequestCell,
    frame: FrameBuffer,
    matrix: MockMatrixWriter,
    buzzer: MockBuzzer,
    now_ms: u32,
    /// Geplante Tastendrücke (ms, aufsteigend), noch nicht publiziert
    presses: Vec<u32>,
    /// (Phase, Eintrittszeit in ms)
    log: Vec<(Phase, u32)>,
}

impl Simulation {
    fn new(mut presses: Vec<u32>) -> Self {
        presses.sort_unstable();
        Self {
            controller: SignalController::new(),
            request: RequestCell::new(),
            frame: FrameBuffer::new(),
            matrix: MockMatrixWriter::new(),
            buzzer: MockBuzzer::default(),
            now_ms: 0,
            presses,
            log: Vec::new(),
        }
    }

    /// Publiziert alle geplanten Flanken bis einschließlich `upto_ms`
    fn deliver_presses(&mut self, upto_ms: u32) {
        while let Some(&t) = self.presses.first() {
            if t > upto_ms {
                break;
            }
            self.presses.remove(0);
            self.request.publish_edge(t);
        }
    }

    /// Wartet interruptibel: endet beim ersten akzeptierten Tastendruck
    /// oder nach `duration_ms` (Gegenstück zu wait_for_request_or_timeout)
    fn wait_interruptible(&mut self, duration_ms: u32) {
        let deadline = self.now_ms + duration_ms;
        if self.request.is_pending() {
            return; // Flag stand schon beim Eintritt
        }
        while let Some(&t) = self.presses.first() {
            if t > deadline {
                break;
            }
            self.presses.remove(0);
            if self.request.publish_edge(t) {
                self.now_ms = t;
                return;
            }
        }
        self.now_ms = deadline;
    }

    /// Führt genau eine Phase aus und schaltet weiter
    fn run_phase(&mut self) {
        let phase = self.controller.phase();
        self.log.push((phase, self.now_ms));

        if phase == Phase::Red {
            let extension = self.controller.red_extension_ms(&self.request);
            for step in red_phase_steps(extension) {
                match step {
                    SignalStep::Show(pictogram) => {
                        self.frame.render_glyph(pictogram.glyph(), pictogram.color());
                        self.matrix
                            .write(&self.frame)
                            .expect("Mock-Write darf nicht fehlschlagen");
                    }
                    SignalStep::Tone { hz, .. } => {
                        self.buzzer.set_frequency(hz);
                        self.buzzer.set_frequency(0);
                    }
                    SignalStep::Quiet { .. } => {}
                    SignalStep::Hold { ms } => {
                        let end = self.now_ms + ms;
                        self.deliver_presses(end);
                        self.now_ms = end;
                    }
                }
            }
        } else if phase.interruptible() {
            self.wait_interruptible(phase.duration_ms());
        } else {
            let end = self.now_ms + phase.duration_ms();
            self.deliver_presses(end);
            self.now_ms = end;
        }

        self.controller.advance(self.request.is_pending());
    }

    fn run_phases(&mut self, count: usize) {
        for _ in 0..count {
            self.run_phase();
        }
    }
}

#[test]
fn test_scenario_request_during_mandatory_green() {
    // Anforderung früh in der festen Grün-Phase
    let mut sim = Simulation::new(vec![100]);
    sim.run_phases(3); // MandatoryGreen, Yellow, Red

    assert_eq!(
        sim.log,
        vec![
            (Phase::MandatoryGreen, 0),
            (Phase::Yellow, T_GREEN_MANDATORY_MS), // 4000
            (Phase::Red, 7000),
        ]
    );
    // Rot: 4000 Basis + 6000 Verlängerung -> nächstes Grün bei 17000
    assert_eq!(sim.controller.phase(), Phase::MandatoryGreen);
    assert_eq!(sim.now_ms, 17_000);
    // Anforderung wurde bedient
    assert!(!sim.request.is_pending());
}

#[test]
fn test_scenario_no_request_full_cycle() {
    let mut sim = Simulation::new(vec![]);
    sim.run_phases(4);

    assert_eq!(
        sim.log,
        vec![
            (Phase::MandatoryGreen, 0),
            (Phase::FlexibleGreen, 4000),
            (Phase::Yellow, 10_000),
            (Phase::Red, 13_000),
        ]
    );
    // Keine Verlängerung -> nächstes Grün ebenfalls bei 17000
    assert_eq!(sim.controller.phase(), Phase::MandatoryGreen);
    assert_eq!(sim.now_ms, 17_000);
}

#[test]
fn test_scenario_request_cuts_flexible_green_short() {
    // Tastendruck 2000 ms nach Eintritt in die flexible Grün-Phase
    let mut sim = Simulation::new(vec![6000]);
    sim.run_phases(2); // MandatoryGreen, FlexibleGreen

    assert_eq!(
        sim.log,
        vec![(Phase::MandatoryGreen, 0), (Phase::FlexibleGreen, 4000)]
    );
    // Vorzeitiger Abbruch genau beim Tastendruck
    assert_eq!(sim.now_ms, 6000);
    assert_eq!(sim.controller.phase(), Phase::Yellow);

    // Die Anforderung bleibt anstehend und verlängert das folgende Rot
    sim.run_phases(2); // Yellow, Red
    assert_eq!(sim.now_ms, 6000 + T_YELLOW_MS + T_RED_MS + T_RED_EXTENSION_MS);
}

#[test]
fn test_scenario_flexible_green_runs_full_without_request() {
    let mut sim = Simulation::new(vec![]);
    sim.run_phases(2);
    assert_eq!(sim.now_ms, T_GREEN_MANDATORY_MS + T_GREEN_FLEXIBLE_MS);
    assert_eq!(sim.controller.phase(), Phase::Yellow);
}

#[test]
fn test_red_phase_output_sequence() {
    let mut sim = Simulation::new(vec![100]);
    sim.run_phases(2); // MandatoryGreen, Yellow

    // Während Grün und Gelb bleiben Matrix und Buzzer unberührt
    assert!(sim.matrix.frames.is_empty());
    assert!(sim.buzzer.calls.is_empty());

    sim.run_phase(); // Red
    // Drei Öffnungs-Pieptöne, zum Schluss der lange tiefe Ton (0 = aus)
    assert_eq!(sim.buzzer.calls, vec![1000, 0, 1000, 0, 1000, 0, 500, 0]);

    // Genau zwei Frames: erst das Geh-, dann das Stopp-Piktogramm
    assert_eq!(sim.matrix.frames.len(), 2);
    let mut expected = FrameBuffer::new();
    expected.render_glyph(Pictogram::Walk.glyph(), Pictogram::Walk.color());
    assert_eq!(sim.matrix.frames[0], expected.wire_bytes());
    expected.render_glyph(Pictogram::Stop.glyph(), Pictogram::Stop.color());
    assert_eq!(sim.matrix.frames[1], expected.wire_bytes());
}

#[test]
fn test_scenario_bounced_presses_count_once() {
    // Prellender Taster in der flexiblen Grün-Phase: 5 Flanken in 20 ms
    let mut sim = Simulation::new(vec![5000, 5005, 5010, 5015, 5020]);
    sim.run_phases(2);

    // Erste Flanke akzeptiert -> Abbruch bei 5000, Rest ist Prellen
    assert_eq!(sim.now_ms, 5000);
    assert_eq!(sim.controller.phase(), Phase::Yellow);
}
