// Signal Task - Hauptschleife der Ampelsteuerung
//
// Führt die Zustandsmaschine aus esp-core aus und setzt ihre
// Vorgaben auf die Hardware um: Ampel-Duty-Cycles, Fußgänger-Glyphen,
// Buzzer-Kadenz. Alle blockierenden Wartezeiten (Phasen-Delays, Flush,
// Beeps) leben bewusst in diesem einen Task.

use defmt::{error, info};
use embassy_time::{Duration, Instant, Timer};
use esp_core::{
    Buzzer, FrameBuffer, MatrixWriter, Phase, Pictogram, RequestCell, RgbPwm, SignalController,
    SignalStep, red_phase_steps,
};
use esp_hal_smartled::smart_led_buffer;

use crate::config::{REQUEST_POLL_INTERVAL_MS, RMT_CLOCK_MHZ, STARTUP_SETTLE_MS};
use crate::hal::{ChannelBuzzer, LedcRgbPwm, RmtMatrixWriter};

/// Interruptible Wartezeit gegen die monotone Uhr
///
/// Pollt das Anforderungs-Flag alle [`REQUEST_POLL_INTERVAL_MS`] und
/// kehrt sofort mit `true` zurück, sobald es gesetzt ist; `false`
/// nach Ablauf von `duration_ms` ohne Anforderung. Die flexible
/// Grün-Phase verkürzt sich hierüber.
pub async fn wait_for_request_or_timeout(request: &RequestCell, duration_ms: u32) -> bool {
    let deadline = Instant::now() + Duration::from_millis(duration_ms as u64);
    while Instant::now() < deadline {
        if request.is_pending() {
            return true;
        }
        Timer::after_millis(REQUEST_POLL_INTERVAL_MS).await;
    }
    request.is_pending()
}

// Blockierender Beep: Frequenz setzen, warten, abschalten
async fn beep<B: Buzzer>(buzzer: &mut B, hz: u32, duration_ms: u32) {
    buzzer.set_frequency(hz);
    Timer::after_millis(duration_ms as u64).await;
    buzzer.set_frequency(0);
}

// Frame auf die Matrix flushen; Schreibfehler werden geloggt, der
// Zyklus läuft weiter (es gibt keinen Reporting-Kanal nach außen)
fn show<M: MatrixWriter>(matrix: &mut M, frame: &FrameBuffer) {
    if matrix.write(frame).is_err() {
        error!("Matrix-Write fehlgeschlagen");
    }
}

/// Signal Logic - Testbare Hauptschleife ohne konkrete Hardware
///
/// # Trait-basierte Abstraktion
/// Die generischen Parameter ermöglichen:
/// - Real Hardware (RmtMatrixWriter, LedcRgbPwm, ChannelBuzzer) im
///   Production-Code
/// - Mock Implementations in den Host-Tests (esp-tests simuliert
///   denselben Ablauf synchron)
///
/// # Parameter
/// - `matrix`: Writer für die 5x5 Fußgänger-Matrix
/// - `pwm`: die drei Ampel-PWM-Kanäle
/// - `buzzer`: Buzzer-Frontend
/// - `request`: geteilte Anforderungs-Zelle (Produzent ist die Button-Task)
pub async fn signal_logic<M, P, B>(
    mut matrix: M,
    mut pwm: P,
    mut buzzer: B,
    request: &'static RequestCell,
) -> !
where
    M: MatrixWriter,
    P: RgbPwm,
    B: Buzzer,
{
    let mut controller = SignalController::new();
    let mut frame = FrameBuffer::new();

    // Startbild: Matrix löschen, kurz stabilisieren lassen, dann
    // "Überqueren verboten" zeigen
    frame.clear();
    show(&mut matrix, &frame);
    Timer::after_millis(STARTUP_SETTLE_MS).await;
    frame.render_glyph(Pictogram::Stop.glyph(), Pictogram::Stop.color());
    show(&mut matrix, &frame);

    loop {
        let phase = controller.phase();
        info!("Phase: {}", phase);
        pwm.set_intensity(phase.light());

        match phase {
            Phase::Red => {
                // Verlängerung wird bei Phaseneintritt entschieden;
                // eine anstehende Anforderung gilt damit als bedient
                let extension_ms = controller.red_extension_ms(request);

                // Das Skript legt die Reihenfolge von Piktogrammen und
                // Tönen fest; die Host-Tests führen dasselbe Skript aus
                for step in red_phase_steps(extension_ms) {
                    match step {
                        SignalStep::Show(pictogram) => {
                            frame.render_glyph(pictogram.glyph(), pictogram.color());
                            show(&mut matrix, &frame);
                        }
                        SignalStep::Tone { hz, ms } => beep(&mut buzzer, hz, ms).await,
                        SignalStep::Quiet { ms } | SignalStep::Hold { ms } => {
                            Timer::after_millis(ms as u64).await;
                        }
                    }
                }
            }
            _ if phase.interruptible() => {
                // Vorzeitiger Abbruch, sobald eine Anforderung ansteht
                if wait_for_request_or_timeout(request, phase.duration_ms()).await {
                    info!("Flexible Grün-Phase durch Anforderung verkürzt");
                }
            }
            _ => {
                // Feste Wartezeit, Anforderungen werden ignoriert
                Timer::after_millis(phase.duration_ms() as u64).await;
            }
        }

        controller.advance(request.is_pending());
    }
}

/// Signal Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Matrix-Initialisierung und ruft dann die
/// generische `signal_logic()` Funktion auf.
#[embassy_executor::task]
pub async fn signal_task(
    matrix_pin: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    pwm: LedcRgbPwm,
    buzzer: ChannelBuzzer,
    request: &'static RequestCell,
) {
    // Buffer für SmartLED Daten erstellen (25 LEDs)
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(25);

    // Hardware initialisieren: RmtMatrixWriter kapselt RMT + SmartLED
    let matrix = RmtMatrixWriter::new(matrix_pin, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer);

    signal_logic(matrix, pwm, buzzer, request).await;
}
