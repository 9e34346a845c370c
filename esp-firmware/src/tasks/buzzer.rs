// Buzzer Task - Ton-Erzeugung auf dem Buzzer-Pin
//
// Erzeugt eine 50-%-Duty-Rechteckwelle mit der Frequenz, die
// esp_core::pwm::tone_config aus dem Kommando ableitet (inkl. des
// Divider-Schutzes für sehr hohe Frequenzen). Frequenz 0 schaltet den
// Pin low und legt die Task schlafen, bis das nächste Kommando kommt.

use crate::BuzzerCommandReceiver;
use embassy_time::Timer;
use esp_core::pwm::tone_config;
use esp_hal::gpio::Output;

// Halbe Perioden-Dauer in µs für eine Frequenz, None = aus
fn half_period_us(hz: u32) -> Option<u64> {
    tone_config(hz).map(|cfg| 500_000u64 / cfg.frequency_hz() as u64)
}

/// Buzzer Task - Embassy Task
///
/// # Parameter
/// - `pin`: Buzzer-Ausgang
/// - `commands`: Frequenz-Kommandos der Signal-Task (Hz, 0 = aus)
#[embassy_executor::task]
pub async fn buzzer_task(mut pin: Output<'static>, commands: BuzzerCommandReceiver) {
    let mut half_period: Option<u64> = None;

    loop {
        match half_period {
            None => {
                // Ruhe: Pin low, auf das nächste Kommando warten
                pin.set_low();
                half_period = half_period_us(commands.receive().await);
            }
            Some(half_us) => {
                pin.toggle();
                Timer::after_micros(half_us).await;
                // Zwischen den Flanken neue Kommandos abholen (non-blocking)
                if let Ok(hz) = commands.try_receive() {
                    half_period = half_period_us(hz);
                }
            }
        }
    }
}
