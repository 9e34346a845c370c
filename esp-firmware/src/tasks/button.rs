// Button Task - Fußgänger-Taster als Event-Quelle
//
// Wartet interrupt-getrieben auf fallende Flanken der beiden
// aktiv-low Taster und publiziert sie in die RequestCell. Die
// Entprellung (50-ms-Fenster) liegt in der Zelle selbst; dieser Task
// ruft nie in Anzeige oder PWM hinein.

use defmt::{debug, info};
use embassy_futures::select::select;
use embassy_time::Instant;
use esp_core::RequestCell;
use esp_hal::gpio::Input;

/// Button Task - Embassy Task für beide Fußgänger-Taster
///
/// # Parameter
/// - `button_a`, `button_b`: Eingänge mit Pull-Up (fallende Flanke = Druck)
/// - `request`: geteilte Anforderungs-Zelle (Konsument ist die Signal-Task)
#[embassy_executor::task]
pub async fn button_task(
    mut button_a: Input<'static>,
    mut button_b: Input<'static>,
    request: &'static RequestCell,
) {
    loop {
        select(
            button_a.wait_for_falling_edge(),
            button_b.wait_for_falling_edge(),
        )
        .await;

        let now_ms = Instant::now().as_millis() as u32;
        if request.publish_edge(now_ms) {
            info!("Fußgänger-Anforderung akzeptiert (t = {} ms)", now_ms);
        } else {
            debug!("Flanke als Prellen verworfen (t = {} ms)", now_ms);
        }
    }
}
