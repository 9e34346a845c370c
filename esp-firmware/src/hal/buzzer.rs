// Buzzer-Implementierung des Buzzer-Traits
//
// Die LEDC-Timer lassen sich nicht umkonfigurieren, solange ein Kanal
// sie ausleiht - der Ton wird daher von einer eigenen Task erzeugt,
// die den Pin mit der aus `tone_config` abgeleiteten Frequenz bei
// 50 % Duty umschaltet (dasselbe Signal wie ein PWM-Kanal).
// Dieses Modul ist nur der Kommando-Sender in Richtung der Task.

use crate::BuzzerCommandSender;
use esp_core::traits::Buzzer;

/// Buzzer-Frontend der Signal-Task
///
/// `set_frequency` publiziert die Frequenz non-blocking an die
/// Buzzer-Task; 0 bedeutet "aus".
pub struct ChannelBuzzer {
    sender: BuzzerCommandSender,
}

impl ChannelBuzzer {
    pub fn new(sender: BuzzerCommandSender) -> Self {
        Self { sender }
    }
}

impl Buzzer for ChannelBuzzer {
    fn set_frequency(&mut self, hz: u32) {
        // Kapazität 2 reicht für das Nutzungsmuster "Ton an, Ton aus";
        // ein volles Channel hieße, dass die Buzzer-Task nicht läuft
        if self.sender.try_send(hz).is_err() {
            defmt::warn!("Buzzer-Kommando verworfen (Channel voll)");
        }
    }
}
