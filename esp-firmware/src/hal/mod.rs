// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die Hardware-Traits aus esp-core
// für die ESP32-C6 Peripherie (RMT, LEDC, GPIO).

pub mod buzzer;
pub mod matrix_writer;
pub mod rgb_pwm;

pub use buzzer::ChannelBuzzer;
pub use matrix_writer::RmtMatrixWriter;
pub use rgb_pwm::LedcRgbPwm;
