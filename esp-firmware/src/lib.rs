// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    Buzzer, FrameBuffer, LedError, MatrixWriter, Phase, RequestCell, RgbIntensity, RgbPwm,
    SignalController,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Receiver, Sender};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Diese Type-Aliase vereinfachen die Lesbarkeit der Funktionssignaturen.

/// Channel für Buzzer-Kommandos (Signal-Task → Buzzer-Task)
/// - Nachricht: Frequenz in Hz, 0 = aus
/// - 2: Kapazität (ein Ton + ein nachgeschobenes "aus")
pub type BuzzerCommandChannel = embassy_sync::channel::Channel<NoopRawMutex, u32, 2>;

/// Sender für Buzzer-Kommandos (von der Signal-Task genutzt)
pub type BuzzerCommandSender = Sender<'static, NoopRawMutex, u32, 2>;

/// Receiver für Buzzer-Kommandos (Buzzer-Task empfängt)
pub type BuzzerCommandReceiver = Receiver<'static, NoopRawMutex, u32, 2>;
