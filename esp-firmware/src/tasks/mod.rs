// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig. Geteilt wird nur die
// RequestCell (Button → Signal) und das Buzzer-Kommando-Channel
// (Signal → Buzzer).

pub mod button;
pub mod buzzer;
pub mod signal;

// Re-export Tasks für einfachen Import
pub use button::button_task;
pub use buzzer::buzzer_task;
pub use signal::signal_task;
