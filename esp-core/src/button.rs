//! Entprellte Fußgänger-Anforderung
//!
//! Die [`RequestCell`] ist der einzige geteilte Zustand zwischen dem
//! Button-Kontext (Interrupt bzw. Button-Task) und der Hauptschleife.
//! Der Button-Kontext publiziert nur Flanken; die Hauptschleife liest
//! und löscht. Beide Seiten greifen ausschließlich atomar zu, damit
//! keine zerrissenen Lesezugriffe entstehen.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Entprell-Fenster: Flanken innerhalb von 50 ms nach der letzten
/// akzeptierten Flanke werden als Prellen verworfen
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

/// Geteilte Zelle für die Fußgänger-Anforderung
///
/// - `requested`: steht, sobald eine entprellte Flanke akzeptiert wurde
/// - `last_accepted_ms`: Zeitstempel der letzten akzeptierten Flanke
///
/// Memory-Ordering-Kontrakt: der Zeitstempel wird vor dem Flag
/// geschrieben (Release beim Flag-Store), Leser nutzen Acquire.
/// Der Button-Kontext setzt das Flag nur, die Hauptschleife löscht es
/// nur - dadurch gibt es pro Richtung genau einen Schreiber.
pub struct RequestCell {
    requested: AtomicBool,
    last_accepted_ms: AtomicU32,
}

impl RequestCell {
    /// Erstellt eine leere Zelle (const, damit sie in einem `static`
    /// leben kann)
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            last_accepted_ms: AtomicU32::new(0),
        }
    }

    /// Publiziert eine fallende Flanke aus dem Button-Kontext
    ///
    /// Akzeptiert die Flanke nur, wenn seit der letzten akzeptierten
    /// Flanke mehr als [`DEBOUNCE_WINDOW_MS`] vergangen sind; sonst
    /// wird sie still als Prellen verworfen. Läuft in beschränkter
    /// Zeit und blockiert nie.
    ///
    /// Gibt `true` zurück wenn die Flanke akzeptiert wurde.
    pub fn publish_edge(&self, now_ms: u32) -> bool {
        let last = self.last_accepted_ms.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last) <= DEBOUNCE_WINDOW_MS {
            return false;
        }
        self.last_accepted_ms.store(now_ms, Ordering::Relaxed);
        self.requested.store(true, Ordering::Release);
        true
    }

    /// Liest das Anforderungs-Flag ohne es zu löschen
    pub fn is_pending(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Liest und löscht das Anforderungs-Flag
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

impl Default for RequestCell {
    fn default() -> Self {
        Self::new()
    }
}
