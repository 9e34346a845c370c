// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::ledc::channel::ChannelIFace;
use esp_hal::ledc::timer::TimerIFace;
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed, channel, timer};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_ampel_steuerung::hal::{ChannelBuzzer, LedcRgbPwm};
use esp_ampel_steuerung::tasks::{button_task, buzzer_task, signal_task};
use esp_ampel_steuerung::{BuzzerCommandChannel, RequestCell};
use esp_core::pwm::CARRIER;

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

// Geteilte Anforderungs-Zelle (Button-Task setzt, Signal-Task löscht)
static REQUEST: RequestCell = RequestCell::new();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
/// Hardware-Init-Fehler sind fatal: ohne Matrix oder PWM gibt es
/// keinen definierten Signalbetrieb, also wird gehalten statt gelaufen.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // LEDC initialisieren: ein Timer mit der festen Träger-Frequenz
    // (1 kHz, siehe esp-core), drei Kanäle für Rot/Grün/Blau
    let mut ledc = Ledc::new(peripherals.LEDC);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    // Timer muss 'static sein, weil die Kanäle ihn ausleihen
    static CARRIER_TIMER: static_cell::StaticCell<timer::Timer<'static, LowSpeed>> =
        static_cell::StaticCell::new();
    let carrier_timer = CARRIER_TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));
    carrier_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty10Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(CARRIER.frequency_hz()),
        })
        .expect("LEDC-Timer konnte nicht konfiguriert werden");
    // Ab hier nur noch geteilt ausleihen (drei Kanäle referenzieren ihn)
    let carrier_timer: &'static timer::Timer<'static, LowSpeed> = carrier_timer;

    let mut red = ledc.channel(channel::Number::Channel0, peripherals.GPIO0);
    let mut green = ledc.channel(channel::Number::Channel1, peripherals.GPIO1);
    let mut blue = ledc.channel(channel::Number::Channel2, peripherals.GPIO2);
    for ch in [&mut red, &mut green, &mut blue] {
        ch.configure(channel::config::Config {
            timer: carrier_timer,
            duty_pct: 0,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .expect("LEDC-Kanal konnte nicht konfiguriert werden");
    }
    let pwm = LedcRgbPwm::new(red, green, blue);

    // Fußgänger-Taster: aktiv-low mit internen Pull-Ups
    let button_config = InputConfig::default().with_pull(Pull::Up);
    let button_a = Input::new(peripherals.GPIO4, button_config);
    let button_b = Input::new(peripherals.GPIO5, button_config);

    // Buzzer-Ausgang und Kommando-Channel (Signal → Buzzer)
    let buzzer_pin = Output::new(peripherals.GPIO10, Level::Low, OutputConfig::default());
    static BUZZER_CHANNEL: static_cell::StaticCell<BuzzerCommandChannel> =
        static_cell::StaticCell::new();
    let buzzer_channel: &'static BuzzerCommandChannel =
        BUZZER_CHANNEL.init(BuzzerCommandChannel::new());
    let buzzer = ChannelBuzzer::new(buzzer_channel.sender());

    // Spawn Tasks: Signal (Hauptschleife), Buttons, Buzzer
    spawner
        .spawn(signal_task(
            peripherals.GPIO8,
            peripherals.RMT,
            pwm,
            buzzer,
            &REQUEST,
        ))
        .unwrap();
    spawner
        .spawn(button_task(button_a, button_b, &REQUEST))
        .unwrap();
    spawner
        .spawn(buzzer_task(buzzer_pin, buzzer_channel.receiver()))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
