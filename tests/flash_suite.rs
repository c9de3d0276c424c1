use std::time::{Duration, Instant};

use tui_metronome::flash::{
    DEFAULT_FLASH_INTERVAL_MS, FlashTimer, FlashTransition, MIN_PULSE_MS, TimingError,
    millis_per_beat, pulse_width_ms,
};
use tui_metronome::ui_state::UiState;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn flashing_at(bpm: f32) -> UiState {
    let mut ui = UiState::default();
    ui.set_bpm(bpm).expect("finite bpm");
    ui.set_flashing(true);
    ui
}

#[test]
fn millis_per_beat_rejects_non_positive() {
    assert_eq!(millis_per_beat(120.0), Ok(500.0));
    assert_eq!(millis_per_beat(30.0), Ok(2000.0));
    assert_eq!(millis_per_beat(0.0), Err(TimingError::InvalidBpm(0.0)));
    assert!(millis_per_beat(-5.0).is_err());
    assert!(millis_per_beat(f32::NAN).is_err());
}

#[test]
fn pulse_width_caps_at_a_sixth_of_the_beat() {
    let interval = DEFAULT_FLASH_INTERVAL_MS as f64;
    let fast = millis_per_beat(350.0).expect("valid");
    let expected = MIN_PULSE_MS.max(interval.min(fast / 6.0));
    assert!((pulse_width_ms(interval, fast) - expected).abs() < 1e-9);
    assert!((pulse_width_ms(interval, fast) - 28.571_428).abs() < 1e-3);

    let slow = millis_per_beat(30.0).expect("valid");
    assert_eq!(pulse_width_ms(interval, slow), interval.min(2000.0 / 6.0));
    assert_eq!(pulse_width_ms(500.0, slow), 2000.0 / 6.0);
}

#[test]
fn pulse_width_never_drops_below_minimum() {
    assert_eq!(pulse_width_ms(5.0, 500.0), MIN_PULSE_MS);
    assert_eq!(pulse_width_ms(64.0, 60.0), MIN_PULSE_MS);
}

#[test]
fn first_tick_resets_with_flash_off() {
    let t0 = Instant::now();
    let mut timer = FlashTimer::new(ms(64), t0);
    let tick = timer.tick(&flashing_at(120.0), t0).expect("valid bpm");
    assert!(tick.reset);
    assert!(!tick.flash_on);
    assert_eq!(timer.flash_counter(), 1);
    assert_eq!(timer.first_tick(), t0);
}

#[test]
fn beat_scenario_at_120_bpm() {
    let t0 = Instant::now();
    let ui = flashing_at(120.0);
    let mut timer = FlashTimer::new(ms(24), t0);

    assert!(!timer.tick(&ui, t0).expect("tick").flash_on);

    let tick = timer.tick(&ui, t0 + ms(250)).expect("tick");
    assert!(!tick.flash_on);
    assert_eq!(tick.transition, None);

    let tick = timer.tick(&ui, t0 + ms(500)).expect("tick");
    assert!(tick.flash_on);
    assert_eq!(tick.transition, Some(FlashTransition::On));
    assert_eq!(timer.flash_counter(), 2);
    assert_eq!(timer.tick_timer(), t0 + ms(500));
    assert_eq!(timer.last_tick(), t0 + ms(500));

    assert!(timer.tick(&ui, t0 + ms(510)).expect("tick").flash_on);

    let tick = timer.tick(&ui, t0 + ms(524)).expect("tick");
    assert!(!tick.flash_on);
    assert_eq!(tick.transition, Some(FlashTransition::Off));

    assert!(!timer.tick(&ui, t0 + ms(999)).expect("tick").flash_on);

    let tick = timer.tick(&ui, t0 + ms(1000)).expect("tick");
    assert!(tick.flash_on);
    assert_eq!(timer.flash_counter(), 3);
}

#[test]
fn default_interval_pulse_lasts_64ms_at_120_bpm() {
    let t0 = Instant::now();
    let ui = flashing_at(120.0);
    let mut timer = FlashTimer::new(ms(DEFAULT_FLASH_INTERVAL_MS), t0);
    assert_eq!(timer.pulse_width_ms(120.0), Ok(64.0));

    timer.tick(&ui, t0).expect("tick");
    assert!(timer.tick(&ui, t0 + ms(500)).expect("tick").flash_on);
    assert!(timer.tick(&ui, t0 + ms(540)).expect("tick").flash_on);
    assert!(!timer.tick(&ui, t0 + ms(564)).expect("tick").flash_on);
}

#[test]
fn late_ticks_do_not_shift_later_beats() {
    let t0 = Instant::now();
    let ui = flashing_at(120.0);
    let mut timer = FlashTimer::new(ms(24), t0);
    timer.tick(&ui, t0).expect("tick");

    // First beat observed 40ms late.
    assert!(timer.tick(&ui, t0 + ms(540)).expect("tick").flash_on);
    assert_eq!(timer.last_tick(), t0 + ms(500));
    assert!(!timer.tick(&ui, t0 + ms(600)).expect("tick").flash_on);

    // Second beat still lands on the 1000ms grid line.
    assert!(!timer.tick(&ui, t0 + ms(990)).expect("tick").flash_on);
    assert!(timer.tick(&ui, t0 + ms(1000)).expect("tick").flash_on);
    assert_eq!(timer.last_tick(), t0 + ms(1000));
}

#[test]
fn state_change_resets_the_machine() {
    let t0 = Instant::now();
    let mut ui = flashing_at(120.0);
    let mut timer = FlashTimer::new(ms(24), t0);
    timer.tick(&ui, t0).expect("tick");
    timer.tick(&ui, t0 + ms(500)).expect("tick");
    timer.tick(&ui, t0 + ms(1000)).expect("tick");
    assert_eq!(timer.flash_counter(), 3);

    ui.set_bpm(90.0).expect("finite");
    let edit = t0 + ms(1010);
    let tick = timer.tick(&ui, edit).expect("tick");
    assert!(tick.reset);
    assert!(!tick.flash_on);
    assert_eq!(tick.transition, Some(FlashTransition::Off));
    assert_eq!(timer.flash_counter(), 1);
    assert_eq!(timer.first_tick(), edit);

    // New tempo counts from the edit: 90 bpm is 666.67ms per beat.
    assert!(!timer.tick(&ui, edit + ms(600)).expect("tick").flash_on);
    assert!(timer.tick(&ui, edit + ms(667)).expect("tick").flash_on);
}

#[test]
fn disabled_flashing_never_lights() {
    let t0 = Instant::now();
    let mut ui = flashing_at(120.0);
    ui.set_flashing(false);
    let mut timer = FlashTimer::new(ms(24), t0);

    for step in 0..40u64 {
        let tick = timer.tick(&ui, t0 + ms(step * 125)).expect("tick");
        assert!(!tick.flash_on, "flash lit at step {step}");
        assert_eq!(timer.flash_counter(), 1);
    }
}

#[test]
fn disabling_mid_pulse_turns_flash_off_and_restart_begins_fresh() {
    let t0 = Instant::now();
    let mut ui = flashing_at(120.0);
    let mut timer = FlashTimer::new(ms(64), t0);
    timer.tick(&ui, t0).expect("tick");
    assert!(timer.tick(&ui, t0 + ms(500)).expect("tick").flash_on);

    ui.toggle_flashing();
    let tick = timer.tick(&ui, t0 + ms(510)).expect("tick");
    assert!(!tick.flash_on);
    assert_eq!(tick.transition, Some(FlashTransition::Off));

    ui.toggle_flashing();
    let resume = t0 + ms(2000);
    let tick = timer.tick(&ui, resume).expect("tick");
    assert!(tick.reset);
    assert_eq!(timer.first_tick(), resume);
    assert!(!timer.tick(&ui, resume + ms(499)).expect("tick").flash_on);
    assert!(timer.tick(&ui, resume + ms(500)).expect("tick").flash_on);
    assert_eq!(timer.flash_counter(), 2);
}

#[test]
fn stall_yields_one_bounded_pulse() {
    let t0 = Instant::now();
    let ui = flashing_at(120.0);
    let mut timer = FlashTimer::new(ms(24), t0);
    timer.tick(&ui, t0).expect("tick");

    // Nothing runs for ten seconds, twenty beats.
    let resume = t0 + ms(10_000);
    let tick = timer.tick(&ui, resume).expect("tick");
    assert!(tick.flash_on);
    assert_eq!(timer.flash_counter(), 21);
    assert_eq!(timer.last_tick(), resume);

    let mut on_since: Option<u64> = None;
    let mut longest_on = 0;
    let mut pulses = 0;
    for step in 0..200u64 {
        let at = 10_000 + step * 16;
        let tick = timer.tick(&ui, t0 + ms(at)).expect("tick");
        if tick.transition == Some(FlashTransition::On) {
            pulses += 1;
        }
        match (tick.flash_on, on_since) {
            (true, None) => on_since = Some(at),
            (true, Some(start)) => longest_on = longest_on.max(at - start),
            (false, _) => on_since = None,
        }
    }
    assert!(longest_on < 24, "flash held for {longest_on}ms");
    // 3.2s of ticks at 500ms per beat: beats at 10.5s .. 13.0s.
    assert_eq!(pulses, 6);
    assert_eq!(timer.flash_counter(), 27);
}
