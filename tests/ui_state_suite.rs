use tui_metronome::palette::MAX_COLORS;
use tui_metronome::types::{Signature, Visualization};
use tui_metronome::ui_state::{BPM_MAX, BPM_MIN, Field, StateError, UiState, format_bpm};

#[test]
fn defaults_match_panel_startup() {
    let ui = UiState::default();
    assert_eq!(ui.selection(), 0);
    assert_eq!(ui.bpm(), 120.0);
    assert_eq!(ui.color(), 0);
    assert_eq!(ui.signature(), Signature { upper: 4, lower: 4 });
    assert_eq!(ui.visualization(), Visualization::Pendulum);
    assert!(!ui.flashing());
}

#[test]
fn selection_wraps_after_field_count_moves() {
    for start in 0..Field::COUNT {
        for direction in [1i8, -1] {
            let mut ui = UiState::default();
            ui.select(Field::from_index(start).expect("valid field"));
            for _ in 0..Field::COUNT {
                ui.move_selection(direction);
                assert!(ui.selection() < Field::COUNT);
            }
            assert_eq!(ui.selection(), start, "start={start} direction={direction}");
        }
    }
}

#[test]
fn selection_edges_wrap_and_zero_is_noop() {
    let mut ui = UiState::default();
    ui.move_selection(-1);
    assert_eq!(ui.selected_field(), Field::Flashing);
    ui.move_selection(1);
    assert_eq!(ui.selected_field(), Field::TimeSignature);
    ui.move_selection(0);
    assert_eq!(ui.selected_field(), Field::TimeSignature);
}

#[test]
fn color_wraps_both_ways() {
    let mut ui = UiState::default();
    ui.set_color(-1);
    assert_eq!(ui.color(), MAX_COLORS);
    ui.set_color(1);
    assert_eq!(ui.color(), 0);
    for _ in 0..MAX_COLORS {
        ui.set_color(1);
    }
    assert_eq!(ui.color(), MAX_COLORS);
}

#[test]
fn visualization_wraps_both_ways() {
    let mut ui = UiState::default();
    ui.set_visualization(-1);
    assert_eq!(ui.visualization(), Visualization::FlashOnly);
    assert_eq!(ui.visualization().ordinal(), Visualization::MAX);
    ui.set_visualization(1);
    assert_eq!(ui.visualization(), Visualization::Pendulum);
    ui.set_visualization(1);
    assert_eq!(ui.visualization(), Visualization::ParticlesTopDown);
}

#[test]
fn bpm_is_clamped_into_range() {
    let mut ui = UiState::default();
    ui.set_bpm(1000.0).expect("finite");
    assert_eq!(ui.bpm(), BPM_MAX);
    ui.set_bpm(0.0).expect("finite");
    assert_eq!(ui.bpm(), BPM_MIN);
    ui.set_bpm(-40.0).expect("finite");
    assert_eq!(ui.bpm(), BPM_MIN);
    ui.set_bpm(97.5).expect("finite");
    assert_eq!(ui.bpm(), 97.5);
}

#[test]
fn non_finite_bpm_is_rejected_without_mutation() {
    let mut ui = UiState::default();
    let err = ui.set_bpm(f32::NAN).expect_err("nan must be rejected");
    assert!(matches!(err, StateError::NonFiniteBpm(_)));
    assert!(ui.set_bpm(f32::INFINITY).is_err());
    assert_eq!(ui.bpm(), 120.0);
}

#[test]
fn signature_validation() {
    let mut ui = UiState::default();
    ui.set_signature(7, 8).expect("7/8 is valid");
    assert_eq!(ui.signature(), Signature { upper: 7, lower: 8 });
    assert!(matches!(
        ui.set_signature(3, 5),
        Err(StateError::InvalidSignature(_))
    ));
    assert!(ui.set_signature(0, 4).is_err());
    assert_eq!(ui.signature(), Signature { upper: 7, lower: 8 });
}

#[test]
fn labels_reflect_current_values() {
    let mut ui = UiState::default();
    assert_eq!(ui.label(Field::TimeSignature), "Time signature: 4 : 4");
    assert_eq!(ui.label(Field::Bpm), "Beats Per Minute: 120");
    assert_eq!(ui.label(Field::Color), "Color scheme: 0");
    assert_eq!(ui.label(Field::Visualization), "Visualization: 0 (Pendulum)");
    assert_eq!(ui.label(Field::Flashing), "Flashing: No");

    ui.toggle_flashing();
    ui.set_bpm(98.25).expect("finite");
    assert_eq!(ui.label(Field::Flashing), "Flashing: Yes");
    assert_eq!(ui.label(Field::Bpm), "Beats Per Minute: 98.25");
    assert_eq!(ui.labels().count(), Field::COUNT);
}

#[test]
fn label_does_not_change_fingerprint() {
    let ui = UiState::default();
    let before = ui.fingerprint();
    for field in Field::ALL {
        let _ = ui.label(field);
    }
    assert_eq!(ui.fingerprint(), before);
}

#[test]
fn bpm_formatting_keeps_five_significant_digits() {
    assert_eq!(format_bpm(120.0), "120");
    assert_eq!(format_bpm(350.0), "350");
    assert_eq!(format_bpm(123.456), "123.46");
    assert_eq!(format_bpm(1.5), "1.5");
    assert_eq!(format_bpm(60.125), "60.125");
}

#[test]
fn fingerprint_is_deterministic() {
    let mut ui = UiState::default();
    ui.set_bpm(133.0).expect("finite");
    ui.set_color(1);
    assert_eq!(ui.fingerprint(), ui.fingerprint());
    assert_eq!(ui.clone().fingerprint(), ui.fingerprint());
}

#[test]
fn fingerprint_changes_with_every_field() {
    let base = UiState::default();
    let fp = base.fingerprint();

    let mutations: [(&str, fn(&mut UiState)); 7] = [
        ("selection", |ui| ui.move_selection(1)),
        ("bpm", |ui| ui.set_bpm(121.0).expect("finite")),
        ("color", |ui| ui.set_color(1)),
        ("signature upper", |ui| ui.set_signature(3, 4).expect("valid")),
        ("signature lower", |ui| ui.set_signature(4, 8).expect("valid")),
        ("visualization", |ui| ui.set_visualization(1)),
        ("flashing", |ui| ui.toggle_flashing()),
    ];

    for (name, mutate) in mutations {
        let mut ui = base.clone();
        mutate(&mut ui);
        assert_ne!(ui.fingerprint(), fp, "{name} did not change the fingerprint");
    }
}

#[test]
fn fingerprint_returns_after_round_trip_edit() {
    let mut ui = UiState::default();
    let fp = ui.fingerprint();
    ui.set_color(1);
    ui.set_color(-1);
    assert_eq!(ui.fingerprint(), fp);
}
