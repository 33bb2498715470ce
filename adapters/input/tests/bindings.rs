use tactics_input::{BindingsError, FrameState, InputSource, Key, KeyBindings, TileAction};
use tactics_tile::TileInput;

const DEFAULT_BINDINGS: &str = r#"
version = 1

[bindings]
primary = "MouseLeft"
secondary = "MouseRight"
tertiary = "MouseMiddle"
unit_modifier = "U"
team_swap = "Space"
"#;

#[test]
fn defaults_match_shipped_file() {
    let parsed = KeyBindings::from_toml_str(DEFAULT_BINDINGS).expect("valid bindings");
    assert_eq!(parsed, KeyBindings::default());
}

#[test]
fn modifier_click_translates_to_unit_placement_input() {
    let frame = FrameState::new()
        .press(InputSource::MouseLeft)
        .hold(InputSource::Key(Key::Character('U')));

    assert_eq!(
        KeyBindings::default().translate(&frame),
        TileInput {
            primary_pressed: true,
            unit_modifier_held: true,
            ..TileInput::default()
        }
    );
}

#[test]
fn held_buttons_do_not_count_as_clicks() {
    let frame = FrameState::new()
        .hold(InputSource::MouseLeft)
        .hold(InputSource::Key(Key::Space));

    assert_eq!(KeyBindings::default().translate(&frame), TileInput::default());
}

#[test]
fn rebinding_moves_team_swap_to_new_key() {
    let contents = DEFAULT_BINDINGS.replace(r#"team_swap = "Space""#, r#"team_swap = "t""#);
    let bindings = KeyBindings::from_toml_str(&contents).expect("valid bindings");

    assert_eq!(
        bindings.source(TileAction::TeamSwap),
        InputSource::Key(Key::Character('T'))
    );
    let frame = FrameState::new().press(InputSource::Key(Key::Character('T')));
    assert!(bindings.translate(&frame).team_swap_pressed);
    let space = FrameState::new().press(InputSource::Key(Key::Space));
    assert!(!bindings.translate(&space).team_swap_pressed);
}

#[test]
fn rejects_unsupported_version() {
    let contents = DEFAULT_BINDINGS.replace("version = 1", "version = 2");
    assert!(matches!(
        KeyBindings::from_toml_str(&contents),
        Err(BindingsError::UnsupportedVersion(2))
    ));
}

#[test]
fn rejects_unknown_action() {
    let contents = format!("{DEFAULT_BINDINGS}jump = \"J\"\n");
    assert!(matches!(
        KeyBindings::from_toml_str(&contents),
        Err(BindingsError::UnknownAction(name)) if name == "jump"
    ));
}

#[test]
fn rejects_unknown_input_name() {
    let contents = DEFAULT_BINDINGS.replace(r#""MouseMiddle""#, r#""MouseFourth""#);
    assert!(matches!(
        KeyBindings::from_toml_str(&contents),
        Err(BindingsError::UnknownInput(name)) if name == "MouseFourth"
    ));
}

#[test]
fn rejects_missing_action() {
    let contents = DEFAULT_BINDINGS.replace("tertiary = \"MouseMiddle\"\n", "");
    assert!(matches!(
        KeyBindings::from_toml_str(&contents),
        Err(BindingsError::MissingAction("tertiary"))
    ));
}

#[test]
fn input_names_round_trip_through_display() {
    for name in ["MouseLeft", "MouseMiddle", "Space", "LeftShift", "U", "7"] {
        let source = InputSource::parse(name).expect("known input");
        assert_eq!(source.to_string(), name);
    }
}

#[test]
fn missing_file_reports_path() {
    let error = KeyBindings::from_path("does/not/exist.toml").expect_err("missing file");
    assert!(error.to_string().contains("does/not/exist.toml"));
}

#[test]
fn shipped_bindings_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/bindings.toml");
    let bindings = KeyBindings::from_path(path).expect("shipped bindings load");
    assert_eq!(bindings, KeyBindings::default());
}
