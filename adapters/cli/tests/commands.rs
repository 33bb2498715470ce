use std::{fs, path::PathBuf, process::Command};

const BOARD: &str = r#"[
  {"tileType":0,"isWalkable":true,"posX":0.0,"posY":0.0,
   "occupiedUnit":{"unitId":1,"faction":"Red","unitType":"Knight","health":8},
   "spawnableTileData":null},
  {"tileType":3,"isWalkable":true,"posX":1.0,"posY":0.0,
   "occupiedUnit":null,"spawnableTileData":{"tileOwner":null}}
]"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn run(args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_tactics-tile"))
        .args(args)
        .output()
        .expect("failed to run tactics-tile");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
    )
}

#[test]
fn inspect_prints_counts() {
    let dir = scratch_dir("inspect");
    let board = dir.join("board.json");
    fs::write(&board, BOARD).expect("write board");

    let (ok, stdout) = run(&["inspect", board.to_str().expect("utf8 path")]);

    assert!(ok);
    assert!(stdout.contains("tiles: 2"));
    assert!(stdout.contains("occupied: 1"));
}

#[test]
fn replay_reports_passability_for_requested_faction() {
    let dir = scratch_dir("replay");
    let board = dir.join("board.json");
    fs::write(&board, BOARD).expect("write board");

    let (ok, stdout) = run(&["replay", board.to_str().expect("utf8 path"), "--faction", "blue"]);

    assert!(ok);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("passable=false"));
    assert!(lines[1].contains("passable=true"));
}

#[test]
fn edit_with_modifier_places_unit() {
    let dir = scratch_dir("edit");
    let board = dir.join("board.json");
    let edited = dir.join("edited.json");
    fs::write(&board, BOARD).expect("write board");

    let (ok, _) = run(&[
        "edit",
        board.to_str().expect("utf8 path"),
        "--tile",
        "1",
        "--press",
        "MouseLeft",
        "--hold",
        "U",
        "--place",
        "blue",
        "--output",
        edited.to_str().expect("utf8 path"),
    ]);
    assert!(ok);

    let contents = fs::read_to_string(&edited).expect("edited board written");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(value[1]["tileType"], 3);
    assert_eq!(value[1]["occupiedUnit"]["unitId"], 2);
    assert_eq!(value[1]["occupiedUnit"]["faction"], "Blue");
}

#[test]
fn unknown_press_name_fails() {
    let dir = scratch_dir("bad-press");
    let board = dir.join("board.json");
    fs::write(&board, BOARD).expect("write board");

    let (ok, _) = run(&[
        "edit",
        board.to_str().expect("utf8 path"),
        "--tile",
        "0",
        "--press",
        "Trackpad",
    ]);

    assert!(!ok);
}
