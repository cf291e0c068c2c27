use std::io::Write;

use sokoban_rs::{
    classic_level, encode_pack, load_pack, parse_pack, Board, Cell, GameState, Level, LevelError, MAP_SIZE,
};

fn classic_bytes() -> Vec<u8> {
    classic_level().unwrap().board().cells().iter().map(|c| c.bits()).collect()
}

#[test]
fn text_level_counts_and_start() {
    let lvl = Level::from_rows(&["#####", "#@$.#", "#####"]).unwrap();
    assert_eq!((lvl.width(), lvl.height()), (5, 3));
    assert_eq!(lvl.start(), 6);
    assert_eq!(lvl.objectives(), 1);
    assert!(lvl.board().get(6).is_exactly(Cell::CHARACTER));
}

#[test]
fn text_level_errors() {
    assert!(matches!(Level::from_rows::<&str>(&[]), Err(LevelError::Empty)));
    assert!(matches!(
        Level::from_rows(&["#####", "#@$.#", "####"]),
        Err(LevelError::RaggedRows { row: 2, expected: 5, found: 4 })
    ));
    assert!(matches!(
        Level::from_rows(&["#@$x.#"]),
        Err(LevelError::InvalidGlyph { row: 0, col: 3, glyph: 'x' })
    ));
    assert!(matches!(Level::from_rows(&["# $.#"]), Err(LevelError::MissingCharacter)));
    assert!(matches!(Level::from_rows(&["#@$.@#"]), Err(LevelError::MultipleCharacters(2))));
    assert!(matches!(
        Level::from_rows(&["#@$$.#"]),
        Err(LevelError::CountMismatch { crates: 2, objectives: 1 })
    ));
    assert!(matches!(Level::from_rows(&["#@  #"]), Err(LevelError::NoObjectives)));
}

#[test]
fn binary_level_matches_text_level() {
    let from_bytes = Level::from_bytes(&classic_bytes(), 12, 12).unwrap();
    assert_eq!(from_bytes, classic_level().unwrap());
}

#[test]
fn pack_with_two_levels_parses() {
    let classic = classic_level().unwrap();
    let bytes = encode_pack(&[classic.clone(), classic.clone()]).unwrap();
    assert_eq!(bytes.len(), 1 + 2 * MAP_SIZE);
    assert_eq!(bytes[0], 2);

    let levels = parse_pack(&bytes).unwrap();
    assert_eq!(levels, vec![classic.clone(), classic]);
}

#[test]
fn pack_errors() {
    assert!(matches!(parse_pack(&[]), Err(LevelError::Empty)));
    assert!(matches!(parse_pack(&[0]), Err(LevelError::Empty)));

    let mut short = vec![1];
    short.extend(&classic_bytes()[..100]);
    assert!(matches!(parse_pack(&short), Err(LevelError::Truncated { .. })));

    let mut long = vec![1];
    long.extend(classic_bytes());
    long.push(0);
    assert!(matches!(parse_pack(&long), Err(LevelError::TrailingBytes { extra: 1 })));

    let mut bad_cell = vec![1];
    bad_cell.extend(classic_bytes());
    bad_cell[1 + 13] = 0x08;
    let err = parse_pack(&bad_cell).unwrap_err();
    assert!(matches!(
        &err,
        LevelError::InPack { index: 0, source } if matches!(**source, LevelError::InvalidCell { index: 13, value: 0x08 })
    ));
    assert!(err.to_string().starts_with("level 0:"));
}

#[test]
fn pack_rejects_level_without_character() {
    let mut bytes = vec![1];
    bytes.extend(classic_bytes());
    let start = classic_level().unwrap().start();
    bytes[1 + start] = Cell::EMPTY.bits();
    let err = parse_pack(&bytes).unwrap_err();
    assert!(matches!(
        &err,
        LevelError::InPack { source, .. } if matches!(**source, LevelError::MissingCharacter)
    ));
}

#[test]
fn encode_rejects_wrong_size() {
    let small = Level::from_rows(&["#@$.#"]).unwrap();
    assert!(matches!(encode_pack(&[small]), Err(LevelError::WrongSize { width: 5, height: 1 })));
    assert!(matches!(encode_pack(&[]), Err(LevelError::Empty)));
}

#[test]
fn load_pack_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&encode_pack(&[classic_level().unwrap()]).unwrap()).unwrap();
    let levels = load_pack(file.path()).unwrap();
    assert_eq!(levels.len(), 1);

    let missing = file.path().with_extension("missing");
    assert!(matches!(load_pack(&missing), Err(LevelError::Io { .. })));
}

#[test]
fn template_is_never_modified_by_play() {
    let lvl = classic_level().unwrap();
    let mut gs = GameState::from_level(&lvl);
    gs.step(sokoban_rs::Direction::Left);
    gs.reset();
    assert_eq!(gs.level(), &lvl);
    assert!(gs.level().board().get(lvl.start()).contains(Cell::CHARACTER));
}

#[test]
fn deserializing_validates_the_level() {
    let lvl = Level::from_rows(&["#####", "#@$.#", "#####"]).unwrap();
    let json = serde_json::to_string(&lvl).unwrap();
    let back: Level = serde_json::from_str(&json).unwrap();
    assert_eq!(back, lvl);
    assert_eq!(back.start(), 6);

    // No character, no crates: would otherwise count as already solved.
    let empty = r#"{"width":3,"height":1,"cells":[0,0,0]}"#;
    assert!(serde_json::from_str::<Level>(empty).is_err());
    // Fewer cells than the dimensions promise.
    let short = r#"{"width":3,"height":1,"cells":[16,4]}"#;
    assert!(serde_json::from_str::<Level>(short).is_err());
    // Crate under the character.
    let bad_cell = r#"{"width":3,"height":1,"cells":[20,2,0]}"#;
    assert!(serde_json::from_str::<Level>(bad_cell).is_err());

    assert!(matches!(Level::try_from(Board::new(5, 3)), Err(LevelError::MissingCharacter)));
}
