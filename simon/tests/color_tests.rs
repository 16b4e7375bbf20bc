use std::collections::HashSet;

use simon::color::TileColor;
use simon::error::SimonError;

#[test]
fn every_color_has_its_own_fixed_pitch() {
    let expected = [
        (TileColor::Green, 261.6),
        (TileColor::Red, 329.6),
        (TileColor::Yellow, 392.0),
        (TileColor::Blue, 523.3),
    ];
    for (color, hz) in expected {
        assert_eq!(color.frequency_hz(), hz, "{color}");
    }

    let distinct: HashSet<u32> = TileColor::ALL
        .iter()
        .map(|c| c.frequency_hz().to_bits())
        .collect();
    assert_eq!(distinct.len(), TileColor::ALL.len());
}

#[test]
fn parses_only_the_four_tile_names() {
    for color in TileColor::ALL {
        assert_eq!(color.name().parse::<TileColor>().ok(), Some(color));
        assert_eq!(color.name().to_uppercase().parse::<TileColor>().ok(), Some(color));
    }
    assert_eq!(" blue ".parse::<TileColor>().ok(), Some(TileColor::Blue));

    for bad in ["", "purple", "greenish", "0"] {
        match bad.parse::<TileColor>() {
            Err(SimonError::UnknownColor(text)) => assert_eq!(text, bad),
            other => panic!("expected UnknownColor for {bad:?}, got {other:?}"),
        }
    }
}

#[test]
fn display_matches_tile_id() {
    let names: Vec<String> = TileColor::ALL.iter().map(|c| c.to_string()).collect();
    assert_eq!(names, ["green", "red", "yellow", "blue"]);
}
