#![no_main]

use boardview::{Geometry, Position};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, &str)| {
    let (rows, columns, notation) = input;
    let geometry = Geometry::new(rows % 12 + 1, columns % 12 + 1);
    if let Ok(pos) = Position::from_notation(notation, &geometry) {
        let canonical = pos.to_notation(&geometry).expect("decoded position fits");
        let roundtripped = Position::from_notation(&canonical, &geometry).expect("roundtrip");
        assert_eq!(pos, roundtripped);
    }
});
