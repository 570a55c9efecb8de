#![no_main]

use boardview::{Geometry, Position};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|pos: Position| {
    let geometry = Geometry::default();
    let Some(notation) = pos.to_notation(&geometry) else {
        return;
    };
    let roundtripped = Position::from_notation(&notation, &geometry).expect("roundtrip via: {notation}");
    assert_eq!(pos, roundtripped);
});
