use std::time::Duration;

use boardview::{
    fen, BoardConfig, Controller, Geometry, ManualScheduler, Position, PositionDiff, PositionInput,
    Rendered,
};
use iai::black_box;

const ITALIAN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_decode_notation() -> Position {
    let input = PositionInput::from(ITALIAN);
    fen::decode(black_box(&input), &Geometry::default())
}

fn bench_encode_notation() -> Option<String> {
    fen::encode(black_box(&Position::start()), &Geometry::default())
}

fn bench_diff() -> PositionDiff {
    let old = Position::start();
    let new = Position::from_notation(ITALIAN, &Geometry::default()).expect("valid notation");
    PositionDiff::between(black_box(&old), black_box(&new))
}

fn bench_render() -> Rendered {
    let board = Controller::new(BoardConfig::default(), (), ManualScheduler::new(), "start");
    black_box(&board).render()
}

fn bench_reconcile_game() -> Position {
    let placements = [
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R",
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
    ];

    let mut board = Controller::new(BoardConfig::default(), (), ManualScheduler::new(), "start");
    for placement in black_box(placements) {
        board.set_position(placement);
        board.advance(Duration::from_millis(300));
    }
    board.position().clone()
}

iai::main!(
    bench_decode_notation,
    bench_encode_notation,
    bench_diff,
    bench_render,
    bench_reconcile_game,
);
