use chess_rules::{Board, Color, FigureKind, GameEngine, MoveValidator, Outcome, Player, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn players() -> [Player; 2] {
    [Player::new("White", Color::White), Player::new("Black", Color::Black)]
}

fn all_destinations(game: &GameEngine<()>) -> Vec<(Position, Position)> {
    let color = game.current_player().color;
    game.board()
        .figures_of(color)
        .flat_map(|(from, _)| game.legal_destinations(from).into_iter().map(move |to| (from, to)))
        .collect()
}

fn random_game(seed: u64, max_steps: usize) -> GameEngine<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameEngine::new(players(), ());
    for _ in 0..max_steps {
        let Some(&(from, to)) = all_destinations(&game).choose(&mut rng) else {
            break;
        };
        if let Ok(Outcome::PromotionRequested(_)) = game.play(from, to) {
            let _ = game.resolve_promotion(FigureKind::Queen);
        }
    }
    game
}

fn criterion_benchmark(c: &mut Criterion) {
    let board = Board::initialize();
    c.bench_function("check detection", |b| {
        b.iter(|| MoveValidator::new(black_box(&board)).is_in_check(Color::White))
    });
    let middle_game = random_game(42, 30);
    c.bench_function("check detection, middle game", |b| {
        b.iter(|| MoveValidator::new(black_box(middle_game.board())).is_in_check(Color::Black))
    });
    let game = GameEngine::new(players(), ());
    c.bench_function("legal destinations from start", |b| {
        b.iter(|| all_destinations(black_box(&game)))
    });
    c.bench_function("random game 100", |b| b.iter(|| random_game(black_box(7), 100)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
