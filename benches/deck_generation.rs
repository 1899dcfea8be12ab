use criterion::{black_box, criterion_group, criterion_main, Criterion};
use concentration::cards::{CardIndex, Deck, FaceCatalog};
use concentration::core::{GameConfig, GameRng};
use concentration::game::ConcentrationGame;

fn catalog() -> FaceCatalog {
    FaceCatalog::new((0..64).map(|i| format!("face{}.png", i)))
}

fn bench_deal_10_pairs(c: &mut Criterion) {
    let catalog = catalog();
    let mut rng = GameRng::new(12345);

    c.bench_function("deal_10_pairs", |b| {
        b.iter(|| Deck::deal(&catalog, black_box(10), &mut rng))
    });
}

fn bench_deal_64_pairs(c: &mut Criterion) {
    let catalog = catalog();
    let mut rng = GameRng::new(12345);

    c.bench_function("deal_64_pairs", |b| {
        b.iter(|| Deck::deal(&catalog, black_box(64), &mut rng))
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let config = GameConfig::new().with_seed(12345);
    let mut game = ConcentrationGame::headless(config, catalog()).unwrap();

    c.bench_function("shuffle_requested", |b| {
        b.iter(|| game.on_shuffle_requested())
    });
}

fn bench_play_round(c: &mut Criterion) {
    let config = GameConfig::new().with_seed(12345);
    let mut game = ConcentrationGame::headless(config, catalog()).unwrap();

    c.bench_function("play_perfect_round", |b| {
        b.iter(|| {
            game.on_shuffle_requested().unwrap();
            let indices: Vec<CardIndex> = game.deck().iter().map(|(i, _)| i).collect();
            for index in indices {
                game.on_card_activated(index);
                let partner = game.deck().get(index).unwrap().partner();
                game.on_card_activated(partner);
            }
            black_box(game.state())
        })
    });
}

criterion_group!(
    benches,
    bench_deal_10_pairs,
    bench_deal_64_pairs,
    bench_shuffle,
    bench_play_round
);
criterion_main!(benches);
