// benches/aggregates.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use poke_scrape::{
    analysis,
    csv::parse_rows,
    records::{BaseStats, PokemonRecord, Record},
};

const TYPES: [&str; 18] = [
    "normal", "fire", "water", "grass", "electric", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

// Roughly the size of the real species catalog.
fn synthetic(n: u32) -> Vec<PokemonRecord> {
    (1..=n)
        .map(|id| {
            let s = |k: u32| 20 + (id * 37 + k * 11) % 140;
            let t1 = TYPES[(id as usize) % TYPES.len()];
            let t2 = TYPES[(id as usize * 7) % TYPES.len()];
            let types = if t1 == t2 { vec![t1.to_string()] } else { vec![t1.to_string(), t2.to_string()] };
            PokemonRecord {
                id,
                name: format!("mon-{id}"),
                species: format!("mon-{id}"),
                generation: Some((1 + id % 9) as u8),
                types,
                base_stats: BaseStats::new(s(0), s(1), s(2), s(3), s(4), s(5)),
                stage: Some((1 + id % 3) as u8),
                is_fully_evolved: Some(id % 3 == 2),
                is_legendary: Some(id % 50 == 0),
                is_mythical: Some(false),
                dex_entry: Some(format!("Entry for mon-{id}, with a comma.")),
            }
        })
        .collect()
}

fn bench_aggregates(c: &mut Criterion) {
    let records = synthetic(1025);

    c.bench_function("rank_by_bst", |b| {
        b.iter(|| black_box(analysis::rank_by_bst(black_box(&records)).len()))
    });

    c.bench_function("strongest_non_legendary", |b| {
        b.iter(|| {
            let ex = analysis::legendary_exclusions(black_box(&records), &[]);
            black_box(analysis::strongest_non_legendary(&records, &ex).map(|p| p.id))
        })
    });

    c.bench_function("average_bst_by_type", |b| {
        b.iter(|| black_box(analysis::average_bst_by_type(black_box(&records), true).len()))
    });

    c.bench_function("stat_leaders_by_generation", |b| {
        b.iter(|| black_box(analysis::stat_leaders_by_generation(black_box(&records), 5).len()))
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut text = PokemonRecord::headers().join(",");
    text.push('\n');
    for r in synthetic(1025) {
        let mut buf = Vec::new();
        poke_scrape::csv::write_row(&mut buf, &r.to_row(), ',').unwrap();
        text.push_str(&String::from_utf8(buf).unwrap());
    }

    c.bench_function("parse_pokemon_csv", |b| {
        b.iter(|| {
            let rows = parse_rows(black_box(&text), ',');
            let parsed = rows[1..].iter().filter(|r| PokemonRecord::from_row(r).is_ok()).count();
            black_box(parsed)
        })
    });
}

criterion_group!(benches, bench_aggregates, bench_parse);
criterion_main!(benches);
