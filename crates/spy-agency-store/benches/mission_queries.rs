use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spy_agency_model::{CatId, NewMission, NewSpyCat, NewTarget};
use spy_agency_store::{AgencyStore, StoreConfig};
use tempfile::tempdir;

fn seed(store: &AgencyStore, cats: usize) {
    for i in 0..cats {
        let cat = store
            .create_spy_cat(&NewSpyCat {
                name: format!("agent-{i}"),
                years_of_experience: 3,
                breed: "Siamese".to_string(),
                salary: 1000,
            })
            .expect("seed cat");
        let spy_cat_id: Option<CatId> = if i % 2 == 0 { Some(cat.id) } else { None };
        store
            .create_mission(&NewMission {
                spy_cat_id,
                targets: (0..3)
                    .map(|t| NewTarget {
                        name: format!("target-{i}-{t}"),
                        country: "France".to_string(),
                        notes: None,
                    })
                    .collect(),
            })
            .expect("seed mission");
    }
}

fn bench_mission_queries(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let store = AgencyStore::open(dir.path().join("bench.sqlite"), StoreConfig::default())
        .expect("open store");
    seed(&store, 200);

    c.bench_function("list_missions_200", |b| {
        b.iter(|| black_box(store.list_missions().expect("list missions")))
    });
    c.bench_function("list_spy_cats_200", |b| {
        b.iter(|| black_box(store.list_spy_cats().expect("list cats")))
    });
}

criterion_group!(benches, bench_mission_queries);
criterion_main!(benches);
