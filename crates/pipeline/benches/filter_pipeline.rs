//! Benchmarks for the browse filter pipeline
//!
//! Run with: cargo bench --package pipeline

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::{BrowseQuery, CategoryFilter, FilterPipeline};
use recipe_model::{Category, RawRecipe, RecipeCollection};

fn build_menu(size: usize) -> RecipeCollection {
    let batch = (0..size)
        .map(|i| RawRecipe {
            id: format!("receta-{}", i),
            title: format!("Receta mediterránea {}", i),
            category: Category::ALL[i % Category::ALL.len()],
            summary: "Plato tradicional con aceite de oliva".to_string(),
            full_description: String::new(),
            ingredients: vec![
                "Aceite de oliva virgen extra".to_string(),
                if i % 4 == 0 { "Tomates cherry" } else { "Ajo" }.to_string(),
                "Sal".to_string(),
            ],
            steps: vec!["Preparar".to_string()],
            image_url: None,
        })
        .collect();
    RecipeCollection::seeded(batch, &mut rand::rng())
}

fn bench_browse(c: &mut Criterion) {
    let menu = build_menu(1_000);
    let pipeline = FilterPipeline::browse();

    c.bench_function("browse_all", |b| {
        let query = BrowseQuery::default();
        b.iter(|| pipeline.apply(black_box(menu.as_slice()), &query))
    });

    c.bench_function("browse_search_tomate", |b| {
        let query = BrowseQuery::new(CategoryFilter::All, "tomate");
        b.iter(|| pipeline.apply(black_box(menu.as_slice()), &query))
    });

    c.bench_function("browse_postre_search", |b| {
        let query = BrowseQuery::new(CategoryFilter::Only(Category::Postre), "oliva");
        b.iter(|| pipeline.apply(black_box(menu.as_slice()), &query))
    });
}

criterion_group!(benches, bench_browse);
criterion_main!(benches);
