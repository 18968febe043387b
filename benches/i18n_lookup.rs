// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use portfolio_site::i18n::{
    locale_from_params, DictionaryLoader, FluentArgs, Locale, LocaleConfig, QueryParams,
};
use std::hint::black_box;

fn locale_resolution_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("locale_resolution");
    let config = LocaleConfig::standard();

    for query in ["", "lang=en", "utm_source=feed&lang=fr&page=2"] {
        let params = QueryParams::parse(query);
        group.bench_function(format!("resolve {query:?}"), |b| {
            b.iter(|| black_box(locale_from_params(&config, black_box(&params))));
        });
    }

    group.finish();
}

fn dictionary_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary_lookup");
    let config = LocaleConfig::standard();
    let loader = DictionaryLoader::new(&config).expect("embedded dictionaries load");

    group.bench_function("load_dictionaries", |b| {
        b.iter(|| black_box(DictionaryLoader::new(&config).expect("embedded dictionaries load")));
    });

    let zh = loader.load(Locale::Zh);
    group.bench_function("plain_message", |b| {
        b.iter(|| black_box(zh.text(black_box("home.sections.about"))));
    });

    let mut args = FluentArgs::new();
    args.set("watched", 3);
    args.set("total", 12);
    group.bench_function("message_with_args", |b| {
        b.iter(|| black_box(zh.text_with(black_box("anime.progress"), &args)));
    });

    group.finish();
}

criterion_group!(benches, locale_resolution_benchmark, dictionary_lookup_benchmark);
criterion_main!(benches);
