use calscale::tz::context::{local_to_utc, utc_to_local, ConvCtx, Hint};
use calscale::tz::posix;
use calscale::{gps, gregorian, isoweek, julian, ntp};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn calendar(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar");
    group.bench_function("gregorian_date_to_rdn", |b| {
        b.iter(|| black_box(gregorian::date_to_rdn(black_box(2024), black_box(2), black_box(29))))
    });
    group.bench_function("gregorian_date_from_rdn", |b| {
        b.iter(|| black_box(gregorian::date_from_rdn(black_box(738_580))))
    });
    group.bench_function("julian_date_from_rdn", |b| {
        b.iter(|| black_box(julian::date_from_rdn(black_box(738_580))))
    });
    group.bench_function("isoweek_date_from_rdn", |b| {
        b.iter(|| black_box(isoweek::date_from_rdn(black_box(738_580))))
    });
    group.finish();
}

fn time_scales(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_scales");
    group.bench_function("ntp_to_time", |b| {
        b.iter(|| black_box(ntp::ntp_to_time(black_box(0xE3A3_4180), black_box(Some(1_700_000_000)))))
    });
    group.bench_function("gps_map_time", |b| {
        b.iter(|| black_box(gps::gps_map_time(black_box(1_700_000_000), black_box(18))))
    });
    group.finish();
}

fn tz_evaluation(c: &mut Criterion) {
    let zone = posix::parse("CET-1CEST,M3.5.0,M10.5.0/3").unwrap();
    let mut group = c.benchmark_group("tz");
    group.bench_function("posix_parse", |b| {
        b.iter(|| black_box(posix::parse(black_box("CET-1CEST,M3.5.0,M10.5.0/3"))))
    });
    group.bench_function("utc_to_local", |b| {
        let mut ctx = ConvCtx::new();
        b.iter(|| black_box(utc_to_local(black_box(1_719_830_400), &mut ctx, &zone)))
    });
    group.bench_function("local_to_utc", |b| {
        let mut ctx = ConvCtx::new();
        b.iter(|| black_box(local_to_utc(black_box(1_719_830_400), &mut ctx, &zone, Hint::Std)))
    });
    group.finish();
}

criterion_group!(benches, calendar, time_scales, tz_evaluation);
criterion_main!(benches);
