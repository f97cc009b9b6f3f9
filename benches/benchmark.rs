//! パフォーマンスベンチマーク
//!
//! 多数のルールを含む拡張リストの書き出し・読み込み速度を測定します。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xlsxext::{
    CfRule, Cfvo, CfvoType, ConditionalFormatting, DataBar, DataValidation, ExtLstModel,
    ExtLstSerializerBuilder, IconSet, IdStrategy,
};

/// `ranges`個の範囲に、拡張形式が必要なルールを3つずつ持つモデルを生成
fn build_model(ranges: usize) -> ExtLstModel {
    let conditional_formattings = (0..ranges)
        .map(|i| {
            let bar = DataBar {
                gradient: false,
                cfvo: vec![Cfvo::new(CfvoType::Min), Cfvo::new(CfvoType::Max)],
                ..DataBar::default()
            };
            ConditionalFormatting::new(
                format!("A{}:A{}", i * 10 + 1, i * 10 + 10),
                vec![
                    CfRule::with_data_bar(bar).priority(1),
                    CfRule::with_icon_set(IconSet::named("5Boxes")).priority(2),
                    CfRule::with_formulae([format!("A{}>Limits!$A$1", i * 10 + 1)])
                        .priority(3)
                        .extension_id(format!("{{00000000-0000-4000-8000-{:012X}}}", i)),
                ],
            )
        })
        .collect();

    let data_validations = (0..ranges)
        .map(|i| DataValidation {
            sqref: format!("B{}", i + 1),
            validation_type: Some("list".to_string()),
            formula1: Some("Lists!$A$1:$A$10".to_string()),
            ..DataValidation::default()
        })
        .collect();

    ExtLstModel {
        conditional_formattings,
        data_validations,
    }
}

fn benchmark_render(c: &mut Criterion) {
    let serializer = ExtLstSerializerBuilder::new()
        .with_id_strategy(IdStrategy::Sequential)
        .build()
        .unwrap();

    let mut group = c.benchmark_group("render");
    for ranges in [10usize, 100, 1000] {
        let mut model = build_model(ranges);
        serializer.prepare(&mut model);

        group.throughput(Throughput::Elements((ranges * 3) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ranges), &model, |b, model| {
            b.iter(|| {
                let xml = serializer.render_to_string(black_box(model)).unwrap();
                black_box(xml);
            });
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let serializer = ExtLstSerializerBuilder::new()
        .with_id_strategy(IdStrategy::Sequential)
        .build()
        .unwrap();

    let mut group = c.benchmark_group("parse");
    for ranges in [10usize, 100, 1000] {
        let mut model = build_model(ranges);
        serializer.prepare(&mut model);
        let xml = serializer.render_to_string(&model).unwrap();

        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ranges), &xml, |b, xml| {
            b.iter(|| {
                let model = serializer.parse_str(black_box(xml)).unwrap();
                black_box(model);
            });
        });
    }
    group.finish();
}

fn benchmark_prepare(c: &mut Criterion) {
    let serializer = ExtLstSerializerBuilder::new().build().unwrap();
    let model = build_model(1000);

    c.bench_function("prepare_1000_ranges", |b| {
        b.iter(|| {
            let mut model = model.clone();
            serializer.prepare(black_box(&mut model));
            black_box(model);
        });
    });
}

criterion_group!(benches, benchmark_render, benchmark_parse, benchmark_prepare);
criterion_main!(benches);
