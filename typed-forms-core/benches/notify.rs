use criterion::{black_box, criterion_group, criterion_main, Criterion};

use typed_forms_core::prelude::*;

fn observable_fan_out(c: &mut Criterion) {
    let cell = Observable::new(0u64);
    for _ in 0..8 {
        cell.subscribe(|value| {
            black_box(*value);
        });
    }

    c.bench_function("observable_set_8_subscribers", |b| {
        let mut next = 0u64;
        b.iter(|| {
            next += 1;
            cell.set(black_box(next));
        })
    });
}

fn form_edit_and_submit(c: &mut Criterion) {
    let schema = describe_form((0..16).map(|i| {
        (
            format!("field_{i}"),
            create_field(atomic::<String, String>).with_validator(|value: &String| {
                value.is_empty().then(|| "required".to_string())
            }),
        )
    }))
    .unwrap();
    let form = create_form(
        &schema,
        (0..16).map(|i| (format!("field_{i}"), format!("value {i}"))),
    )
    .unwrap();

    c.bench_function("form_set_value", |b| {
        b.iter(|| form["field_7"].set_value(black_box("edited".to_string())))
    });

    c.bench_function("form_submit_16_fields", |b| {
        b.iter(|| {
            form.submit(|values| {
                black_box(values);
            })
        })
    });
}

criterion_group!(benches, observable_fan_out, form_edit_and_submit);
criterion_main!(benches);
