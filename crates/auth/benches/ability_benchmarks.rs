use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use workforce_auth::{build_abilities, Action, AbilitySet, Category, Role, SessionUser, Subject};
use workforce_core::UserId;

fn users() -> Vec<(&'static str, SessionUser)> {
    let base = |role, category: Option<Category>| {
        let mut user = SessionUser::new(UserId::new(), "bench@example.com", "Bench", role);
        user.category = category;
        user
    };

    vec![
        ("admin", base(Role::Admin, None)),
        ("employee", base(Role::User, Some(Category::Employee))),
        ("employer", base(Role::User, Some(Category::Employer))),
        ("agency", base(Role::Partner, Some(Category::Agency))),
    ]
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_abilities");
    for (label, user) in users() {
        group.bench_with_input(BenchmarkId::from_parameter(label), &user, |b, user| {
            b.iter(|| build_abilities(black_box(Some(user))))
        });
    }
    group.finish();
}

fn bench_can_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("can_full_grid");
    for (label, user) in users() {
        let abilities = build_abilities(Some(&user));
        group.bench_with_input(BenchmarkId::from_parameter(label), &abilities, |b, abilities| {
            b.iter(|| {
                let mut granted = 0usize;
                for action in Action::ALL {
                    for subject in Subject::ALL {
                        if abilities.can(black_box(action), black_box(subject), None) {
                            granted += 1;
                        }
                    }
                }
                granted
            })
        });
    }
    group.finish();
}

fn bench_rehydrate(c: &mut Criterion) {
    let (_, agency) = users().remove(3);
    let records = build_abilities(Some(&agency)).to_raw_rules();

    c.bench_function("rehydrate_agency_rules", |b| {
        b.iter(|| AbilitySet::from_raw_rules(black_box(records.clone())))
    });
}

criterion_group!(benches, bench_build, bench_can_grid, bench_rehydrate);
criterion_main!(benches);
