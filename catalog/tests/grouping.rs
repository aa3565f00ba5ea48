//! End-to-end checks tying slug generation, inference and ordering together.

use checklist_catalog::{
    Confidence, InferenceMode, Resolver, SetSlugParts, Vocabulary, base_slug_of,
    group_sets_by_base_slug, infer_relationship, print_run_of, set_slug, sort_sets,
    sort_sets_grouped, variant_of,
};
use checklist_core::{SetRecord, SetType};

const YEAR: &str = "2024-25";
const RELEASE: &str = "Donruss Soccer";

fn base(set_name: &str) -> SetSlugParts<'_> {
    SetSlugParts {
        year: YEAR,
        release_name: RELEASE,
        set_name,
        ..Default::default()
    }
}

fn parallel<'a>(set_name: &'a str, variant: &'a str, print_run: Option<u32>) -> SetRecord {
    let slug = set_slug(&SetSlugParts {
        variant: Some(variant),
        print_run,
        ..base(set_name)
    });
    let record = SetRecord::new(&slug, &format!("{set_name} {variant}"));
    match print_run {
        Some(run) => record.with_print_run(run),
        None => record,
    }
}

fn base_record(set_name: &str) -> SetRecord {
    SetRecord::new(&set_slug(&base(set_name)), set_name)
}

fn names(sets: &[SetRecord]) -> Vec<&str> {
    sets.iter().map(|set| set.name.as_str()).collect()
}

#[test]
fn generated_parallel_slugs_resolve_to_their_base() {
    for set_name in ["Base", "Optic", "Rated Rookies", "Kaboom", "Net Marvels"] {
        let base_slug = set_slug(&base(set_name));
        for (variant, print_run) in [("Gold", Some(10)), ("Pink Velocity", None), ("Blue Cubic", Some(99))] {
            let slug = parallel(set_name, variant, print_run).slug;
            assert_eq!(base_slug_of(&slug), base_slug, "base of {slug}");
            assert_eq!(print_run_of(&slug), print_run, "print run of {slug}");
            assert_eq!(
                variant_of(&slug).as_deref(),
                Some(checklist_catalog::slugify(variant).as_str()),
                "variant of {slug}"
            );
        }
    }
}

#[test]
fn typed_set_slugs_resolve_through_fragments() {
    let slug = set_slug(&SetSlugParts {
        set_type: SetType::Autograph,
        variant: Some("Gold"),
        print_run: Some(10),
        ..base("Dual Jersey Ink")
    });
    assert_eq!(slug, "2024-25-donruss-soccer-auto-dual-jersey-ink-gold-parallel-10");

    let relationship = infer_relationship(&slug, InferenceMode::Slug);
    assert_eq!(relationship.base, "2024-25-donruss-soccer-auto-dual-jersey-ink");
    assert_eq!(relationship.confidence, Confidence::Pattern);
}

#[test]
fn release_display_order() {
    let sets = vec![
        parallel("Kaboom", "Gold", Some(10)),
        base_record("Zebra Insert"),
        parallel("Optic", "Red", Some(25)),
        base_record("Kaboom"),
        parallel("Optic", "Holo", None),
        base_record("Optic"),
        parallel("Base", "Blue", Some(99)),
        base_record("Base"),
        parallel("Optic", "Gold", Some(10)),
    ];

    let sorted = sort_sets_grouped(sets);
    assert_eq!(
        names(&sorted),
        [
            "Base",
            "Base Blue",
            "Optic",
            "Optic Holo",
            "Optic Red",
            "Optic Gold",
            "Kaboom",
            "Kaboom Gold",
            "Zebra Insert",
        ]
    );
}

#[test]
fn display_order_ignores_input_order() {
    let forward = vec![
        base_record("Rated Rookies"),
        parallel("Rated Rookies", "Gold", Some(10)),
        parallel("Rated Rookies", "Blue", Some(50)),
        parallel("Rated Rookies", "Pink Ice", None),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(sort_sets_grouped(forward), sort_sets_grouped(reversed));
}

#[test]
fn slug_grouping_buckets_parallels_under_base() {
    let sets = vec![
        parallel("Optic", "Gold", Some(10)),
        base_record("Optic"),
        parallel("Rated Rookies", "Holo", None),
        parallel("Optic", "Blue", Some(50)),
        base_record("Rated Rookies"),
    ];

    let groups = group_sets_by_base_slug(sets);
    assert_eq!(groups.len(), 2);
    assert_eq!(
        names(&groups["2024-25-donruss-soccer-optic"]),
        ["Optic", "Optic Blue", "Optic Gold"]
    );
    assert_eq!(
        names(&groups["2024-25-donruss-soccer-rated-rookies"]),
        ["Rated Rookies", "Rated Rookies Holo"]
    );
}

#[test]
fn variantless_parallel_slug_groups_under_its_set() {
    let numbered_only = SetRecord::new("2024-25-donruss-soccer-optic-parallel-5", "Optic /5")
        .with_print_run(5);
    let sets = vec![
        numbered_only,
        base_record("Optic"),
        parallel("Optic", "Gold", Some(10)),
    ];

    let groups = group_sets_by_base_slug(sets);
    assert_eq!(groups.len(), 1);
    let optic = &groups["2024-25-donruss-soccer-optic"];
    assert_eq!(optic.len(), 3);
    assert_eq!(optic[0].name, "Optic");
    assert!(optic.iter().any(|set| set.name == "Optic /5"));
}

#[test]
fn slug_sort_is_flat() {
    let sets = vec![
        parallel("Optic", "Gold", Some(10)),
        base_record("Optic"),
        base_record("Base"),
    ];
    assert_eq!(names(&sort_sets(sets)), ["Base", "Optic", "Optic Gold"]);
}

#[test]
fn vocabulary_file_drives_privileged_groups() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary.yml");
    std::fs::write(&path, "version: \"1.0\"\nprivileged_groups: [Kaboom, Base]\n").unwrap();

    let resolver = Resolver::new(Vocabulary::load(&path).unwrap()).unwrap();
    let sorted = resolver.sort_sets_grouped(vec![
        base_record("Optic"),
        base_record("Base"),
        base_record("Kaboom"),
    ]);
    assert_eq!(names(&sorted), ["Kaboom", "Base", "Optic"]);
}
