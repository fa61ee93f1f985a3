//! Integration tests for catalog browsing (courses, semesters, subjects).

use studyhub::Catalog;

fn catalog() -> &'static Catalog {
    Catalog::builtin().unwrap()
}

#[test]
fn test_courses_distinct_in_catalog_order() {
    let courses = catalog().courses();

    // No duplicates.
    let mut deduped = courses.clone();
    deduped.dedup();
    assert_eq!(courses.len(), deduped.len());

    assert_eq!(courses[0], "Mathematics");
    assert!(courses.contains(&"BBA"));
    assert!(courses.contains(&"BCA"));
    assert!(courses.contains(&"B.Pharm"));
}

#[test]
fn test_semesters_ascending_and_distinct() {
    let catalog = catalog();

    assert_eq!(catalog.semesters("BBA"), vec![1, 2, 3]);
    assert_eq!(catalog.semesters("BCA"), vec![1, 2, 3]);
    assert!(catalog.semesters("Unknown Course").is_empty());
}

#[test]
fn test_subjects_by_course_and_semester() {
    let subjects = catalog().subjects("BBA", 1, "");

    assert_eq!(subjects.len(), 2);
    assert!(subjects.iter().any(|n| n.id == "pom-main"));
    assert!(subjects.iter().any(|n| n.id == "bba-note-2"));
}

#[test]
fn test_subjects_narrowed_by_term() {
    let narrowed = catalog().subjects("BBA", 1, "accounting");
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].id, "bba-note-2");

    // Term matching ignores case and surrounding whitespace.
    let narrowed = catalog().subjects("BBA", 1, "  ACCOUNTING ");
    assert_eq!(narrowed.len(), 1);

    assert!(catalog().subjects("BBA", 1, "quantum").is_empty());
}

#[test]
fn test_note_units_complete() {
    let note = catalog().note("pom-main").unwrap();
    assert_eq!(note.units.len(), 5);

    let unit = note.unit("pom-unit-3").unwrap();
    assert_eq!(unit.title, "Unit 3: Organizing");
    assert!(unit.content.is_some());
}
