//! Drives a full ingestion run over a directory of scraped section pages.

use std::{fs, path::Path};

use coursebook::{Options, ValidationError, domain::ValidationIssue, ingest};
use serde_json::{Value, json};
use tempfile::TempDir;

fn write_section(
    dir: &Path,
    name: &str,
    section: &str,
    course_number: &str,
    term: &str,
    reqs: &str,
) {
    let document = json!({
        "Class/Course Number:": format!("2{name} / {course_number}"),
        "Class Section:": section,
        "Course Title:": "Sample Course",
        "Description:": "Sample description. (3-0) S",
        "Enrollment Reqs:": reqs,
        "Schedule:": format!(
            "Term: {term} Type: Regular Academic Session Starts: August 21, 2023 \
             Ends: December 15, 2023 August 21, 2023-December 7, 2023 \
             Tuesday, Thursday 10:00am-11:15am ECSS 2.410"
        ),
        "Instructor(s):": "Ada Lovelace ・ Primary Instructor ・ ada@example.edu",
    });
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(format!("{name}.json")), document.to_string()).unwrap();
}

fn write_profiles(dir: &Path, count: usize) {
    let profile = json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "profile_uri": "https://example.edu/ada",
    });
    let profiles = Value::Array(vec![profile; count]);
    fs::write(dir.join("Profiles.json"), profiles.to_string()).unwrap();
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn seed(input: &Path) {
    let reqs = "Prerequisite: MATH 2413 with a grade of C or better.";
    write_section(&input.join("23F"), "1001", "CS1337.001.23F", "000061", "23F", reqs);
    write_section(&input.join("23F"), "1002", "MATH2413.001.23F", "000042", "23F", "");
    // Spring 2024 belongs to the 2023 catalog.
    write_section(&input.join("24S"), "1003", "CS1337.002.24S", "000061", "24S", reqs);
    // Spring 2023 belongs to the 2022 catalog.
    write_section(&input.join("23S"), "1004", "CS1337.001.23S", "000061", "23S", reqs);
}

#[test]
fn writes_linked_records_with_parsed_requisites() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input");
    let output = tmp.path().join("output");
    seed(&input);
    write_profiles(&input, 1);
    fs::write(input.join("notes.json"), "not a document").unwrap();

    let summary = ingest::run(&Options {
        input: input.clone(),
        output: output.clone(),
        ..Options::default()
    })
    .unwrap();

    assert_eq!(summary.courses, 3);
    assert_eq!(summary.sections, 4);
    assert_eq!(summary.professors, 1);
    assert_eq!(summary.skipped_documents, 1);

    let courses = read(&output.join("Courses.json"));
    let courses = courses.as_array().unwrap();
    let cs: Vec<&Value> = courses
        .iter()
        .filter(|course| course["subject_prefix"] == "CS")
        .collect();
    assert_eq!(cs.len(), 2);
    for course in &cs {
        assert_eq!(course["prerequisites"]["type"], "collection");
        assert_eq!(course["prerequisites"]["required"], 1);
        let prerequisite = &course["prerequisites"]["options"][0];
        assert_eq!(prerequisite["type"], "course");
        assert_eq!(prerequisite["class_reference"], "000042");
        assert_eq!(prerequisite["minimum_grade"], "C");
    }
    let catalog_23 = cs.iter().find(|course| course["catalog_year"] == "23").unwrap();
    assert_eq!(catalog_23["sections"].as_array().unwrap().len(), 2);

    let professors = read(&output.join("Professors.json"));
    assert_eq!(professors[0]["profile_uri"], "https://example.edu/ada");
    assert_eq!(professors[0]["sections"].as_array().unwrap().len(), 4);
}

#[test]
fn duplicate_profiles_fail_validation_unless_skipped() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input");
    let output = tmp.path().join("output");
    seed(&input);
    write_profiles(&input, 2);

    let mut options = Options {
        input,
        output: output.clone(),
        ..Options::default()
    };
    let error = ingest::run(&options).unwrap_err();
    let error = error.downcast_ref::<ValidationError>().unwrap();
    assert!(matches!(
        error.issues.as_slice(),
        [ValidationIssue::DuplicateProfessor { .. }]
    ));
    assert!(!output.exists());

    options.skip_validation = true;
    let summary = ingest::run(&options).unwrap();
    assert_eq!(summary.professors, 2);
    assert!(output.join("Sections.json").exists());
}

#[test]
fn config_in_input_directory_is_applied() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input");
    let output = tmp.path().join("output");
    write_section(
        &input,
        "1001",
        "CS1337.001.23F",
        "000061",
        "23F",
        "Prerequisite: MATH 2413.",
    );
    write_section(&input, "1002", "MATH2413.001.23F", "000042", "23F", "");
    fs::write(
        input.join("config.toml"),
        "_version = \"1\"\ndefault_minimum_grade = \"d-\"\npretty_output = false\n",
    )
    .unwrap();

    ingest::run(&Options {
        input,
        output: output.clone(),
        ..Options::default()
    })
    .unwrap();

    let text = fs::read_to_string(output.join("Courses.json")).unwrap();
    assert_eq!(text.lines().count(), 1);
    let courses: Value = serde_json::from_str(&text).unwrap();
    let cs = courses
        .as_array()
        .unwrap()
        .iter()
        .find(|course| course["subject_prefix"] == "CS")
        .unwrap();
    assert_eq!(cs["prerequisites"]["options"][0]["minimum_grade"], "D-");
}
