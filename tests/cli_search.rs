use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn base_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mps"));
    // Keep runs hermetic: never pick up a developer's config file.
    cmd.env("MPS_CONFIG", "/nonexistent/mps-config.toml");
    cmd
}

#[test]
fn geocode_berlin_prints_result_with_coordinates() {
    let mut cmd = base_cmd();
    cmd.arg("Berlin");
    cmd.assert()
        .success()
        .stdout(contains("1 result(s):"))
        .stdout(contains("Berlin, Germany"))
        .stdout(contains("(52.5200, 13.4050)"));
}

#[test]
fn unknown_place_reports_no_matches() {
    let mut cmd = base_cmd();
    cmd.arg("Atlantis");
    cmd.assert().success().stdout(contains("No matches."));
}

#[test]
fn empty_query_fails_without_searching() {
    let mut cmd = base_cmd();
    cmd.assert()
        .failure()
        .stderr(contains("query text is empty"));
}

#[test]
fn reverse_lookup_requires_coordinates() {
    let mut cmd = base_cmd();
    cmd.args(["--kind", "reverse"]);
    cmd.assert()
        .failure()
        .stderr(contains("--kind reverse requires --lat and --lon"));
}

#[test]
fn reverse_lookup_resolves_nearest_address() {
    let mut cmd = base_cmd();
    cmd.args(["--kind", "reverse", "--lat", "52.5218", "--lon", "13.4130"]);
    cmd.assert()
        .success()
        .stdout(contains("Alexanderplatz"));
}

#[test]
fn around_search_lists_category_matches() {
    let mut cmd = base_cmd();
    cmd.args(["restaurant", "--kind", "around", "--radius", "10000"]);
    cmd.assert()
        .success()
        .stdout(contains("Curry 36"))
        .stdout(contains("Cafe Einstein"));
}

#[test]
fn discover_marks_follow_up_links() {
    let mut cmd = base_cmd();
    cmd.args(["restaurant", "--kind", "discover", "--radius", "10000"]);
    cmd.assert()
        .success()
        .stdout(contains("(follow-up)"));
}

#[test]
fn bounded_geocode_excludes_places_outside_area() {
    let mut cmd = base_cmd();
    cmd.args(["Paris", "--bounded"]);
    cmd.assert()
        .success()
        .stdout(contains("No matches."))
        .stdout(predicate::str::contains("Paris, France").not());
}
