use serde_json::json;
use sortable_table::{
    Align, ClassScheme, Controller, HeaderDescriptor, MemoryReporter, Model, Row, Severity,
    SortPolicy, TableConfig, TableError, TableEvent, TableInput, TableUI,
};

const HEADERS: &str = include_str!("fixtures/headers.json");
const ITEMS: &str = include_str!("fixtures/items.json");

fn load(config: TableConfig) -> (Model, TableUI, MemoryReporter) {
    let reporter = MemoryReporter::new();
    let ui = TableUI::new(&config);
    let mut model = Model::with_reporter(config, reporter.clone());
    model.set_headers(TableInput::raw(HEADERS)).unwrap();
    model.set_items(TableInput::raw(ITEMS)).unwrap();
    (model, ui, reporter)
}

fn names(model: &Model) -> Vec<String> {
    model
        .visible_rows()
        .map(|row| row["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn renders_one_cell_per_header_and_row() {
    let (model, ui, _) = load(TableConfig::default());
    let html = ui.draw(&model);

    assert_eq!(model.column_count(), 4);
    assert_eq!(model.row_count(), 5);
    assert_eq!(html.matches("<th ").count(), 4);
    assert_eq!(html.matches("<tr>").count(), 6);
    assert_eq!(html.matches("<td").count(), 20);
    assert!(html.starts_with(
        "<table class=\"mdl-data-table mdl-js-data-table mdl-shadow--4dp \
         mdl-data-table--selectable\">"
    ));
}

#[test]
fn case_insensitive_example() {
    let mut model = Model::with_reporter(TableConfig::default(), MemoryReporter::new());
    model
        .set_headers(vec![
            HeaderDescriptor::new("name", "Name")
                .sortable(true)
                .align(Align::Left),
        ])
        .unwrap();
    let rows: Vec<Row> =
        serde_json::from_value(json!([{"name": "Bob"}, {"name": "alice"}])).unwrap();
    model.set_items(rows).unwrap();

    model.set_sort_column("name").unwrap();
    model.set_sort_ascending(true).unwrap();
    assert_eq!(names(&model), ["alice", "Bob"]);

    model.set_sort_ascending(false).unwrap();
    assert_eq!(names(&model), ["Bob", "alice"]);
}

#[test]
fn sorting_is_idempotent() {
    let (mut model, _, _) = load(TableConfig::default());
    model.set_sort_column("team").unwrap();
    model.set_sort_ascending(false).unwrap();
    let first = names(&model);

    model.set_sort_column("team").unwrap();
    model.set_sort_ascending(false).unwrap();
    assert_eq!(names(&model), first);
    assert_eq!(first, ["Dave", "Bob", "Eve", "carol", "alice"]);
}

#[test]
fn toggling_twice_restores_first_sort() {
    let (mut model, _, _) = load(TableConfig::default());
    model.click_header(1).unwrap();
    let first = names(&model);
    assert_eq!(first, ["alice", "carol", "Eve", "Bob", "Dave"]);

    model.click_header(1).unwrap();
    assert_eq!(names(&model), ["Dave", "Bob", "Eve", "carol", "alice"]);
    model.click_header(1).unwrap();
    assert_eq!(names(&model), first);
}

#[test]
fn numbers_sort_as_text() {
    let (mut model, _, _) = load(TableConfig::default());
    model.set_sort_column("score").unwrap();
    assert_eq!(names(&model), ["Eve", "Bob", "Dave", "alice", "carol"]);
}

#[test]
fn descending_comparator_keeps_ties_in_load_order() {
    let (mut model, _, _) = load(TableConfig::default().policy(SortPolicy::DescendingComparator));
    model.set_sort_column("team").unwrap();
    model.set_sort_ascending(false).unwrap();
    assert_eq!(names(&model), ["Bob", "Dave", "Eve", "alice", "carol"]);
}

#[test]
fn non_sortable_header_click_changes_nothing() {
    let (mut model, ui, _) = load(TableConfig::default());
    model.set_sort_column("name").unwrap();
    let before = ui.draw(&model);

    model.click_header(3).unwrap();
    assert_eq!(model.sort_column(), Some("name"));
    assert_eq!(ui.draw(&model), before);
}

#[test]
fn malformed_input_keeps_previous_render() {
    let (mut model, ui, reporter) = load(TableConfig::default());
    model.set_sort_column("name").unwrap();
    let before = ui.draw(&model);

    assert!(model.set_headers(TableInput::raw("[{\"value\": \"name\",")).is_err());
    assert!(model.set_items(TableInput::raw("\"not a list\"")).is_err());
    assert_eq!(ui.draw(&model), before);

    let diagnostics = reporter.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
    assert_eq!(diagnostics[1].message, "items: items must be a sequence");
}

#[test]
fn missing_keys_render_empty_cells() {
    let (mut model, ui, _) = load(TableConfig::default());
    model.set_sort_column("name").unwrap();
    let html = ui.draw(&model);

    // alice has no notes and is the first row once sorted by name
    let first_row = html.split("<tbody>").nth(1).unwrap().split("</tr>").next().unwrap();
    assert!(first_row.contains("<td class=\"mdl-data-table__cell--non-numeric\">alice</td>"));
    assert!(first_row.contains("<td>7</td>"));
    assert!(first_row.ends_with("<td class=\"mdl-data-table__cell--non-numeric\"></td>\n    "));
    assert!(!html.contains("ignored"));
}

#[test]
fn unknown_sort_column_is_a_no_op() {
    let (mut model, ui, reporter) = load(TableConfig::default());
    model.set_sort_column("team").unwrap();
    let before = ui.draw(&model);

    let err = model.set_sort_column("rank").unwrap_err();
    assert!(matches!(err, TableError::UnknownSortColumn(ref c) if c == "rank"));
    assert_eq!(model.sort_column(), Some("rank"));
    assert_eq!(
        ui.draw(&model),
        before.replace(" mdl-data-table__header--sorted-ascending", "")
    );
    let diagnostics = reporter.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn active_header_carries_direction_marker() {
    let (mut model, ui, _) = load(TableConfig::default());
    model.set_sort_column("score").unwrap();
    model.set_sort_ascending(false).unwrap();
    let html = ui.draw(&model);

    assert!(html.contains(
        "<th class=\"mdc-data-table__header-cell--with-sort \
         mdl-data-table__header--sorted-descending\" \
         data-sortable=\"true\" data-column=\"score\">Score</th>"
    ));
    assert!(html.contains(
        "<th class=\"mdl-data-table__cell--non-numeric\" data-sortable=\"false\" \
         data-column=\"notes\">Notes</th>"
    ));
    assert_eq!(html.matches("sorted-").count(), 1);
}

#[test]
fn custom_class_scheme() {
    let classes = ClassScheme::default()
        .table("grid")
        .sortable_header("sortable")
        .non_numeric("text")
        .sorted_ascending("asc")
        .sorted_descending("desc");
    let (mut model, ui, _) = load(TableConfig::default().classes(classes));
    model.set_sort_column("name").unwrap();
    let html = ui.draw(&model);

    assert!(html.starts_with("<table class=\"grid\">"));
    assert!(html.contains(
        "<th class=\"sortable text asc\" data-sortable=\"true\" data-column=\"name\">"
    ));
    assert!(!html.contains("mdl-"));
}

#[test]
fn controller_routes_clicks_by_key() {
    let (mut model, _, _) = load(TableConfig::default());
    let controller = Controller::new();

    for key in ["team", "team"] {
        let message = controller
            .handle_event(&model, TableEvent::HeaderActivated(key.to_string()))
            .unwrap()
            .unwrap();
        model.update(message).unwrap();
    }
    assert_eq!(model.sort_column(), Some("team"));
    assert!(!model.sort_ascending());

    assert!(
        controller
            .handle_event(&model, TableEvent::HeaderActivated("rank".to_string()))
            .is_err()
    );
}
