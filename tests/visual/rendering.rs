use fleet_docs::{action::Action, components::documents::Documents};
use crate::test_utils::{
    fixtures::{sample_documents, test_config},
    ComponentTestHarness, EventBuilder,
};

fn harness() -> ComponentTestHarness<Documents> {
    ComponentTestHarness::new(Documents::new().with_source_name("documents.json"))
        .unwrap()
        .with_config(test_config())
        .unwrap()
}

fn status_line(harness: &ComponentTestHarness<Documents>) -> String {
    harness.get_buffer_content().last().cloned().unwrap_or_default()
}

#[test]
fn test_first_page_of_a_local_collection() {
    let mut harness = harness();
    harness.update(Action::DocumentsLoaded(sample_documents(), 12)).unwrap();
    let screen = harness.render().unwrap();

    assert!(screen.contains("Fleet Documents - documents.json"));
    assert!(screen.contains("Press / to search the focused column"));
    for column in ["fileName", "size", "status", "contentType", "uploadedAt"] {
        assert!(screen.contains(column), "missing header {column}");
    }
    assert!(screen.contains("invoice-00.pdf"));
    assert!(screen.contains("invoice-04.pdf"));
    assert!(!screen.contains("scan-05.png"));
    insta::assert_snapshot!(status_line(&harness), @"Page 1/3 · 12 records · local");
}

#[test]
fn test_sorted_header_shows_its_direction() {
    let mut harness = harness();
    harness.update(Action::DocumentsLoaded(sample_documents(), 12)).unwrap();
    harness.update(Action::ColumnRight).unwrap();
    harness.update(Action::CycleSortColumn).unwrap();
    assert!(harness.render().unwrap().contains("size ▲"));

    harness.update(Action::ToggleSortDirection).unwrap();
    let screen = harness.render().unwrap();
    assert!(screen.contains("size ▼"));
    assert!(!screen.contains("size ▲"));
}

#[test]
fn test_search_line_echoes_the_query() {
    let mut harness = harness();
    harness.update(Action::DocumentsLoaded(sample_documents(), 12)).unwrap();
    harness.update(Action::StartSearch).unwrap();
    harness.send_keys(EventBuilder::new().keys("inv")).unwrap();

    let screen = harness.render().unwrap();
    assert!(screen.contains("Search fileName: inv_"));
    insta::assert_snapshot!(status_line(&harness), @"Page 1/1 · 3 records · local");

    harness.send_keys(EventBuilder::new().enter()).unwrap();
    assert!(harness.render().unwrap().contains("fileName: inv"));
}

#[test]
fn test_empty_results_and_loading_messages() {
    let mut harness = harness();
    harness.update(Action::LoadDocuments).unwrap();
    let screen = harness.render().unwrap();
    assert!(screen.contains("Loading documents..."));
    assert!(status_line(&harness).ends_with("· loading..."));

    harness.update(Action::DocumentsLoaded(sample_documents(), 12)).unwrap();
    harness.update(Action::StartSearch).unwrap();
    harness.send_keys(EventBuilder::new().keys("zzz")).unwrap();
    assert!(harness.render().unwrap().contains("No documents match the current search."));
}

#[test]
fn test_filter_panel_shows_checked_boxes() {
    let mut harness = harness();
    harness.update(Action::DocumentsLoaded(sample_documents(), 12)).unwrap();
    harness.update(Action::ToggleFilterPanel).unwrap();
    harness.send_keys(EventBuilder::new().key('r').key('1')).unwrap();

    let screen = harness.render().unwrap();
    assert!(screen.contains("Filters"));
    assert!(screen.contains("[x] Rejected (r)"));
    assert!(screen.contains("[ ] Approved (a)"));
    assert!(screen.contains("[x] PNG (1)"));
    assert!(screen.contains("From (f): any"));
    assert!(!screen.contains("Paging on the server"));
}

#[test]
fn test_filter_panel_warns_when_paging_is_delegated() {
    let mut harness = harness();
    harness.update(Action::DocumentsLoaded(vec![], 60_000)).unwrap();
    harness.update(Action::ToggleFilterPanel).unwrap();

    let screen = harness.render().unwrap();
    assert!(screen.contains("Paging on the server: filters"));
    insta::assert_snapshot!(status_line(&harness), @"Page 1/12000 · 60000 records · server");
}

#[test]
fn test_help_popup_opens_and_closes() {
    let mut harness = harness();
    harness.update(Action::DocumentsLoaded(sample_documents(), 12)).unwrap();
    harness.update(Action::Help).unwrap();
    assert!(harness.render().unwrap().contains("Help - Press ? or Esc to close"));

    harness.send_keys(EventBuilder::new().esc()).unwrap();
    assert!(!harness.component.show_help);
    assert!(!harness.render().unwrap().contains("Help - Press ? or Esc to close"));
}
