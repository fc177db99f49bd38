use fleet_docs::{
    action::Action,
    components::documents::Documents,
    mode::Mode,
    table::{DataMode, PageRequest},
};
use pretty_assertions::assert_eq;

use crate::test_utils::{
    fixtures::{sample_documents, test_config},
    ComponentTestHarness, EventBuilder,
};

fn loaded_harness() -> ComponentTestHarness<Documents> {
    let mut harness = ComponentTestHarness::new(Documents::new()).unwrap().with_config(test_config()).unwrap();
    harness.update(Action::DocumentsLoaded(sample_documents(), 12)).unwrap();
    harness
}

fn delegated_harness() -> ComponentTestHarness<Documents> {
    let mut harness = ComponentTestHarness::new(Documents::new()).unwrap().with_config(test_config()).unwrap();
    harness.update(Action::DocumentsLoaded(vec![], 60_000)).unwrap();
    harness
}

fn fetches(actions: &[Action]) -> Vec<PageRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::FetchPage(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

fn first_name(harness: &mut ComponentTestHarness<Documents>) -> String {
    harness.component.table.render().displayed_items[0].text("fileName")
}

#[test]
fn test_small_collections_stay_local() {
    let mut harness = loaded_harness();

    assert_eq!(harness.component.data_mode(), DataMode::Local);
    assert_eq!(harness.component.table.current_page(), 1);
    assert_eq!(harness.component.table.page_count(), 3);
    assert_eq!(harness.component.visible_rows(), 5);
    assert!(fetches(&harness.collect_actions()).is_empty());
}

#[test]
fn test_paging_is_clamped_to_the_page_count() {
    let mut harness = loaded_harness();

    harness.update(Action::LastPage).unwrap();
    assert_eq!(harness.component.table.current_page(), 3);
    harness.update(Action::NextPage).unwrap();
    assert_eq!(harness.component.table.current_page(), 3);
    assert_eq!(harness.component.visible_rows(), 2);

    harness.update(Action::FirstPage).unwrap();
    harness.update(Action::PrevPage).unwrap();
    assert_eq!(harness.component.table.current_page(), 1);

    let pages: Vec<usize> = harness
        .collect_actions()
        .into_iter()
        .filter_map(|a| match a {
            Action::PageChanged(page) => Some(page),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![3, 1]);
}

#[test]
fn test_typing_a_search_returns_to_the_first_page() {
    let mut harness = loaded_harness();
    harness.update(Action::NextPage).unwrap();
    assert_eq!(harness.component.table.current_page(), 2);

    harness.update(Action::StartSearch).unwrap();
    assert_eq!(harness.component.mode, Mode::Search);

    harness.send_keys(EventBuilder::new().keys("inv")).unwrap();
    assert_eq!(harness.component.table.current_page(), 2);
    harness.update(Action::Tick).unwrap();
    assert_eq!(harness.component.table.current_page(), 1);
    assert_eq!(harness.component.table.total_filtered_records(), 3);
    assert!(harness.collect_actions().contains(&Action::PageChanged(1)));

    harness.send_keys(EventBuilder::new().enter()).unwrap();
    assert_eq!(harness.component.mode, Mode::Home);
    assert_eq!(harness.component.table.search_queries().get("fileName").map(String::as_str), Some("inv"));
}

#[test]
fn test_search_typed_and_deleted_keeps_the_page() {
    let mut harness = loaded_harness();
    harness.update(Action::LastPage).unwrap();
    harness.update(Action::StartSearch).unwrap();

    harness.send_keys(EventBuilder::new().key('x').backspace()).unwrap();
    assert_eq!(harness.component.table.current_page(), 3);

    harness.update(Action::Tick).unwrap();
    harness.send_keys(EventBuilder::new().enter()).unwrap();
    assert_eq!(harness.component.table.current_page(), 3);
    assert_eq!(harness.component.visible_rows(), 2);
}

#[test]
fn test_frames_drawn_mid_search_keep_the_page() {
    let mut harness = loaded_harness();
    harness.update(Action::LastPage).unwrap();
    harness.update(Action::StartSearch).unwrap();

    harness.send_keys(EventBuilder::new().key('x')).unwrap();
    harness.render().unwrap();
    harness.send_keys(EventBuilder::new().backspace()).unwrap();
    harness.update(Action::Tick).unwrap();

    assert_eq!(harness.component.table.current_page(), 3);
}

#[test]
fn test_escape_in_search_drops_the_query() {
    let mut harness = loaded_harness();
    harness.update(Action::StartSearch).unwrap();
    harness.send_keys(EventBuilder::new().keys("scan").backspace().backspace()).unwrap();
    assert_eq!(harness.component.search_input, "sc");
    assert_eq!(harness.component.table.total_filtered_records(), 9);

    harness.send_keys(EventBuilder::new().esc()).unwrap();
    assert_eq!(harness.component.mode, Mode::Home);
    assert!(harness.component.table.search_queries().is_empty());
    assert_eq!(harness.component.table.total_filtered_records(), 12);
}

#[test]
fn test_sorting_follows_the_focused_column() {
    let mut harness = loaded_harness();
    harness.update(Action::ColumnRight).unwrap();
    assert_eq!(harness.component.focused_column().as_deref(), Some("size"));

    harness.update(Action::CycleSortColumn).unwrap();
    assert_eq!(first_name(&mut harness), "scan-11.doc");

    harness.update(Action::ToggleSortDirection).unwrap();
    assert_eq!(first_name(&mut harness), "invoice-00.pdf");

    harness.update(Action::ClearSort).unwrap();
    assert_eq!(harness.component.table.sort_column(), None);
}

#[test]
fn test_filter_panel_toggles_statuses_and_types() {
    let mut harness = loaded_harness();
    harness.update(Action::ToggleFilterPanel).unwrap();
    assert_eq!(harness.component.mode, Mode::Filter);

    harness.send_keys(EventBuilder::new().key('a')).unwrap();
    assert_eq!(harness.component.table.total_filtered_records(), 4);

    harness.send_keys(EventBuilder::new().key('3')).unwrap();
    assert_eq!(harness.component.table.total_filtered_records(), 1);

    harness.send_keys(EventBuilder::new().key('c')).unwrap();
    assert_eq!(harness.component.table.filter_criteria(), None);
    assert_eq!(harness.component.table.total_filtered_records(), 12);

    harness.send_keys(EventBuilder::new().esc()).unwrap();
    assert_eq!(harness.component.mode, Mode::Home);
}

#[test]
fn test_filter_panel_date_bounds() {
    let mut harness = loaded_harness();
    harness.update(Action::ToggleFilterPanel).unwrap();

    harness.send_keys(EventBuilder::new().key('f').keys("03/05/2024").enter()).unwrap();
    assert_eq!(harness.component.table.total_filtered_records(), 8);

    harness.send_keys(EventBuilder::new().key('t').keys("03-06-2024").enter()).unwrap();
    assert_eq!(harness.component.table.total_filtered_records(), 2);

    harness.send_keys(EventBuilder::new().key('t').keys("13-45-2024").enter()).unwrap();
    assert!(harness.component.error_message.as_deref().is_some_and(|m| m.contains("13-45-2024")));
    assert_eq!(harness.component.table.total_filtered_records(), 2);

    harness.send_keys(EventBuilder::new().esc()).unwrap();
    assert_eq!(harness.component.error_message, None);
    assert_eq!(harness.component.mode, Mode::Filter);
}

#[test]
fn test_large_collections_fetch_pages() {
    let mut harness = delegated_harness();
    assert_eq!(harness.component.data_mode(), DataMode::Delegated);

    let requests = fetches(&harness.collect_actions());
    assert_eq!(requests.len(), 1);
    assert_eq!((requests[0].page, requests[0].page_size), (1, 5));

    let page: Vec<_> = sample_documents().into_iter().take(5).collect();
    harness.update(Action::PageLoaded(requests[0].clone(), page, 60_000)).unwrap();
    assert_eq!(harness.component.visible_rows(), 5);
    assert_eq!(harness.component.table.page_count(), 12_000);

    harness.update(Action::NextPage).unwrap();
    let requests = fetches(&harness.collect_actions());
    assert_eq!(requests.iter().map(|r| r.page).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_reloading_a_delegated_collection_refetches_the_page() {
    let mut harness = delegated_harness();
    let first = fetches(&harness.collect_actions()).remove(0);
    let page: Vec<_> = sample_documents().into_iter().take(5).collect();
    harness.update(Action::PageLoaded(first.clone(), page, 60_000)).unwrap();

    harness.update(Action::DocumentsLoaded(vec![], 60_000)).unwrap();

    let requests = fetches(&harness.collect_actions());
    assert_eq!(requests, vec![first.clone()]);

    let page: Vec<_> = sample_documents().into_iter().take(5).collect();
    harness.update(Action::PageLoaded(first, page, 60_000)).unwrap();
    assert_eq!(harness.component.visible_rows(), 5);
}

#[test]
fn test_stale_pages_are_discarded() {
    let mut harness = delegated_harness();
    let first = fetches(&harness.collect_actions()).remove(0);

    harness.update(Action::NextPage).unwrap();
    let second = fetches(&harness.collect_actions()).remove(0);

    let fresh: Vec<_> = sample_documents().into_iter().skip(5).take(5).collect();
    harness.update(Action::PageLoaded(second, fresh, 60_000)).unwrap();
    let stale: Vec<_> = sample_documents().into_iter().take(5).collect();
    harness.update(Action::PageLoaded(first, stale, 60_000)).unwrap();

    assert_eq!(first_name(&mut harness), "scan-05.png");
}

#[test]
fn test_search_on_a_later_delegated_page_fetches_page_one_once() {
    let mut harness = delegated_harness();
    harness.update(Action::LastPage).unwrap();
    harness.collect_actions();

    harness.update(Action::StartSearch).unwrap();
    harness.send_keys(EventBuilder::new().key('x')).unwrap();
    assert!(fetches(&harness.collect_actions()).is_empty());
    harness.update(Action::Tick).unwrap();

    let requests = fetches(&harness.collect_actions());
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].page, 1);
    assert_eq!(requests[0].search_queries.get("fileName").map(String::as_str), Some("x"));
}

#[test]
fn test_errors_are_shown_until_dismissed() {
    let mut harness = loaded_harness();
    harness.update(Action::Error("database is locked".to_string())).unwrap();
    assert!(harness.render().unwrap().contains("database is locked"));

    harness.send_keys(EventBuilder::new().esc()).unwrap();
    assert_eq!(harness.component.error_message, None);
}
