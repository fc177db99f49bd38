use fleet_docs::table::{DataMode, PageRequest, SortDirection, TableCallbacks, TableOptions, TableView};
use mockall::{mock, predicate::eq};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::fixtures::sample_documents;

mock! {
    pub Callbacks {}

    impl TableCallbacks for Callbacks {
        fn fetch_data(&mut self, request: &PageRequest);
        fn on_page_change(&mut self, page: usize);
    }
}

fn view_with(callbacks: MockCallbacks, page_size: usize) -> TableView<MockCallbacks> {
    TableView::new(TableOptions { items_per_page: page_size, ..Default::default() }, callbacks)
}

#[test]
fn test_sort_change_on_a_large_table_fetches_exactly_once() {
    let mut callbacks = MockCallbacks::new();
    callbacks.expect_on_page_change().never();
    callbacks
        .expect_fetch_data()
        .withf(|r| r.page == 1 && r.sort_column.is_none())
        .times(1)
        .return_const(());

    let mut view = view_with(callbacks, 10);
    view.set_rows(vec![], 60_000);
    assert_eq!(view.render().mode, DataMode::Delegated);
    view.callbacks_mut().checkpoint();

    view.callbacks_mut().expect_on_page_change().never();
    view.callbacks_mut()
        .expect_fetch_data()
        .withf(|r| {
            r.page == 1
                && r.page_size == 10
                && r.sort_column.as_deref() == Some("size")
                && r.sort_direction == SortDirection::Descending
        })
        .times(1)
        .return_const(());

    view.handle_sort("size", SortDirection::Descending);
    view.render();
    // Nothing changed since, so a second render is quiet.
    view.render();
    view.callbacks_mut().checkpoint();
}

#[test]
fn test_sort_change_on_a_later_page_resets_and_fetches_the_first_page() {
    let mut callbacks = MockCallbacks::new();
    callbacks.expect_fetch_data().times(2).return_const(());
    callbacks.expect_on_page_change().with(eq(3)).times(1).return_const(());

    let mut view = view_with(callbacks, 10);
    view.set_rows(vec![], 60_000);
    view.render();
    view.handle_page_change(3);
    view.render();
    view.callbacks_mut().checkpoint();

    view.callbacks_mut().expect_on_page_change().with(eq(1)).times(1).return_const(());
    view.callbacks_mut()
        .expect_fetch_data()
        .withf(|r| r.page == 1 && r.sort_column.as_deref() == Some("uploadedAt"))
        .times(1)
        .return_const(());

    view.handle_sort("uploadedAt", SortDirection::Ascending);
    let output = view.render();
    assert_eq!(output.current_page, 1);
}

#[test]
fn test_search_typed_and_cleared_between_renders_keeps_the_page() {
    let mut callbacks = MockCallbacks::new();
    callbacks.expect_fetch_data().never();
    callbacks.expect_on_page_change().with(eq(3)).times(1).return_const(());

    let mut view = view_with(callbacks, 5);
    view.set_rows(sample_documents(), 12);
    view.render();
    view.handle_page_change(3);
    view.render();

    view.set_search_query("fileName", "x");
    view.set_search_query("fileName", "");
    let output = view.render();

    assert_eq!(output.current_page, 3);
    assert_eq!(output.displayed_items.len(), 2);
}

#[test]
fn test_whitespace_only_search_is_not_a_change() {
    let mut callbacks = MockCallbacks::new();
    callbacks.expect_fetch_data().never();
    callbacks.expect_on_page_change().with(eq(2)).times(1).return_const(());

    let mut view = view_with(callbacks, 5);
    view.set_rows(sample_documents(), 12);
    view.render();
    view.handle_page_change(2);
    view.set_search_query("status", "   ");
    assert_eq!(view.render().current_page, 2);
}

#[test]
fn test_first_render_never_resets_the_page() {
    let mut callbacks = MockCallbacks::new();
    callbacks.expect_fetch_data().never();
    callbacks.expect_on_page_change().with(eq(2)).times(1).return_const(());

    let mut view = view_with(callbacks, 5);
    view.set_rows(sample_documents(), 12);
    view.set_search_query("fileName", "scan");
    view.handle_page_change(2);

    let output = view.render();
    assert_eq!(output.current_page, 2);
    assert_eq!(output.total_filtered_records, 9);
}

#[rstest]
#[case(0, DataMode::Local)]
#[case(49_999, DataMode::Local)]
#[case(50_000, DataMode::Delegated)]
#[case(1_000_000, DataMode::Delegated)]
fn test_mode_follows_the_record_count(#[case] total: usize, #[case] expected: DataMode) {
    let mut callbacks = MockCallbacks::new();
    let fetches: usize = if expected == DataMode::Delegated { 1 } else { 0 };
    callbacks.expect_fetch_data().times(fetches).return_const(());
    callbacks.expect_on_page_change().never();

    let mut view = view_with(callbacks, 10);
    view.set_rows(vec![], total);
    assert_eq!(view.render().mode, expected);
}

#[test]
fn test_every_delegated_page_change_fetches_with_the_current_query() {
    let mut callbacks = MockCallbacks::new();
    callbacks.expect_on_page_change().return_const(());
    callbacks.expect_fetch_data().withf(|r| r.page == 1).times(1).return_const(());
    callbacks
        .expect_fetch_data()
        .withf(|r| {
            r.page == 2
                && r.page_size == 25
                && r.search_queries.get("fileName").map(String::as_str) == Some("invoice")
                && r.sort_column.is_none()
                && r.sort_direction == SortDirection::Ascending
        })
        .times(1)
        .return_const(());
    callbacks.expect_fetch_data().withf(|r| r.page == 7).times(1).return_const(());

    let mut view = view_with(callbacks, 25);
    view.set_rows(vec![], 75_000);
    view.set_search_query("fileName", "invoice");
    view.render();
    view.handle_page_change(2);
    view.render();
    view.handle_page_change(7);
    view.render();

    assert_eq!(view.last_request().map(|r| r.page), Some(7));
}

#[test]
fn test_local_mode_filters_sorts_and_pages() {
    let mut callbacks = MockCallbacks::new();
    callbacks.expect_fetch_data().never();

    let mut view = view_with(callbacks, 5);
    view.set_rows(sample_documents(), 12);
    view.set_search_query("fileName", "INVOICE");
    view.handle_sort("size", SortDirection::Ascending);

    let output = view.render();
    let names: Vec<String> = output.displayed_items.iter().map(|r| r.text("fileName")).collect();
    assert_eq!(names, vec!["invoice-08.pdf", "invoice-04.pdf", "invoice-00.pdf"]);
    assert_eq!(output.total_filtered_records, 3);
    assert_eq!(view.page_count(), 1);
}
