use fleet_docs::{
    action::Action,
    mode::Mode,
    table::{PageRequest, SortDirection},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("\"NextPage\"", Action::NextPage)]
#[case("\"LastPage\"", Action::LastPage)]
#[case("\"CycleSortColumn\"", Action::CycleSortColumn)]
#[case("\"ToggleFilterPanel\"", Action::ToggleFilterPanel)]
#[case(r#"{"SwitchMode": "Filter"}"#, Action::SwitchMode(Mode::Filter))]
fn test_actions_read_from_keybinding_values(#[case] raw: &str, #[case] expected: Action) {
    assert_eq!(serde_json::from_str::<Action>(raw).unwrap(), expected);
}

#[test]
fn test_action_display_uses_variant_names() {
    let request = PageRequest {
        page: 2,
        page_size: 10,
        sort_column: None,
        sort_direction: SortDirection::Ascending,
        search_queries: Default::default(),
    };
    assert_eq!(Action::FetchPage(request.clone()).to_string(), "FetchPage");
    assert_eq!(Action::PageLoaded(request, vec![], 0).to_string(), "PageLoaded");
    assert_eq!(Action::Quit.to_string(), "Quit");
}

#[test]
fn test_page_request_wire_shape() {
    let request = PageRequest {
        page: 3,
        page_size: 25,
        sort_column: Some("uploadedAt".to_string()),
        sort_direction: SortDirection::Descending,
        search_queries: [("fileName".to_string(), "invoice".to_string())].into_iter().collect(),
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({
            "page": 3,
            "page_size": 25,
            "sort_column": "uploadedAt",
            "sort_direction": "descending",
            "search_queries": {"fileName": "invoice"},
        })
    );
}

#[test]
fn test_lowercase_modes_are_accepted() {
    assert_eq!(serde_json::from_str::<Mode>("\"search\"").unwrap(), Mode::Search);
    assert_eq!(serde_json::from_str::<Mode>("\"Home\"").unwrap(), Mode::Home);
}
