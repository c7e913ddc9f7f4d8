use actix_web_flash_messages::Level;
use wanderstay::filters::query::parse_query;
use wanderstay::pagination::Paginated;
use wanderstay::routes::{alert_level_to_str, page_links, page_url};

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[test]
fn page_urls_change_only_the_page() {
    let query = "search=Lisbon&page=2&utm_source=mail";
    let filters = parse_query(query);

    let url = page_url(query, &filters, 3);
    assert!(url.starts_with("/houses?"));
    assert!(url.contains("page=3"));
    assert!(url.contains("search=Lisbon"));
    assert!(url.contains("utm_source=mail"));

    // Page 1 is the sentinel and disappears from the query entirely.
    let url = page_url(query, &filters, 1);
    assert!(!url.contains("page="));
}

#[test]
fn page_links_mark_the_current_page() {
    let query = "search=Lisbon&page=2";
    let filters = parse_query(query);
    let paginated = Paginated::new(vec![0u8; 10], 2, 3);

    let links = page_links(&paginated, query, &filters);
    let current: Vec<usize> = links
        .iter()
        .filter(|link| link.current)
        .filter_map(|link| link.page)
        .collect();
    assert_eq!(current, vec![2]);
}
