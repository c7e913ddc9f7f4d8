//! Windowed page list for the listings templates.
//!
//! The backend answers with Laravel-style `current_page`/`last_page`
//! numbers; this module turns them into the `1 .. 4 5 [6] 7 8 .. 20`
//! shape the pagination partial renders, with `None` marking a gap.

use serde::Serialize;

fn page_window(
    last_page: usize,
    current_page: usize,
    edge: usize,
    around: usize,
) -> Vec<Option<usize>> {
    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(around));
    let mid_end = (current_page + around + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub last_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, last_page: usize) -> Self {
        let page = current_page.max(1);
        let pages = page_window(last_page, page, 1, 2);

        Self {
            items,
            pages,
            page,
            last_page,
            has_prev: page > 1,
            has_next: page < last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_list_has_no_gaps() {
        let paginated = Paginated::new(vec![0; 4], 2, 4);
        assert_eq!(
            paginated.pages,
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
        assert!(paginated.has_prev);
        assert!(paginated.has_next);
    }

    #[test]
    fn long_list_elides_middle() {
        let paginated = Paginated::new(vec![0; 10], 10, 20);
        assert!(paginated.pages.contains(&None));
        assert!(paginated.pages.contains(&Some(10)));
        assert_eq!(paginated.pages.first(), Some(&Some(1)));
        assert_eq!(paginated.pages.last(), Some(&Some(20)));
    }

    #[test]
    fn zero_pages_renders_nothing() {
        let paginated = Paginated::new(Vec::<u8>::new(), 1, 0);
        assert!(paginated.pages.is_empty());
        assert!(!paginated.has_next);
    }
}
