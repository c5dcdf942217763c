use contracts::shared::listing::PaginationInfo;

/// Number of page buttons shown at once
pub const PAGE_WINDOW: u32 = 5;

/// What the pagination bar needs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub is_prev_disabled: bool,
    pub is_next_disabled: bool,
    /// Consecutive page numbers, at most [`PAGE_WINDOW`] wide
    pub page_window: Vec<u32>,
    /// False when there is a single page (or none): the bar is hidden
    pub show_controls: bool,
}

/// Total page count of either pagination form.
///
/// Page-count payloads derive it from `total / limit` when `limit` is known
/// and fall back to the server's `totalPages`; raw-count payloads divide by
/// `page_size`.
pub fn total_pages(pagination: &PaginationInfo, page_size: u32) -> u32 {
    match pagination {
        PaginationInfo::PageCount(p) if p.limit > 0 => ceil_div(p.total, p.limit as u64),
        PaginationInfo::PageCount(p) => p.total_pages,
        PaginationInfo::RawCount { count } => ceil_div(*count, page_size.max(1) as u64),
    }
}

fn ceil_div(total: u64, size: u64) -> u32 {
    let pages = total.div_ceil(size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn compute_view(pagination: &PaginationInfo, current_page: u32, page_size: u32) -> PaginationView {
    let total = total_pages(pagination, page_size);
    if total <= 1 {
        return PaginationView {
            current_page: 1,
            total_pages: total,
            is_prev_disabled: true,
            is_next_disabled: true,
            page_window: vec![1],
            show_controls: false,
        };
    }

    // страница из URL может быть любой, кнопки строятся только от существующей
    let current = current_page.clamp(1, total);

    let is_next_disabled = match pagination {
        PaginationInfo::RawCount { count } => {
            current as u64 * page_size.max(1) as u64 >= *count
        }
        PaginationInfo::PageCount(_) => current >= total,
    };

    PaginationView {
        current_page: current,
        total_pages: total,
        is_prev_disabled: current <= 1,
        is_next_disabled,
        page_window: page_window(current, total),
        show_controls: true,
    }
}

/// Window centred on `current`, shifted at the edges to stay full width.
fn page_window(current: u32, total: u32) -> Vec<u32> {
    let half = PAGE_WINDOW / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total);
    if end - start + 1 < PAGE_WINDOW {
        start = (end + 1).saturating_sub(PAGE_WINDOW).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::listing::PageCountPagination;

    fn pages(total_pages: u32) -> PaginationInfo {
        PaginationInfo::PageCount(PageCountPagination {
            page: 1,
            limit: 0,
            total: 0,
            total_pages,
        })
    }

    #[test]
    fn test_window_at_start() {
        let view = compute_view(&pages(20), 1, 10);
        assert_eq!(view.page_window, vec![1, 2, 3, 4, 5]);
        assert!(view.is_prev_disabled);
        assert!(!view.is_next_disabled);
    }

    #[test]
    fn test_window_at_end() {
        let view = compute_view(&pages(20), 20, 10);
        assert_eq!(view.page_window, vec![16, 17, 18, 19, 20]);
        assert!(view.is_next_disabled);
        assert!(!view.is_prev_disabled);
    }

    #[test]
    fn test_window_in_middle() {
        assert_eq!(compute_view(&pages(20), 10, 10).page_window, vec![8, 9, 10, 11, 12]);
        assert_eq!(compute_view(&pages(20), 2, 10).page_window, vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_view(&pages(20), 19, 10).page_window, vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_window_narrower_than_five() {
        assert_eq!(compute_view(&pages(3), 2, 10).page_window, vec![1, 2, 3]);
    }

    #[test]
    fn test_single_page_hides_controls() {
        for total in [0, 1] {
            let view = compute_view(&pages(total), 1, 10);
            assert_eq!(view.page_window, vec![1]);
            assert!(!view.show_controls);
            assert!(view.is_next_disabled);
            assert!(view.is_prev_disabled);
        }
    }

    #[test]
    fn test_total_pages_derived_from_total_and_limit() {
        let info = PaginationInfo::PageCount(PageCountPagination {
            page: 1,
            limit: 12,
            total: 25,
            total_pages: 99,
        });
        assert_eq!(total_pages(&info, 10), 3);
    }

    #[test]
    fn test_raw_count_form() {
        let info = PaginationInfo::RawCount { count: 25 };
        assert_eq!(total_pages(&info, 10), 3);

        let view = compute_view(&info, 2, 10);
        assert!(!view.is_next_disabled);
        let view = compute_view(&info, 3, 10);
        assert!(view.is_next_disabled);

        let exact = PaginationInfo::RawCount { count: 20 };
        assert!(compute_view(&exact, 2, 10).is_next_disabled);
    }

    #[test]
    fn test_out_of_range_page_is_clamped_in_window() {
        let view = compute_view(&pages(4), 9, 10);
        assert_eq!(view.page_window, vec![1, 2, 3, 4]);
        assert_eq!(view.current_page, 4);
        assert!(view.is_next_disabled);
    }

    #[test]
    fn test_huge_page_is_clamped_to_last() {
        let view = compute_view(&pages(20), u32::MAX, 10);
        assert_eq!(view.current_page, 20);
        assert_eq!(view.page_window, vec![16, 17, 18, 19, 20]);
        assert!(view.is_next_disabled);
        assert!(!view.is_prev_disabled);

        let raw = compute_view(&PaginationInfo::RawCount { count: 25 }, u32::MAX, 10);
        assert_eq!(raw.current_page, 3);
        assert!(raw.is_next_disabled);
    }
}
