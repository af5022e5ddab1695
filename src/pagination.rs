use serde::Serialize;

/// One entry of the page-control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageControl {
    /// Zero-based page index sent back on activation.
    pub index: u32,
    /// Whether an ellipsis separates this control from the previous one.
    pub gap_before: bool,
    /// The "you are here" control; rendered disabled.
    pub active: bool,
}

impl PageControl {
    /// 1-based label shown to the user.
    pub fn label(&self) -> u64 {
        u64::from(self.index) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PaginationWindow {
    controls: Vec<PageControl>,
}

impl PaginationWindow {
    /// Work out which page controls to offer for a result set.
    ///
    /// The window always holds the first and last page plus the neighbours of `page`,
    /// clipped to `[0, total / length]`. A `length` of zero is treated as one.
    pub fn compute(total: u64, length: u32, page: u32) -> PaginationWindow {
        let max_page = total / u64::from(length.max(1));
        let page = u64::from(page);

        let candidates = [
            Some(0),
            Some(max_page),
            page.checked_sub(1),
            Some(page),
            page.checked_add(1),
        ];
        let mut indices: Vec<u64> = candidates
            .into_iter()
            .flatten()
            .filter(|&i| i <= max_page)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let mut controls = Vec::with_capacity(indices.len());
        let mut prev: Option<u64> = None;
        for i in indices {
            // max_page can exceed u32 only if total does; such pages are not addressable.
            let Ok(index) = u32::try_from(i) else {
                break;
            };
            controls.push(PageControl {
                index,
                gap_before: prev.is_some_and(|p| i - p > 1),
                active: i == page,
            });
            prev = Some(i);
        }

        PaginationWindow { controls }
    }

    pub fn controls(&self) -> &[PageControl] {
        &self.controls
    }

    pub fn indices(&self) -> Vec<u32> {
        self.controls.iter().map(|c| c.index).collect()
    }

    pub fn active(&self) -> Option<&PageControl> {
        self.controls.iter().find(|c| c.active)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.controls.iter().any(|c| c.index == index)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl<'a> IntoIterator for &'a PaginationWindow {
    type Item = &'a PageControl;
    type IntoIter = std::slice::Iter<'a, PageControl>;

    fn into_iter(self) -> Self::IntoIter {
        self.controls.iter()
    }
}

#[test]
fn test_empty_result_set_has_single_active_control() {
    let window = PaginationWindow::compute(0, 8, 0);
    assert_eq!(window.indices(), vec![0]);
    let only = window.controls()[0];
    assert!(only.active);
    assert!(!only.gap_before);
    assert_eq!(only.label(), 1);
}

#[test]
fn test_middle_page_gets_gaps_on_both_sides() {
    let window = PaginationWindow::compute(100, 8, 5);
    assert_eq!(window.indices(), vec![0, 4, 5, 6, 12]);

    let gaps: Vec<u32> = window
        .controls()
        .iter()
        .filter(|c| c.gap_before)
        .map(|c| c.index)
        .collect();
    assert_eq!(gaps, vec![4, 12]);
    assert_eq!(window.active().map(|c| c.index), Some(5));

    let labels: Vec<u64> = window.controls().iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec![1, 5, 6, 7, 13]);
}

#[test]
fn test_window_edges() {
    {
        // First page: no negative neighbour, no gap before the next one.
        let window = PaginationWindow::compute(100, 8, 0);
        assert_eq!(window.indices(), vec![0, 1, 12]);
        assert!(!window.controls()[1].gap_before);
        assert!(window.controls()[2].gap_before);
    }
    {
        // Last page.
        let window = PaginationWindow::compute(100, 8, 12);
        assert_eq!(window.indices(), vec![0, 11, 12]);
        assert!(window.controls()[1].gap_before);
        assert!(window.controls()[2].active);
    }
    {
        // Neighbours touching the ends collapse without gaps.
        let window = PaginationWindow::compute(24, 8, 1);
        assert_eq!(window.indices(), vec![0, 1, 2, 3]);
        assert!(window.controls().iter().all(|c| !c.gap_before));
    }
    {
        // Exact multiple of the page length still yields a trailing page.
        let window = PaginationWindow::compute(16, 8, 0);
        assert_eq!(window.indices(), vec![0, 1, 2]);
    }
}

#[test]
fn test_stale_page_beyond_max_is_filtered() {
    let window = PaginationWindow::compute(10, 8, 7);
    assert_eq!(window.indices(), vec![0, 1]);
    assert!(window.active().is_none());
    assert!(!window.contains(7));
}

#[test]
fn test_zero_length_is_treated_as_one() {
    let window = PaginationWindow::compute(3, 0, 1);
    assert_eq!(window.indices(), vec![0, 1, 2, 3]);
}

#[test]
fn test_window_invariants_hold_across_inputs() {
    for total in 0..60u64 {
        for length in 1..10u32 {
            let max_page = (total / u64::from(length)) as u32;
            for page in 0..=max_page {
                let window = PaginationWindow::compute(total, length, page);
                let indices = window.indices();
                assert!(indices.iter().all(|&i| i <= max_page));
                assert!(indices.windows(2).all(|w| w[0] < w[1]));
                assert!(window.contains(page));
                assert_eq!(indices.first(), Some(&0));
                assert_eq!(indices.last(), Some(&max_page));
                for pair in window.controls().windows(2) {
                    assert_eq!(pair[1].gap_before, pair[1].index - pair[0].index > 1);
                }
                assert_eq!(window.controls().iter().filter(|c| c.active).count(), 1);
            }
        }
    }
}
