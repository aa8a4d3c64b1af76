//! Grouping and pagination of a sorted result list.
//!
//! Layout never reruns a search: it slices the sorted matches into the requested
//! render window and groups consecutive entries of the same category.

use crate::config::Settings;
use crate::search::MatchResult;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// A pagination link: where the window starts and whether replacements apply.
///
/// Links are encoded as `"{start}_{replace}"` class tokens, e.g. `"14_true"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub start: usize,
    pub replace: bool,
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.start, self.replace)
    }
}

/// Error returned for a malformed pagination class token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid page link '{0}', expected '<start>_<true|false>'")]
pub struct ParsePageLinkError(String);

impl FromStr for PageLink {
    type Err = ParsePageLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePageLinkError(s.to_string());
        let (start, replace) = s.trim().split_once('_').ok_or_else(err)?;
        Ok(Self {
            start: start.parse().map_err(|_| err())?,
            replace: replace.parse().map_err(|_| err())?,
        })
    }
}

/// Split `len` results into consecutive pages.
///
/// Without a page size everything is one page. No results yield no pages.
pub fn paginate(len: usize, page_size: Option<usize>) -> Vec<Range<usize>> {
    match page_size.filter(|size| *size > 0) {
        Some(size) => (0..len)
            .step_by(size)
            .map(|start| start..(start + size).min(len))
            .collect(),
        None if len > 0 => vec![0..len],
        None => Vec::new(),
    }
}

/// One rendered result and whether it sits behind the "show more" toggle.
#[derive(Debug, Clone, Copy)]
pub struct GroupEntry<'a> {
    pub result: &'a MatchResult,
    pub collapsed: bool,
}

/// Consecutive results of one category within the render window.
#[derive(Debug, Clone)]
pub struct ResultGroup<'a> {
    /// `None` when grouping is disabled
    pub category: Option<&'a str>,
    pub entries: Vec<GroupEntry<'a>>,
    /// Index of the first collapsed entry, where the toggle is placed
    pub toggle_at: Option<usize>,
}

impl ResultGroup<'_> {
    pub fn hidden_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.collapsed).count()
    }
}

/// An element of the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerItem {
    Prev(PageLink),
    /// The current page, 1-based
    Current(usize),
    /// Another page, 1-based
    Page { number: usize, link: PageLink },
    Next(PageLink),
}

/// Pagination bar of a result list longer than one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    /// Current page, 0-based
    pub page: usize,
    pub pages: usize,
    pub items: Vec<PagerItem>,
}

/// The render window of a result list.
#[derive(Debug, Clone)]
pub struct PageLayout<'a> {
    pub total: usize,
    pub groups: Vec<ResultGroup<'a>>,
    pub pager: Option<Pager>,
}

impl<'a> PageLayout<'a> {
    /// The first result in the window, the target of the Enter key.
    pub fn first(&self) -> Option<&'a MatchResult> {
        self.groups
            .first()
            .and_then(|group| group.entries.first())
            .map(|entry| entry.result)
    }

    pub fn visible_len(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }
}

/// Group the window `[start, start + page size)` of the sorted matches.
pub fn layout_page<'a>(
    matches: &'a [MatchResult],
    start: usize,
    replace: bool,
    settings: &Settings,
) -> PageLayout<'a> {
    let page_size = settings.page_size();
    let window = match page_size {
        Some(size) => {
            let start = start.min(matches.len());
            &matches[start..(start + size).min(matches.len())]
        }
        None => matches,
    };

    let groups = if settings.enable_grouping {
        window
            .chunk_by(|a, b| a.category == b.category)
            .map(|chunk| {
                group(
                    Some(chunk[0].category.as_str()),
                    chunk,
                    settings.max_results_per_group,
                )
            })
            .collect()
    } else if window.is_empty() {
        Vec::new()
    } else {
        vec![group(None, window, usize::MAX)]
    };

    let pager = page_size
        .filter(|size| matches.len() > *size)
        .map(|size| pager(matches.len(), size, start, replace));

    PageLayout {
        total: matches.len(),
        groups,
        pager,
    }
}

/// Cap a group: entries past `max` are collapsed behind a toggle.
fn group<'a>(category: Option<&'a str>, chunk: &'a [MatchResult], max: usize) -> ResultGroup<'a> {
    let toggle_at = (chunk.len() > max).then_some(max);
    let entries = chunk
        .iter()
        .enumerate()
        .map(|(index, result)| GroupEntry {
            result,
            collapsed: toggle_at.is_some_and(|at| index >= at),
        })
        .collect();

    ResultGroup {
        category,
        entries,
        toggle_at,
    }
}

fn pager(len: usize, size: usize, start: usize, replace: bool) -> Pager {
    let pages = len.div_ceil(size);
    let page = start / size;
    let link = |start| PageLink { start, replace };
    let mut items = Vec::new();

    if start > 0 {
        items.push(PagerItem::Prev(link(start.saturating_sub(size))));
    }

    // Near the start the first three pages; later on every remaining page.
    let numbers = if page <= 2 { 0..pages.min(3) } else { page..pages };
    for f in numbers {
        if f == page {
            items.push(PagerItem::Current(f + 1));
        } else {
            items.push(PagerItem::Page {
                number: f + 1,
                link: link(f * size),
            });
        }
    }

    if page + 1 < pages {
        items.push(PagerItem::Next(link(start + size)));
    }

    Pager { page, pages, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Highlight;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn results(categories: &[&str]) -> Vec<MatchResult> {
        categories
            .iter()
            .enumerate()
            .map(|(position, category)| MatchResult {
                score: 1.0,
                title: format!("Entry{}", position),
                text: String::new(),
                location: format!("entry{}.html", position),
                category: (*category).to_string(),
                highlight: Highlight::None,
                position,
            })
            .collect()
    }

    fn settings(per_page: i64) -> Settings {
        Settings {
            num_elements_per_page: per_page,
            ..Settings::default()
        }
    }

    #[test]
    fn twenty_three_results_in_pages_of_seven() {
        let pages = paginate(23, Some(7));
        let sizes: Vec<usize> = pages.iter().map(ExactSizeIterator::len).collect();
        check!(sizes == vec![7, 7, 7, 2]);
        let all: Vec<usize> = pages.into_iter().flatten().collect();
        check!(all == (0..23).collect::<Vec<_>>());
    }

    #[rstest]
    #[case(0, None, 0)]
    #[case(5, None, 1)]
    #[case(5, Some(0), 1)]
    #[case(14, Some(7), 2)]
    fn page_counts(#[case] len: usize, #[case] size: Option<usize>, #[case] expected: usize) {
        check!(paginate(len, size).len() == expected);
    }

    #[rstest]
    #[case("14_true", PageLink { start: 14, replace: true })]
    #[case("0_false", PageLink { start: 0, replace: false })]
    fn page_link_round_trip(#[case] token: &str, #[case] link: PageLink) {
        check!(token.parse::<PageLink>() == Ok(link));
        check!(link.to_string() == token);
    }

    #[rstest]
    #[case("")]
    #[case("7")]
    #[case("x_true")]
    #[case("7_maybe")]
    fn malformed_page_links(#[case] token: &str) {
        check!(token.parse::<PageLink>().is_err());
    }

    #[test]
    fn groups_consecutive_categories() {
        let matches = results(&["class", "class", "function"]);
        let layout = layout_page(&matches, 0, true, &settings(7));

        check!(layout.groups.len() == 2);
        check!(layout.groups[0].category == Some("class"));
        check!(layout.groups[0].entries.len() == 2);
        check!(layout.groups[1].category == Some("function"));
        check!(layout.groups[1].entries.len() == 1);
        check!(layout.pager.is_none());
        check!(layout.first().map(|m| m.position) == Some(0));
    }

    #[test]
    fn overflow_of_two_is_collapsed() {
        let matches = results(&["class"; 7]);
        let layout = layout_page(&matches, 0, true, &settings(-1));
        let group = &layout.groups[0];

        check!(group.toggle_at == Some(5));
        check!(group.hidden_count() == 2);
        check!(!group.entries[4].collapsed);
        check!(group.entries[5].collapsed);
    }

    #[test]
    fn single_overflow_is_collapsed() {
        let matches = results(&["class"; 6]);
        let layout = layout_page(&matches, 0, true, &settings(-1));
        check!(layout.groups[0].toggle_at == Some(5));
        check!(layout.groups[0].hidden_count() == 1);
        check!(layout.groups[0].entries[5].collapsed);
    }

    #[test]
    fn full_group_has_no_toggle() {
        let matches = results(&["class"; 5]);
        let layout = layout_page(&matches, 0, true, &settings(-1));
        check!(layout.groups[0].toggle_at.is_none());
        check!(layout.groups[0].hidden_count() == 0);
    }

    #[test]
    fn ungrouped_layout_has_no_headers_or_cap() {
        let matches = results(&["class"; 9]);
        let settings = Settings {
            enable_grouping: false,
            ..settings(-1)
        };
        let layout = layout_page(&matches, 0, true, &settings);
        check!(layout.groups.len() == 1);
        check!(layout.groups[0].category.is_none());
        check!(layout.groups[0].hidden_count() == 0);
    }

    #[test]
    fn window_shifts_without_rescoring() {
        let matches = results(&["class"; 23]);
        let layout = layout_page(&matches, 21, true, &settings(7));
        check!(layout.visible_len() == 2);
        check!(layout.first().map(|m| m.position) == Some(21));
        check!(layout.total == 23);
    }

    #[test]
    fn first_page_pager() {
        let matches = results(&["class"; 23]);
        let layout = layout_page(&matches, 0, true, &settings(7));
        let_assert!(Some(pager) = layout.pager);

        check!(pager.pages == 4);
        check!(
            pager.items
                == vec![
                    PagerItem::Current(1),
                    PagerItem::Page { number: 2, link: PageLink { start: 7, replace: true } },
                    PagerItem::Page { number: 3, link: PageLink { start: 14, replace: true } },
                    PagerItem::Next(PageLink { start: 7, replace: true }),
                ]
        );
    }

    #[test]
    fn later_pages_list_the_rest() {
        let matches = results(&["class"; 70]);
        let layout = layout_page(&matches, 21, true, &settings(7));
        let_assert!(Some(pager) = layout.pager);

        check!(pager.page == 3);
        check!(pager.items.first() == Some(&PagerItem::Prev(PageLink { start: 14, replace: true })));
        check!(pager.items[1] == PagerItem::Current(4));
        let numbers: Vec<usize> = pager
            .items
            .iter()
            .filter_map(|item| match item {
                PagerItem::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        check!(numbers == vec![5, 6, 7, 8, 9, 10]);
        check!(pager.items.last() == Some(&PagerItem::Next(PageLink { start: 28, replace: true })));
    }

    #[test]
    fn last_page_pager() {
        let matches = results(&["class"; 40]);
        let layout = layout_page(&matches, 35, false, &settings(7));
        let_assert!(Some(pager) = layout.pager);

        check!(pager.page == 5);
        check!(
            pager.items
                == vec![
                    PagerItem::Prev(PageLink { start: 28, replace: false }),
                    PagerItem::Current(6),
                ]
        );
    }
}
