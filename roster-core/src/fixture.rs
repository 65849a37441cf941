//! # Fixture Sheets
//!
//! A printable listing of the entrants of a single pool. The entrants are split into two halves
//! (the first half gets the extra entrant for odd counts) which are printed side by side, spread
//! over 1, 2 or 4 pages depending on the number of entrants. Every page carries a caption with
//! the page number and, if given, the weight category of the pool.
use crate::utils::NumExt;

use std::ops::Range;

/// The maximum number of entrants printed on a single page.
pub const SINGLE_PAGE_MAX: usize = 25;
/// The maximum number of entrants printed on two pages. Larger pools use four pages.
pub const DOUBLE_PAGE_MAX: usize = 50;

/// The maximum length of a spreadsheet tab name.
const SHEET_NAME_MAX: usize = 31;

#[derive(Clone, Debug)]
pub struct FixtureSheet<'a, T> {
    pages: Vec<Page<'a, T>>,
}

impl<'a, T> FixtureSheet<'a, T> {
    /// Creates the `FixtureSheet` for the given `entrants` of a single pool, keeping their order.
    pub fn new(entrants: &'a [T]) -> Self {
        Self::build(entrants, None)
    }

    /// Creates the `FixtureSheet` for the given `entrants`, captioning every page with the weight
    /// `category`.
    pub fn new_with_category<C>(entrants: &'a [T], category: C) -> Self
    where
        C: Into<String>,
    {
        Self::build(entrants, Some(category.into()))
    }

    fn build(entrants: &'a [T], category: Option<String>) -> Self {
        if entrants.is_empty() {
            log::info!("No entrants to generate a fixture sheet for");

            return Self { pages: Vec::new() };
        }

        let num_pages = num_pages(entrants.len());
        let (first, second) = entrants.split_at(entrants.len().upper_half());

        log::debug!(
            "Creating fixture sheet for {} entrants on {} pages",
            entrants.len(),
            num_pages
        );

        let pages = (0..num_pages)
            .map(|index| Page {
                number: index + 1,
                total: num_pages,
                category: category.clone(),
                halves: [
                    lines(first, chunk(first.len(), num_pages, index)),
                    lines(second, chunk(second.len(), num_pages, index)),
                ],
            })
            .collect();

        Self { pages }
    }

    #[inline]
    pub fn pages(&self) -> &[Page<'a, T>] {
        &self.pages
    }

    #[inline]
    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }
}

/// A single printed page of a [`FixtureSheet`].
#[derive(Clone, Debug)]
pub struct Page<'a, T> {
    number: usize,
    total: usize,
    category: Option<String>,
    halves: [Vec<Line<'a, T>>; 2],
}

impl<'a, T> Page<'a, T> {
    /// Returns the number of this page. The first page is `1`.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the weight category printed on this page.
    #[inline]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the header line of this page, e.g. `Page 1 of 2 | Wt: Over 87kg`.
    pub fn caption(&self) -> String {
        match &self.category {
            Some(category) => format!("Page {} of {} | Wt: {}", self.number, self.total, category),
            None => format!("Page {} of {}", self.number, self.total),
        }
    }

    /// Returns the lines of both halves of the pool on this page.
    #[inline]
    pub fn halves(&self) -> &[Vec<Line<'a, T>>; 2] {
        &self.halves
    }
}

#[derive(Debug)]
pub struct Line<'a, T> {
    /// The 1-based serial number within the half. Serial numbers continue across pages.
    pub serial: usize,
    pub entrant: &'a T,
}

impl<'a, T> Clone for Line<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Line<'a, T> {}

/// Returns the number of pages used for `len` entrants.
pub fn num_pages(len: usize) -> usize {
    if len <= SINGLE_PAGE_MAX {
        1
    } else if len <= DOUBLE_PAGE_MAX {
        2
    } else {
        4
    }
}

/// Returns the spreadsheet tab name of the pool with the given `name`.
///
/// # Examples
///
/// ```
/// # use roster_core::fixture::sheet_name;
/// assert_eq!(sheet_name("Pool 1"), "Pool_1");
/// ```
pub fn sheet_name(name: &str) -> String {
    name.replace(' ', "_").chars().take(SHEET_NAME_MAX).collect()
}

/// Returns the range of a half of length `len` printed on the page `index`.
fn chunk(len: usize, num_pages: usize, index: usize) -> Range<usize> {
    let size = (len + num_pages - 1) / num_pages;

    let start = (index * size).min(len);
    let end = (start + size).min(len);
    start..end
}

fn lines<T>(half: &[T], range: Range<usize>) -> Vec<Line<'_, T>> {
    let start = range.start;

    half[range]
        .iter()
        .enumerate()
        .map(|(offset, entrant)| Line {
            serial: start + offset + 1,
            entrant,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{num_pages, sheet_name, FixtureSheet, Page};

    fn serials<T>(page: &Page<'_, T>, half: usize) -> Vec<usize> {
        page.halves()[half].iter().map(|line| line.serial).collect()
    }

    #[test]
    fn test_num_pages() {
        assert_eq!(num_pages(1), 1);
        assert_eq!(num_pages(25), 1);
        assert_eq!(num_pages(26), 2);
        assert_eq!(num_pages(50), 2);
        assert_eq!(num_pages(51), 4);
    }

    #[test]
    fn test_fixture_sheet_empty() {
        let sheet = FixtureSheet::<u32>::new(&[]);

        assert_eq!(sheet.num_pages(), 0);
    }

    #[test]
    fn test_fixture_sheet_single_page() {
        let entrants: Vec<u32> = (0..5).collect();
        let sheet = FixtureSheet::new(&entrants);

        assert_eq!(sheet.num_pages(), 1);

        let page = &sheet.pages()[0];
        assert_eq!(page.number(), 1);
        assert_eq!(page.category(), None);
        assert_eq!(page.caption(), "Page 1 of 1");
        assert_eq!(serials(page, 0), [1, 2, 3]);
        assert_eq!(serials(page, 1), [1, 2]);
        assert_eq!(*page.halves()[0][0].entrant, 0);
        assert_eq!(*page.halves()[1][0].entrant, 3);
    }

    #[test]
    fn test_fixture_sheet_two_pages() {
        let entrants: Vec<u32> = (0..30).collect();
        let sheet = FixtureSheet::new(&entrants);

        assert_eq!(sheet.num_pages(), 2);
        assert_eq!(serials(&sheet.pages()[0], 0), (1..=8).collect::<Vec<_>>());
        assert_eq!(serials(&sheet.pages()[1], 0), (9..=15).collect::<Vec<_>>());
        assert_eq!(serials(&sheet.pages()[1], 1), (9..=15).collect::<Vec<_>>());

        assert_eq!(*sheet.pages()[1].halves()[0][0].entrant, 8);
        assert_eq!(*sheet.pages()[0].halves()[1][0].entrant, 15);
    }

    #[test]
    fn test_fixture_sheet_four_pages() {
        let entrants: Vec<u32> = (0..55).collect();
        let sheet = FixtureSheet::new(&entrants);

        assert_eq!(sheet.num_pages(), 4);

        for page in sheet.pages() {
            assert_eq!(page.halves()[0].len(), 7);
        }

        let last = &sheet.pages()[3];
        assert_eq!(last.number(), 4);
        assert_eq!(serials(last, 1), (22..=27).collect::<Vec<_>>());
        assert_eq!(*last.halves()[1][5].entrant, 54);

        let total: usize = sheet
            .pages()
            .iter()
            .map(|page| page.halves()[0].len() + page.halves()[1].len())
            .sum();
        assert_eq!(total, 55);
    }

    #[test]
    fn test_fixture_sheet_short_half() {
        // 51 entrants: the second half of 25 entrants only fills 4 pages with chunks of 7.
        let entrants: Vec<u32> = (0..51).collect();
        let sheet = FixtureSheet::new(&entrants);

        let lens: Vec<usize> = sheet
            .pages()
            .iter()
            .map(|page| page.halves()[1].len())
            .collect();
        assert_eq!(lens, [7, 7, 7, 4]);
    }

    #[test]
    fn test_fixture_sheet_category() {
        let entrants: Vec<u32> = (0..30).collect();
        let sheet = FixtureSheet::new_with_category(&entrants, "Over 87kg");

        let captions: Vec<String> = sheet.pages().iter().map(|page| page.caption()).collect();
        assert_eq!(
            captions,
            ["Page 1 of 2 | Wt: Over 87kg", "Page 2 of 2 | Wt: Over 87kg"]
        );
        assert_eq!(sheet.pages()[1].category(), Some("Over 87kg"));
    }

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name("Pool 1"), "Pool_1");
        assert_eq!(
            sheet_name("Under 80kg Boys Sub Junior Pool 12"),
            "Under_80kg_Boys_Sub_Junior_Pool"
        );
    }
}
