//! Pagination links for listing pages.

use url::form_urlencoded;
use vibe_commerce_core::Page;

/// A numbered page link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Previous/next and numbered links for a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub previous: Option<String>,
    pub next: Option<String>,
    pub links: Vec<PageLink>,
}

impl Pagination {
    /// Links for `page`, or `None` when everything fits on one page.
    ///
    /// `href` builds the URL of a page number and must carry any active
    /// filters along.
    pub fn for_page<T>(page: &Page<T>, href: impl Fn(u32) -> String) -> Option<Self> {
        if page.total_pages <= 1 {
            return None;
        }

        Some(Self {
            previous: page.has_previous().then(|| href(page.previous_page())),
            next: page.has_next().then(|| href(page.next_page())),
            links: page
                .page_numbers()
                .into_iter()
                .map(|number| PageLink {
                    number,
                    href: href(number),
                    current: number == page.page,
                })
                .collect(),
        })
    }
}

/// Build `path?query` from non-empty pairs.
#[must_use]
pub fn listing_href<'a>(path: &str, pairs: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if !value.is_empty() {
            query.append_pair(key, &value);
        }
    }
    let query = query.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_has_no_links() {
        let page = Page::new(vec![1, 2, 3], 1, None);
        assert!(Pagination::for_page(&page, |n| n.to_string()).is_none());
    }

    #[test]
    fn test_middle_page_links() {
        let page = Page::new(vec![()], 2, Some(3));
        let pagination =
            Pagination::for_page(&page, |n| format!("/products?page={n}")).unwrap();

        assert_eq!(pagination.previous.as_deref(), Some("/products?page=1"));
        assert_eq!(pagination.next.as_deref(), Some("/products?page=3"));
        let current: Vec<u32> = pagination
            .links
            .iter()
            .filter(|link| link.current)
            .map(|link| link.number)
            .collect();
        assert_eq!(current, vec![2]);
        assert_eq!(pagination.links.len(), 3);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = Page::new(vec![()], 3, Some(3));
        let pagination = Pagination::for_page(&page, |n| n.to_string()).unwrap();
        assert!(pagination.next.is_none());
        assert_eq!(pagination.previous.as_deref(), Some("2"));
    }

    #[test]
    fn test_out_of_range_page_links_stay_in_range() {
        let page: Page<()> = Page::new(vec![], 40, Some(30));
        let pagination = Pagination::for_page(&page, |n| n.to_string()).unwrap();

        assert!(pagination.next.is_none());
        assert_eq!(pagination.previous.as_deref(), Some("29"));
        assert_eq!(pagination.links.len(), 7);
        assert!(pagination.links.iter().all(|link| link.number <= 30));
        assert_eq!(
            pagination.links.iter().find(|link| link.current).map(|link| link.number),
            Some(30)
        );
    }

    #[test]
    fn test_listing_href_skips_empty_values() {
        assert_eq!(
            listing_href(
                "/products",
                [
                    ("search", "blue mug".to_string()),
                    ("category", String::new()),
                    ("page", "2".to_string()),
                ]
            ),
            "/products?search=blue+mug&page=2"
        );
        assert_eq!(listing_href("/orders", []), "/orders");
    }
}
