use serde::{Deserialize, Serialize};

pub const PER_PAGE_DEFAULT: u32 = 10;
pub const PER_PAGE_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Clamp to sane bounds: page >= 1, per_page in 1..=100.
    pub fn normalize(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(PER_PAGE_DEFAULT).clamp(1, PER_PAGE_MAX);
        (page, per_page)
    }

    pub fn offset(&self) -> u32 {
        let (page, per_page) = self.normalize();
        (page - 1) * per_page
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl<T> Paginated<T> {
    pub fn total_pages(&self) -> u32 {
        let per_page = self.per_page.max(1);
        ((self.total.max(0) as u64).div_ceil(per_page as u64)) as u32
    }
}

/// Page through an already-fetched list, for views that paginate client-side.
pub fn paginate_local<T: Clone>(items: &[T], query: PageQuery) -> Paginated<T> {
    let (page, per_page) = query.normalize();
    let offset = query.offset() as usize;
    let data = items
        .iter()
        .skip(offset)
        .take(per_page as usize)
        .cloned()
        .collect();

    Paginated {
        data,
        page,
        per_page,
        total: items.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_applies_defaults_and_bounds() {
        let q = PageQuery::default();
        assert_eq!(q.normalize(), (1, PER_PAGE_DEFAULT));

        let q = PageQuery {
            page: Some(0),
            per_page: Some(10_000),
        };
        assert_eq!(q.normalize(), (1, PER_PAGE_MAX));
        assert_eq!(q.offset(), 0);

        let q = PageQuery {
            page: Some(3),
            per_page: Some(20),
        };
        assert_eq!(q.offset(), 40);
    }

    #[test]
    fn local_pagination_slices_and_counts() {
        let items: Vec<u32> = (0..23).collect();
        let page = paginate_local(
            &items,
            PageQuery {
                page: Some(3),
                per_page: Some(10),
            },
        );
        assert_eq!(page.data, vec![20, 21, 22]);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages(), 3);

        let past_end = paginate_local(
            &items,
            PageQuery {
                page: Some(9),
                per_page: Some(10),
            },
        );
        assert!(past_end.data.is_empty());
    }
}
