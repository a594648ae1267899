use crate::error::{AppError, AppResult};
use crate::models::Pagination;

/// 已校验的分页请求，`page` 与 `page_size` 都不小于 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> AppResult<Self> {
        if page < 1 {
            return Err(AppError::validation("page must be a positive integer"));
        }
        if page_size < 1 {
            return Err(AppError::validation("pageSize must be a positive integer"));
        }
        Ok(Self { page, page_size })
    }

    /// 从查询参数解析，缺省值由调用方提供；`max_page_size` 为 `None` 时不限制页大小
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        default_page_size: u32,
        max_page_size: Option<u32>,
    ) -> AppResult<Self> {
        let page = parse_positive("page", page)?.unwrap_or(1);
        let page_size = parse_positive("pageSize", page_size)?.unwrap_or(default_page_size);
        if let Some(max_page_size) = max_page_size.filter(|max| page_size > *max) {
            return Err(AppError::validation(format!(
                "pageSize must not exceed {}",
                max_page_size
            )));
        }
        Self::new(page, page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 起始下标，溢出时返回 `None`
    fn start_index(&self) -> Option<usize> {
        (self.page as usize - 1).checked_mul(self.page_size as usize)
    }
}

fn parse_positive(name: &str, raw: Option<&str>) -> AppResult<Option<u32>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    match raw.parse::<i64>() {
        Ok(value) if value >= 1 => u32::try_from(value)
            .map(Some)
            .map_err(|_| AppError::validation(format!("{} is too large: {}", name, raw))),
        Ok(_) => Err(AppError::validation(format!(
            "{} must be a positive integer, got {}",
            name, raw
        ))),
        Err(_) => Err(AppError::validation(format!(
            "{} must be an integer, got '{}'",
            name, raw
        ))),
    }
}

/// 一页数据及分页元数据
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// 取 `[(page-1)*pageSize, page*pageSize)` 区间，超出范围返回空页
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let page_size = request.page_size() as usize;
    let total_pages = total_items.div_ceil(page_size);

    let items = match request.start_index() {
        Some(start) if start < total_items => {
            items.into_iter().skip(start).take(page_size).collect()
        }
        _ => Vec::new(),
    };

    Page {
        items,
        pagination: Pagination {
            current_page: request.page(),
            page_size: request.page_size(),
            total_items,
            total_pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u32, page_size: u32) -> PageRequest {
        PageRequest::new(page, page_size).unwrap()
    }

    #[test]
    fn first_and_last_page_of_twelve() {
        let items: Vec<u32> = (1..=12).collect();

        let first = paginate(items.clone(), request(1, 10));
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(
            first.pagination,
            Pagination { current_page: 1, page_size: 10, total_items: 12, total_pages: 2 }
        );

        let second = paginate(items, request(2, 10));
        assert_eq!(second.items, vec![11, 12]);
        assert_eq!(second.pagination.total_items, 12);
        assert_eq!(second.pagination.total_pages, 2);
    }

    #[test]
    fn page_past_end_is_empty() {
        let page = paginate((1..=5).collect::<Vec<u32>>(), request(4, 2));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_items, 5);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let page = paginate(Vec::<u32>::new(), request(1, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_items, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn slice_length_matches_formula() {
        for len in [0usize, 1, 7, 10, 23, 150] {
            for page_size in [1u32, 3, 10, 25] {
                for page in 1u32..=8 {
                    let items: Vec<usize> = (0..len).collect();
                    let result = paginate(items, request(page, page_size));

                    let offset = (page as usize - 1) * page_size as usize;
                    let expected = (page_size as usize).min(len.saturating_sub(offset));
                    assert_eq!(result.items.len(), expected, "len={len} page={page} size={page_size}");
                    assert_eq!(result.pagination.total_pages, len.div_ceil(page_size as usize));
                    assert_eq!(result.pagination.total_pages == 0, len == 0);
                    if let Some(first) = result.items.first() {
                        assert_eq!(*first, offset);
                    }
                }
            }
        }
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let page = paginate((1..=3).collect::<Vec<u32>>(), request(u32::MAX, u32::MAX));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn zero_page_is_rejected() {
        assert!(matches!(PageRequest::new(0, 10), Err(AppError::Validation(_))));
        assert!(matches!(PageRequest::new(1, 0), Err(AppError::Validation(_))));
    }

    #[test]
    fn parse_applies_defaults() {
        let parsed = PageRequest::parse(None, Some(""), 10, None).unwrap();
        assert_eq!(parsed, request(1, 10));
    }

    #[test]
    fn page_size_is_unbounded_by_default() {
        let parsed = PageRequest::parse(None, Some("150"), 10, None).unwrap();
        assert_eq!(parsed, request(1, 150));
        let parsed = PageRequest::parse(None, Some("100000"), 10, None).unwrap();
        assert_eq!(parsed.page_size(), 100_000);
    }

    #[test]
    fn configured_cap_rejects_larger_page_size() {
        assert!(PageRequest::parse(None, Some("100"), 10, Some(100)).is_ok());
        assert!(matches!(
            PageRequest::parse(None, Some("101"), 10, Some(100)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_values() {
        for (page, size) in [
            (Some("0"), None),
            (Some("-3"), None),
            (Some("abc"), None),
            (Some("1.5"), None),
            (None, Some("0")),
            (Some("99999999999"), None),
        ] {
            let result = PageRequest::parse(page, size, 10, None);
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "page={page:?} size={size:?}"
            );
        }
    }
}
