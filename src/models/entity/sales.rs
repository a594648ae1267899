use serde::{Deserialize, Serialize};

use super::ReportRecord;
use crate::models::{ReportKind, SalesFilter};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: u32,
    pub product: String,
    pub sales: u32,
    pub profit: i64,
}

impl SalesRecord {
    pub fn new(id: u32, product: &str, sales: u32, profit: i64) -> Self {
        Self {
            id,
            product: product.to_string(),
            sales,
            profit,
        }
    }
}

impl ReportRecord for SalesRecord {
    const KIND: ReportKind = ReportKind::Sales;
    type Filter = SalesFilter;
    const ECHO_FILTERS: bool = true;

    fn id(&self) -> u32 {
        self.id
    }

    // 日期仅回显，不参与筛选
    fn matches(&self, _filter: &SalesFilter) -> bool {
        true
    }

    fn record_limit(filter: &SalesFilter) -> Option<usize> {
        filter.record_limit()
    }

    fn translatable_fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![("product", &mut self.product)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_type_limits_record_count() {
        let fourth = SalesRecord::new(4, "Product D", 45, 900);
        for report_type in ["weekly", "monthly", "yearly", "daily"] {
            assert!(fourth.matches(&SalesFilter::new(None, report_type)));
        }

        assert_eq!(SalesRecord::record_limit(&SalesFilter::new(None, "weekly")), Some(3));
        assert_eq!(SalesRecord::record_limit(&SalesFilter::new(None, "monthly")), Some(5));
        assert_eq!(SalesRecord::record_limit(&SalesFilter::new(None, "yearly")), None);
        assert_eq!(SalesRecord::record_limit(&SalesFilter::new(None, "daily")), None);
    }
}
