use serde::{Deserialize, Serialize};

use super::ReportRecord;
use crate::models::{ReportKind, StockFilter};

/// 库存记录，`quantity` 每次读取都会重新生成
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: u32,
    pub name: String,
    pub quantity: u32,
    pub location: String,
}

impl ReportRecord for StockRecord {
    const KIND: ReportKind = ReportKind::Stock;
    type Filter = StockFilter;
    const ECHO_FILTERS: bool = true;

    fn id(&self) -> u32 {
        self.id
    }

    fn matches(&self, filter: &StockFilter) -> bool {
        filter.search_char.is_empty() || self.name.starts_with(&filter.search_char)
    }

    fn translatable_fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![("name", &mut self.name), ("location", &mut self.location)]
    }
}
