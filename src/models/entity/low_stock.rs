use serde::{Deserialize, Serialize};

use super::ReportRecord;
use crate::models::{NoFilter, ReportKind};

/// 低库存预警，`current` 低于 `minimum`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockRecord {
    pub id: u32,
    pub name: String,
    pub current: u32,
    pub minimum: u32,
}

impl LowStockRecord {
    pub fn new(id: u32, name: &str, current: u32, minimum: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            current,
            minimum,
        }
    }
}

impl ReportRecord for LowStockRecord {
    const KIND: ReportKind = ReportKind::LowStock;
    type Filter = NoFilter;
    const ECHO_FILTERS: bool = false;

    fn id(&self) -> u32 {
        self.id
    }

    fn matches(&self, _filter: &NoFilter) -> bool {
        true
    }

    fn translatable_fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![("name", &mut self.name)]
    }
}
