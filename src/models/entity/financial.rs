use serde::{Deserialize, Serialize};

use super::ReportRecord;
use crate::models::{NoFilter, ReportKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: u32,
    pub category: String,
    pub amount: i64,
    pub change: String,
}

impl FinancialRecord {
    pub fn new(id: u32, category: &str, amount: i64, change: &str) -> Self {
        Self {
            id,
            category: category.to_string(),
            amount,
            change: change.to_string(),
        }
    }
}

impl ReportRecord for FinancialRecord {
    const KIND: ReportKind = ReportKind::Financial;
    type Filter = NoFilter;
    const ECHO_FILTERS: bool = false;

    fn id(&self) -> u32 {
        self.id
    }

    fn matches(&self, _filter: &NoFilter) -> bool {
        true
    }

    fn translatable_fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![("category", &mut self.category)]
    }
}
