use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Cow;
use std::sync::Mutex;
use tracing::{debug, info};

use crate::models::{FinancialRecord, LowStockRecord, ReportRecord, SalesRecord, StockRecord};

const STOCK_ITEM_COUNT: u32 = 150;
const STOCK_MIN_QUANTITY: u32 = 10;
const STOCK_MAX_QUANTITY: u32 = 509;

/// 按报表类型读取原始数据
pub trait RecordSource<R: ReportRecord> {
    /// 按 id 升序返回记录
    fn records(&self) -> Cow<'_, [R]>;
}

/// 库存数量生成器
///
/// 未指定种子时每次读取使用线程随机数；指定种子时生成序列可复现，
/// 但同一个生成器的连续两次读取仍然不同。
pub struct StockGenerator {
    seeded: Option<Mutex<StdRng>>,
}

impl StockGenerator {
    pub fn random() -> Self {
        Self { seeded: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn generate(&self) -> Vec<StockRecord> {
        match &self.seeded {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                Self::build(&mut *rng)
            }
            None => Self::build(&mut rand::thread_rng()),
        }
    }

    fn build<G: Rng + ?Sized>(rng: &mut G) -> Vec<StockRecord> {
        (0..STOCK_ITEM_COUNT)
            .map(|i| StockRecord {
                id: i + 1,
                name: format!("Item {}{}", letter(i % 26), i / 26 + 1),
                quantity: rng.gen_range(STOCK_MIN_QUANTITY..=STOCK_MAX_QUANTITY),
                location: format!("Warehouse {}", letter(i % 3)),
            })
            .collect()
    }
}

fn letter(offset: u32) -> char {
    char::from(b'A' + offset as u8)
}

/// 报表数据仓库
///
/// 财务、销售、低库存数据在进程内构造一次；库存数据每次读取重新生成。
pub struct ReportStore {
    financial: Vec<FinancialRecord>,
    sales: Vec<SalesRecord>,
    low_stock: Vec<LowStockRecord>,
    stock: StockGenerator,
}

impl ReportStore {
    pub fn new(stock: StockGenerator) -> Self {
        let store = Self {
            financial: financial_fixtures(),
            sales: sales_fixtures(),
            low_stock: low_stock_fixtures(),
            stock,
        };
        info!(
            "报表数据初始化完成 - 财务: {}, 销售: {}, 低库存: {}, 库存: {} (动态生成)",
            store.financial.len(),
            store.sales.len(),
            store.low_stock.len(),
            STOCK_ITEM_COUNT
        );
        store
    }

    pub fn with_fixtures(
        financial: Vec<FinancialRecord>,
        sales: Vec<SalesRecord>,
        low_stock: Vec<LowStockRecord>,
        stock: StockGenerator,
    ) -> Self {
        Self {
            financial,
            sales,
            low_stock,
            stock,
        }
    }
}

impl RecordSource<FinancialRecord> for ReportStore {
    fn records(&self) -> Cow<'_, [FinancialRecord]> {
        Cow::Borrowed(&self.financial)
    }
}

impl RecordSource<SalesRecord> for ReportStore {
    fn records(&self) -> Cow<'_, [SalesRecord]> {
        Cow::Borrowed(&self.sales)
    }
}

impl RecordSource<LowStockRecord> for ReportStore {
    fn records(&self) -> Cow<'_, [LowStockRecord]> {
        Cow::Borrowed(&self.low_stock)
    }
}

impl RecordSource<StockRecord> for ReportStore {
    fn records(&self) -> Cow<'_, [StockRecord]> {
        let records = self.stock.generate();
        debug!("重新生成库存数据: {} 条", records.len());
        Cow::Owned(records)
    }
}

fn financial_fixtures() -> Vec<FinancialRecord> {
    vec![
        FinancialRecord::new(1, "Revenue", 45000, "+12%"),
        FinancialRecord::new(2, "Expenses", 28000, "-5%"),
        FinancialRecord::new(3, "Profit", 17000, "+18%"),
        FinancialRecord::new(4, "Cost of Goods Sold", 15000, "-3%"),
        FinancialRecord::new(5, "Operating Income", 12000, "+15%"),
        FinancialRecord::new(6, "Interest Expense", 800, "+2%"),
        FinancialRecord::new(7, "Tax Expense", 3500, "+8%"),
        FinancialRecord::new(8, "Net Income", 7700, "+22%"),
        FinancialRecord::new(9, "Depreciation", 1200, "+5%"),
        FinancialRecord::new(10, "Amortization", 600, "+3%"),
        FinancialRecord::new(11, "Research & Development", 2500, "+10%"),
        FinancialRecord::new(12, "Marketing Expenses", 3200, "-7%"),
    ]
}

fn sales_fixtures() -> Vec<SalesRecord> {
    vec![
        SalesRecord::new(1, "Product A", 120, 2400),
        SalesRecord::new(2, "Product B", 85, 1700),
        SalesRecord::new(3, "Product C", 65, 1300),
        SalesRecord::new(4, "Product D", 45, 900),
        SalesRecord::new(5, "Product E", 78, 1560),
        SalesRecord::new(6, "Product F", 92, 1840),
        SalesRecord::new(7, "Product G", 34, 680),
        SalesRecord::new(8, "Product H", 56, 1120),
    ]
}

fn low_stock_fixtures() -> Vec<LowStockRecord> {
    vec![
        LowStockRecord::new(1, "Critical Item X", 5, 20),
        LowStockRecord::new(2, "Critical Item Y", 8, 15),
        LowStockRecord::new(3, "Critical Item Z", 3, 10),
        LowStockRecord::new(4, "Essential Component A", 12, 25),
        LowStockRecord::new(5, "Essential Component B", 7, 18),
        LowStockRecord::new(6, "Key Material C", 4, 12),
        LowStockRecord::new(7, "Key Material D", 9, 22),
        LowStockRecord::new(8, "Vital Supply E", 6, 16),
        LowStockRecord::new(9, "Vital Supply F", 2, 14),
        LowStockRecord::new(10, "Important Part G", 11, 20),
        LowStockRecord::new(11, "Important Part H", 8, 19),
        LowStockRecord::new(12, "Necessary Item I", 5, 15),
        LowStockRecord::new(13, "Necessary Item J", 13, 24),
        LowStockRecord::new(14, "Required Component K", 7, 17),
        LowStockRecord::new(15, "Required Component L", 4, 13),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_ids_are_one_based_and_ordered() {
        let store = ReportStore::new(StockGenerator::seeded(7));
        let financial: Cow<'_, [FinancialRecord]> = store.records();
        let ids: Vec<u32> = financial.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());

        let low_stock: Cow<'_, [LowStockRecord]> = store.records();
        assert_eq!(low_stock.len(), 15);
        assert_eq!(low_stock[0].name, "Critical Item X");
    }

    #[test]
    fn stock_names_and_locations_follow_pattern() {
        let records = StockGenerator::seeded(1).generate();
        assert_eq!(records.len(), 150);
        assert_eq!(records[0].name, "Item A1");
        assert_eq!(records[25].name, "Item Z1");
        assert_eq!(records[26].name, "Item A2");
        assert_eq!(records[149].name, "Item T6");
        assert_eq!(records[0].location, "Warehouse A");
        assert_eq!(records[4].location, "Warehouse B");
        assert!(records
            .iter()
            .all(|r| (STOCK_MIN_QUANTITY..=STOCK_MAX_QUANTITY).contains(&r.quantity)));
    }

    #[test]
    fn same_seed_reproduces_quantities() {
        let first = StockGenerator::seeded(42).generate();
        let second = StockGenerator::seeded(42).generate();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_store_returns_empty_sequence() {
        let store = ReportStore::with_fixtures(vec![], vec![], vec![], StockGenerator::random());
        let sales: Cow<'_, [SalesRecord]> = store.records();
        assert!(sales.is_empty());
    }
}
