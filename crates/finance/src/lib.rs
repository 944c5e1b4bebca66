//! `flocktrack-finance` — sale/expense records and the financial rollup.

pub mod expense;
pub mod sale;
pub mod summary;

pub use expense::{Expense, ExpenseCategory, NewExpense};
pub use sale::{EST_WEIGHT_PER_BIRD_KG, NewSale, PaymentMethod, Sale, SaleKind};
pub use summary::{CategoryBreakdown, FinanceSummary, summarize};
