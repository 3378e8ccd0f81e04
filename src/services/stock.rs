// src/services/stock.rs

use crate::{
    errors::{AppError, AppResult},
    models::{
        CreateStockItemRequest, IssueStockRequest, ReceiveStockRequest, StockItem, StockItemView,
        StockStatus, StockSummary, StockTransaction, TransactionType,
    },
    store::ConsoleData,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};
use uuid::Uuid;

/// Fraction of `max_stock` at or above which an item counts as well stocked.
const HIGH_WATERMARK: Decimal = dec!(0.8);

pub struct StockLedger;

impl StockLedger {
    pub fn status(item: &StockItem) -> StockStatus {
        if item.current_stock <= item.min_stock {
            StockStatus::Low
        } else if Decimal::from(item.current_stock) >= Decimal::from(item.max_stock) * HIGH_WATERMARK {
            StockStatus::High
        } else {
            StockStatus::Normal
        }
    }

    pub fn view(item: &StockItem) -> StockItemView {
        StockItemView {
            item: item.clone(),
            status: Self::status(item),
        }
    }

    pub fn search(items: &[StockItem], term: Option<&str>) -> Vec<StockItemView> {
        let term = term.unwrap_or_default().to_lowercase();
        items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&term)
                    || item.item_code.to_lowercase().contains(&term)
                    || item.brand.to_lowercase().contains(&term)
            })
            .map(Self::view)
            .collect()
    }

    pub fn low_stock(items: &[StockItem]) -> Vec<StockItemView> {
        items
            .iter()
            .filter(|item| item.current_stock <= item.min_stock)
            .map(Self::view)
            .collect()
    }

    pub fn summary(items: &[StockItem]) -> StockSummary {
        StockSummary {
            item_count: items.len(),
            low_stock_count: items.iter().filter(|i| i.current_stock <= i.min_stock).count(),
            total_stock_value: items
                .iter()
                .map(|i| Decimal::from(i.current_stock) * i.unit_price)
                .sum(),
        }
    }

    pub fn create_item(
        data: &mut ConsoleData,
        body: CreateStockItemRequest,
        today: NaiveDate,
    ) -> AppResult<StockItem> {
        if body.item_code.trim().is_empty() {
            return Err(AppError::Validation("Item code is required".to_string()));
        }
        if body.min_stock > body.max_stock {
            return Err(AppError::Validation(
                "min_stock cannot exceed max_stock".to_string(),
            ));
        }
        if body.unit_price < Decimal::ZERO {
            return Err(AppError::Validation("Unit price cannot be negative".to_string()));
        }
        if data.stock_item(&body.item_code).is_some() {
            return Err(AppError::Conflict(format!(
                "Stock item '{}' already exists",
                body.item_code
            )));
        }

        let item = StockItem {
            id: Uuid::new_v4(),
            item_code: body.item_code,
            name: body.name,
            brand: body.brand,
            size: body.size,
            current_stock: body.current_stock,
            min_stock: body.min_stock,
            max_stock: body.max_stock,
            unit_price: body.unit_price,
            supplier: body.supplier,
            last_updated: today,
        };
        data.stock_items.push(item.clone());
        Ok(item)
    }

    /// Book incoming stock. An unknown item code leaves the ledger untouched
    /// and yields `None`.
    pub fn receive(
        data: &mut ConsoleData,
        req: &ReceiveStockRequest,
        processed_by: &str,
        today: NaiveDate,
    ) -> Option<StockTransaction> {
        let item = data.stock_item_mut(&req.item_code)?;
        item.current_stock = item.current_stock.saturating_add(req.quantity);
        item.last_updated = today;

        let transaction = StockTransaction {
            id: Uuid::new_v4(),
            item_code: item.item_code.clone(),
            item_name: item.name.clone(),
            transaction_type: TransactionType::Incoming,
            quantity: req.quantity,
            unit_price: req.unit_price,
            total_value: Decimal::from(req.quantity) * req.unit_price,
            supplier: Some(req.supplier.clone()),
            customer: None,
            reason: req.reason.clone(),
            date: today,
            processed_by: processed_by.to_string(),
        };
        info!(
            item_code = %transaction.item_code,
            quantity = transaction.quantity,
            stock = item.current_stock,
            "Stock received"
        );

        data.transactions.insert(0, transaction.clone());
        Some(transaction)
    }

    /// Book outgoing stock at the item's current unit price. Rejected in full
    /// when the item holds fewer units than requested.
    pub fn issue(
        data: &mut ConsoleData,
        req: &IssueStockRequest,
        processed_by: &str,
        today: NaiveDate,
    ) -> AppResult<StockTransaction> {
        let item = data
            .stock_item_mut(&req.item_code)
            .ok_or_else(|| AppError::NotFound(format!("Stock item {} not found", req.item_code)))?;

        if item.current_stock < req.quantity {
            warn!(
                item_code = %item.item_code,
                available = item.current_stock,
                requested = req.quantity,
                "Issue rejected: insufficient stock"
            );
            return Err(AppError::InsufficientStock {
                item_code: item.item_code.clone(),
                available: item.current_stock,
                requested: req.quantity,
            });
        }

        item.current_stock -= req.quantity;
        item.last_updated = today;

        let transaction = StockTransaction {
            id: Uuid::new_v4(),
            item_code: item.item_code.clone(),
            item_name: item.name.clone(),
            transaction_type: TransactionType::Outgoing,
            quantity: req.quantity,
            unit_price: item.unit_price,
            total_value: Decimal::from(req.quantity) * item.unit_price,
            supplier: None,
            customer: Some(req.customer.clone()),
            reason: req.reason.clone(),
            date: today,
            processed_by: processed_by.to_string(),
        };
        info!(
            item_code = %transaction.item_code,
            quantity = transaction.quantity,
            stock = item.current_stock,
            "Stock issued"
        );

        data.transactions.insert(0, transaction.clone());
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::demo_data;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 25).unwrap()
    }

    fn issue(code: &str, quantity: u32) -> IssueStockRequest {
        IssueStockRequest {
            item_code: code.to_string(),
            quantity,
            customer: "Walk-in".to_string(),
            reason: "Customer purchase".to_string(),
        }
    }

    fn receive(code: &str, quantity: u32, price: Decimal) -> ReceiveStockRequest {
        ReceiveStockRequest {
            item_code: code.to_string(),
            quantity,
            unit_price: price,
            supplier: "Bridgestone Direct".to_string(),
            reason: "Replenishment".to_string(),
        }
    }

    #[test]
    fn status_bands() {
        let data = demo_data();
        assert_eq!(StockLedger::status(data.stock_item("TYR002").unwrap()), StockStatus::Low);
        assert_eq!(StockLedger::status(data.stock_item("TYR001").unwrap()), StockStatus::Normal);

        let mut item = data.stock_item("TYR003").unwrap().clone();
        item.current_stock = 36; // 0.8 * 45
        assert_eq!(StockLedger::status(&item), StockStatus::High);
        item.current_stock = 35;
        assert_eq!(StockLedger::status(&item), StockStatus::Normal);
    }

    #[test]
    fn low_takes_precedence_over_high() {
        let data = demo_data();
        let mut item = data.stock_item("TYR001").unwrap().clone();
        item.min_stock = 50;
        item.current_stock = 45;
        assert_eq!(StockLedger::status(&item), StockStatus::Low);
    }

    #[test]
    fn issue_decrements_and_logs_outgoing_at_item_price() {
        let mut data = demo_data();
        let before = data.transactions.len();

        let tx = StockLedger::issue(&mut data, &issue("TYR002", 4), "Admin User", today()).unwrap();

        assert_eq!(data.stock_item("TYR002").unwrap().current_stock, 4);
        assert_eq!(data.stock_item("TYR002").unwrap().last_updated, today());
        assert_eq!(tx.transaction_type, TransactionType::Outgoing);
        assert_eq!(tx.total_value, dec!(540));
        assert_eq!(data.transactions.len(), before + 1);
        assert_eq!(data.transactions[0].id, tx.id);
    }

    #[test]
    fn oversize_issue_is_rejected_without_side_effects() {
        let mut data = demo_data();
        let before = data.transactions.len();

        let err = StockLedger::issue(&mut data, &issue("TYR002", 9), "Admin User", today()).unwrap_err();

        assert!(matches!(err, AppError::InsufficientStock { available: 8, requested: 9, .. }));
        let item = data.stock_item("TYR002").unwrap();
        assert_eq!(item.current_stock, 8);
        assert_ne!(item.last_updated, today());
        assert_eq!(data.transactions.len(), before);
    }

    #[test]
    fn issuing_everything_leaves_zero() {
        let mut data = demo_data();
        StockLedger::issue(&mut data, &issue("TYR002", 8), "Admin User", today()).unwrap();
        assert_eq!(data.stock_item("TYR002").unwrap().current_stock, 0);
    }

    #[test]
    fn receive_adds_quantity_and_one_incoming_transaction() {
        let mut data = demo_data();
        let before = data.transactions.len();

        let tx = StockLedger::receive(&mut data, &receive("TYR002", 12, dec!(130.50)), "Admin User", today()).unwrap();

        assert_eq!(data.stock_item("TYR002").unwrap().current_stock, 20);
        assert_eq!(tx.transaction_type, TransactionType::Incoming);
        assert_eq!(tx.total_value, dec!(1566));
        assert_eq!(data.transactions.len(), before + 1);
    }

    #[test]
    fn receive_unknown_code_is_a_no_op() {
        let mut data = demo_data();
        let before = data.transactions.len();
        let stock: Vec<u32> = data.stock_items.iter().map(|i| i.current_stock).collect();

        assert!(StockLedger::receive(&mut data, &receive("NOPE", 5, dec!(10)), "Admin User", today()).is_none());

        assert_eq!(data.transactions.len(), before);
        let after: Vec<u32> = data.stock_items.iter().map(|i| i.current_stock).collect();
        assert_eq!(stock, after);
    }

    #[test]
    fn search_matches_code_name_and_brand() {
        let data = demo_data();
        assert_eq!(StockLedger::search(&data.stock_items, Some("michelin")).len(), 1);
        assert_eq!(StockLedger::search(&data.stock_items, Some("tyr00")).len(), 3);
        assert_eq!(StockLedger::search(&data.stock_items, Some("turanza")).len(), 1);
        assert_eq!(StockLedger::search(&data.stock_items, None).len(), 3);
    }

    #[test]
    fn summary_totals() {
        let data = demo_data();
        let summary = StockLedger::summary(&data.stock_items);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.low_stock_count, 1);
        // 15*120 + 8*135 + 25*110
        assert_eq!(summary.total_stock_value, dec!(5630));
    }

    #[test]
    fn create_item_rejects_duplicate_code() {
        let mut data = demo_data();
        let body = CreateStockItemRequest {
            item_code: "TYR001".to_string(),
            name: "Dup".to_string(),
            brand: "Michelin".to_string(),
            size: "205/55R16".to_string(),
            current_stock: 0,
            min_stock: 1,
            max_stock: 10,
            unit_price: dec!(100),
            supplier: "Michelin Distributor".to_string(),
        };
        assert!(matches!(
            StockLedger::create_item(&mut data, body, today()),
            Err(AppError::Conflict(_))
        ));
    }
}
