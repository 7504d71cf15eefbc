//! CSV rendering for report downloads.
//!
//! Amounts are written with their stored scale (e.g. `150.50`).

use crate::Result;
use crate::model::{LowStockItem, SalesTrendPoint, TopCustomer};

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn sales_trend_csv(points: &[SalesTrendPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["day", "order_count", "revenue"])?;
    for point in points {
        writer.write_record([
            point.day.to_string(),
            point.order_count.to_string(),
            point.revenue.to_string(),
        ])?;
    }
    finish(writer)
}

pub fn top_customers_csv(customers: &[TopCustomer]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["customer_id", "name", "order_count", "total_spent"])?;
    for customer in customers {
        writer.write_record([
            customer.customer_id.to_string(),
            customer.name.clone(),
            customer.order_count.to_string(),
            customer.total_spent.to_string(),
        ])?;
    }
    finish(writer)
}

pub fn low_stock_csv(items: &[LowStockItem]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "inventory_id",
        "product_id",
        "sku",
        "name",
        "current_stock",
        "reorder_level",
    ])?;
    for item in items {
        writer.write_record([
            item.inventory_id.to_string(),
            item.product_id.to_string(),
            item.sku.clone(),
            item.name.clone(),
            item.current_stock.to_string(),
            item.reorder_level.to_string(),
        ])?;
    }
    finish(writer)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn trend_csv_keeps_amount_scale() {
        let points = vec![SalesTrendPoint {
            day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            order_count: 2,
            revenue: Decimal::new(15050, 2),
        }];
        let csv = sales_trend_csv(&points).unwrap();
        assert_eq!(csv, "day,order_count,revenue\n2024-03-01,2,150.50\n");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let customers = vec![TopCustomer {
            customer_id: 7,
            name: "Acme, Inc.".to_string(),
            order_count: 3,
            total_spent: Decimal::new(999, 1),
        }];
        let csv = top_customers_csv(&customers).unwrap();
        assert_eq!(
            csv,
            "customer_id,name,order_count,total_spent\n7,\"Acme, Inc.\",3,99.9\n"
        );
    }

    #[test]
    fn empty_report_is_header_only() {
        let csv = low_stock_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "inventory_id,product_id,sku,name,current_stock,reorder_level\n"
        );
    }
}
