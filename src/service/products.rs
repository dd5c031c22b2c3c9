use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::filters::ProductFilter;
use crate::models::product::{NewProduct, Product};
use crate::schema::products;
use crate::validation;

pub fn create_product(
    pool: &DbPool,
    name: String,
    price: BigDecimal,
    stock: Option<i32>,
) -> Result<Product, ServiceError> {
    validation::validate_name(&name)?;
    validation::validate_price(&price)?;
    let stock = stock.unwrap_or(0);
    validation::validate_stock(stock)?;

    let mut conn = pool.get()?;
    let created = diesel::insert_into(products::table)
        .values(&NewProduct {
            id: Uuid::new_v4(),
            name,
            price,
            stock,
        })
        .returning(Product::as_returning())
        .get_result(&mut conn)?;

    log::info!("created product {} '{}'", created.id, created.name);
    Ok(created)
}

pub fn list_products(pool: &DbPool, filter: ProductFilter) -> Result<Vec<Product>, ServiceError> {
    let mut conn = pool.get()?;
    Ok(filter
        .apply()
        .select(Product::as_select())
        .order(products::created_at.asc())
        .load(&mut conn)?)
}

pub fn find_product(pool: &DbPool, id: Uuid) -> Result<Option<Product>, ServiceError> {
    let mut conn = pool.get()?;
    Ok(products::table
        .find(id)
        .select(Product::as_select())
        .first(&mut conn)
        .optional()?)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::service::testing::setup_db;

    fn price(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[tokio::test]
    async fn create_persists_product_with_default_stock() {
        let (_container, pool) = setup_db().await;

        let product =
            create_product(&pool, "Widget".to_string(), price("9.99"), None).expect("create failed");

        assert_eq!(product.name, "Widget");
        assert_eq!(product.stock, 0);
        assert_eq!(product.price, price("9.99"));
    }

    #[tokio::test]
    async fn zero_and_negative_prices_rejected() {
        let (_container, pool) = setup_db().await;

        let err = create_product(&pool, "Free".to_string(), price("0"), None)
            .expect_err("zero price should be rejected");
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = create_product(&pool, "Refund".to_string(), price("-5"), None)
            .expect_err("negative price should be rejected");
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn negative_stock_rejected() {
        let (_container, pool) = setup_db().await;

        let err = create_product(&pool, "Widget".to_string(), price("9.99"), Some(-1))
            .expect_err("negative stock should be rejected");
        assert!(matches!(err, ServiceError::Validation(_)));

        let product = create_product(&pool, "Widget".to_string(), price("9.99"), Some(0))
            .expect("zero stock is valid");
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn filter_by_stock() {
        let (_container, pool) = setup_db().await;

        create_product(&pool, "A".to_string(), price("1.00"), Some(3)).unwrap();
        create_product(&pool, "B".to_string(), price("2.00"), Some(7)).unwrap();

        let found = list_products(
            &pool,
            ProductFilter {
                stock: Some(7),
                ..Default::default()
            },
        )
        .expect("list failed");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "B");
    }
}
