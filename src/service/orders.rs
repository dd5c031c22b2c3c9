use std::collections::HashSet;

use bigdecimal::{BigDecimal, Zero};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::filters::OrderFilter;
use crate::models::customer::Customer;
use crate::models::order::{NewOrder, NewOrderProduct, Order, OrderProduct};
use crate::models::product::Product;
use crate::schema::{customers, order_products, orders, products};

/// An order together with its customer and the products it references.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Customer,
    pub products: Vec<Product>,
}

/// Creates an order for `customer_id` over `product_ids`.
///
/// The total is the exact decimal sum of the resolved products' current
/// prices; no price snapshot is kept beyond the stored total. The order row
/// and all join rows are written in one transaction, so a failed lookup
/// leaves nothing behind.
pub fn create_order(
    pool: &DbPool,
    customer_id: Uuid,
    product_ids: Vec<Uuid>,
) -> Result<OrderDetails, ServiceError> {
    if product_ids.is_empty() {
        return Err(ServiceError::Validation(
            "order must contain at least one product".into(),
        ));
    }

    // Repeated ids would double-count the total and trip the join-table
    // unique constraint.
    let mut requested = product_ids;
    requested.sort_unstable();
    requested.dedup();

    let mut conn = pool.get()?;
    conn.transaction::<_, ServiceError, _>(|conn| {
        let customer = customers::table
            .find(customer_id)
            .select(Customer::as_select())
            .first(conn)
            .optional()?
            .ok_or_else(|| ServiceError::NotFound(format!("invalid customer: {customer_id}")))?;

        let matched: Vec<Product> = products::table
            .filter(products::id.eq_any(&requested))
            .select(Product::as_select())
            .load(conn)?;

        if matched.len() < requested.len() {
            let found: HashSet<Uuid> = matched.iter().map(|p| p.id).collect();
            let missing: Vec<String> = requested
                .iter()
                .filter(|id| !found.contains(id))
                .map(ToString::to_string)
                .collect();
            return Err(ServiceError::NotFound(format!(
                "invalid product id(s): {}",
                missing.join(", ")
            )));
        }

        let total_amount = matched
            .iter()
            .fold(BigDecimal::zero(), |acc, p| acc + &p.price);

        let order = diesel::insert_into(orders::table)
            .values(&NewOrder {
                id: Uuid::new_v4(),
                customer_id,
                total_amount,
            })
            .returning(Order::as_returning())
            .get_result(conn)?;

        let links: Vec<NewOrderProduct> = matched
            .iter()
            .map(|p| NewOrderProduct {
                id: Uuid::new_v4(),
                order_id: order.id,
                product_id: p.id,
            })
            .collect();
        diesel::insert_into(order_products::table)
            .values(&links)
            .execute(conn)?;

        log::info!(
            "created order {} for customer {} ({} products, total {})",
            order.id,
            customer_id,
            matched.len(),
            order.total_amount
        );

        Ok(OrderDetails {
            order,
            customer,
            products: matched,
        })
    })
}

/// Loads the customer and product rows belonging to an already-fetched order.
fn load_details(conn: &mut PgConnection, order: Order) -> Result<OrderDetails, ServiceError> {
    let customer = customers::table
        .find(order.customer_id)
        .select(Customer::as_select())
        .first(conn)?;

    let linked: Vec<OrderProduct> = order_products::table
        .filter(order_products::order_id.eq(order.id))
        .select(OrderProduct::as_select())
        .load(conn)?;
    let ids: Vec<Uuid> = linked.iter().map(|l| l.product_id).collect();

    let products = products::table
        .filter(products::id.eq_any(&ids))
        .select(Product::as_select())
        .load(conn)?;

    Ok(OrderDetails {
        order,
        customer,
        products,
    })
}

pub fn list_orders(pool: &DbPool, filter: OrderFilter) -> Result<Vec<OrderDetails>, ServiceError> {
    let mut conn = pool.get()?;
    let rows: Vec<Order> = filter
        .apply()
        .select(Order::as_select())
        .order(orders::order_date.asc())
        .load(&mut conn)?;

    rows.into_iter()
        .map(|order| load_details(&mut conn, order))
        .collect()
}

pub fn find_order(pool: &DbPool, id: Uuid) -> Result<Option<OrderDetails>, ServiceError> {
    let mut conn = pool.get()?;
    let order = orders::table
        .find(id)
        .select(Order::as_select())
        .first(&mut conn)
        .optional()?;

    match order {
        Some(order) => Ok(Some(load_details(&mut conn, order)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::service::customers::{create_customer, CustomerInput};
    use crate::service::products::create_product;
    use crate::service::testing::setup_db;

    fn price(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn make_customer(pool: &DbPool) -> Customer {
        create_customer(
            pool,
            CustomerInput {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                phone: None,
            },
        )
        .expect("customer create failed")
    }

    #[tokio::test]
    async fn total_is_sum_of_product_prices() {
        let (_container, pool) = setup_db().await;
        let customer = make_customer(&pool);
        let p1 = create_product(&pool, "P1".to_string(), price("10.00"), None).unwrap();
        let p2 = create_product(&pool, "P2".to_string(), price("15.50"), None).unwrap();

        let details =
            create_order(&pool, customer.id, vec![p1.id, p2.id]).expect("order create failed");

        assert_eq!(details.order.total_amount, price("25.50"));
        assert_eq!(details.customer.id, customer.id);
        let linked: HashSet<Uuid> = details.products.iter().map(|p| p.id).collect();
        assert_eq!(linked, HashSet::from([p1.id, p2.id]));
    }

    #[tokio::test]
    async fn empty_product_list_rejected_before_any_lookup() {
        let (_container, pool) = setup_db().await;

        // Even a nonexistent customer id reports the empty list first.
        let err = create_order(&pool, Uuid::new_v4(), vec![])
            .expect_err("empty product list should be rejected");
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_customer_rejected() {
        let (_container, pool) = setup_db().await;
        let product = create_product(&pool, "P".to_string(), price("5.00"), None).unwrap();

        let err = create_order(&pool, Uuid::new_v4(), vec![product.id])
            .expect_err("unknown customer should be rejected");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_product_rolls_back_entire_order() {
        let (_container, pool) = setup_db().await;
        let customer = make_customer(&pool);
        let product = create_product(&pool, "P".to_string(), price("5.00"), None).unwrap();

        let err = create_order(&pool, customer.id, vec![product.id, Uuid::new_v4()])
            .expect_err("unresolvable product id should fail the order");
        assert!(matches!(err, ServiceError::NotFound(_)));

        // Nothing may survive the rollback.
        let mut conn = pool.get().unwrap();
        let order_count: i64 = orders::table.count().get_result(&mut conn).unwrap();
        let link_count: i64 = order_products::table.count().get_result(&mut conn).unwrap();
        assert_eq!(order_count, 0);
        assert_eq!(link_count, 0);
    }

    #[tokio::test]
    async fn duplicate_product_ids_counted_once() {
        let (_container, pool) = setup_db().await;
        let customer = make_customer(&pool);
        let product = create_product(&pool, "P".to_string(), price("7.25"), None).unwrap();

        let details = create_order(&pool, customer.id, vec![product.id, product.id])
            .expect("order create failed");

        assert_eq!(details.order.total_amount, price("7.25"));
        assert_eq!(details.products.len(), 1);
    }

    #[tokio::test]
    async fn later_price_change_leaves_total_untouched() {
        let (_container, pool) = setup_db().await;
        let customer = make_customer(&pool);
        let product = create_product(&pool, "P".to_string(), price("10.00"), None).unwrap();

        let details = create_order(&pool, customer.id, vec![product.id]).unwrap();

        let mut conn = pool.get().unwrap();
        diesel::update(products::table.find(product.id))
            .set(products::price.eq(price("99.99")))
            .execute(&mut conn)
            .unwrap();

        let reloaded = find_order(&pool, details.order.id)
            .unwrap()
            .expect("order should exist");
        assert_eq!(reloaded.order.total_amount, price("10.00"));
    }

    #[tokio::test]
    async fn filter_by_total_amount() {
        let (_container, pool) = setup_db().await;
        let customer = make_customer(&pool);
        let p1 = create_product(&pool, "Cheap".to_string(), price("1.00"), None).unwrap();
        let p2 = create_product(&pool, "Dear".to_string(), price("50.00"), None).unwrap();

        create_order(&pool, customer.id, vec![p1.id]).unwrap();
        create_order(&pool, customer.id, vec![p2.id]).unwrap();

        let found = list_orders(
            &pool,
            OrderFilter {
                total_amount: Some(price("50.00")),
                ..Default::default()
            },
        )
        .expect("list failed");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].products[0].name, "Dear");
    }
}
