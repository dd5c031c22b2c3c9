use async_graphql::SimpleObject;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::customer::Customer as CustomerRow;
use crate::models::product::Product as ProductRow;
use crate::service::orders::OrderDetails;

#[derive(Debug, SimpleObject)]
#[graphql(name = "Customer")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "Product")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "Order")]
pub struct Order {
    pub id: Uuid,
    pub customer: Customer,
    pub products: Vec<Product>,
    pub total_amount: BigDecimal,
    pub order_date: DateTime<Utc>,
}

impl From<OrderDetails> for Order {
    fn from(details: OrderDetails) -> Self {
        Self {
            id: details.order.id,
            customer: details.customer.into(),
            products: details.products.into_iter().map(Into::into).collect(),
            total_amount: details.order.total_amount,
            order_date: details.order.order_date,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct CreateCustomerPayload {
    pub customer: Customer,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, SimpleObject)]
pub struct BulkCreateCustomersPayload {
    pub created_customers: Vec<Customer>,
    pub errors: Vec<String>,
}

#[derive(Debug, SimpleObject)]
pub struct CreateProductPayload {
    pub product: Product,
}

#[derive(Debug, SimpleObject)]
pub struct CreateOrderPayload {
    pub order: Order,
}
