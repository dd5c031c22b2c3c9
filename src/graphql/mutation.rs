use async_graphql::{Context, Object, Result};
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::db::DbPool;
use crate::graphql::blocking;
use crate::graphql::objects::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
};
use crate::service::customers::{self, CustomerInput};
use crate::service::{orders, products};

#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<CreateCustomerPayload> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let customer = blocking(move || {
            customers::create_customer(&pool, CustomerInput { name, email, phone })
        })
        .await?;

        Ok(CreateCustomerPayload {
            message: format!("customer '{}' created", customer.name),
            customer: customer.into(),
            success: true,
        })
    }

    /// Creates every valid record in the batch; invalid records are reported
    /// in `errors` without rolling back their neighbours.
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        customers_data: Vec<CustomerInput>,
    ) -> Result<BulkCreateCustomersPayload> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let outcome =
            blocking(move || customers::bulk_create_customers(&pool, customers_data)).await?;

        Ok(BulkCreateCustomersPayload {
            created_customers: outcome.created.into_iter().map(Into::into).collect(),
            errors: outcome.errors,
        })
    }

    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: BigDecimal,
        stock: Option<i32>,
    ) -> Result<CreateProductPayload> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let product = blocking(move || products::create_product(&pool, name, price, stock)).await?;

        Ok(CreateProductPayload {
            product: product.into(),
        })
    }

    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: Uuid,
        product_ids: Vec<Uuid>,
    ) -> Result<CreateOrderPayload> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let details = blocking(move || orders::create_order(&pool, customer_id, product_ids)).await?;

        Ok(CreateOrderPayload {
            order: details.into(),
        })
    }
}
