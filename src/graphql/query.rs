use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::db::DbPool;
use crate::filters::{CustomerFilter, OrderFilter, ProductFilter};
use crate::graphql::blocking;
use crate::graphql::objects::{Customer, Order, Product};
use crate::service::{customers, orders, products};

#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn all_customers(
        &self,
        ctx: &Context<'_>,
        filter: Option<CustomerFilter>,
    ) -> Result<Vec<Customer>> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let rows =
            blocking(move || customers::list_customers(&pool, filter.unwrap_or_default())).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn customer(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Customer>> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let row = blocking(move || customers::find_customer(&pool, id)).await?;
        Ok(row.map(Into::into))
    }

    async fn all_products(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProductFilter>,
    ) -> Result<Vec<Product>> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let rows =
            blocking(move || products::list_products(&pool, filter.unwrap_or_default())).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn product(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Product>> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let row = blocking(move || products::find_product(&pool, id)).await?;
        Ok(row.map(Into::into))
    }

    async fn all_orders(
        &self,
        ctx: &Context<'_>,
        filter: Option<OrderFilter>,
    ) -> Result<Vec<Order>> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let rows = blocking(move || orders::list_orders(&pool, filter.unwrap_or_default())).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn order(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Order>> {
        let pool = ctx.data_unchecked::<DbPool>().clone();
        let details = blocking(move || orders::find_order(&pool, id)).await?;
        Ok(details.map(Into::into))
    }
}
