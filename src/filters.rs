//! Typed filter inputs for the list queries.
//!
//! Each filterable field gets an explicit predicate; filters are applied to
//! diesel boxed queries, never assembled from dynamic key/value maps.

use async_graphql::InputObject;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::schema::{customers, orders, products};

#[derive(Debug, Default, InputObject)]
pub struct CustomerFilter {
    /// Exact name match.
    pub name: Option<String>,
    /// Case-insensitive substring match on name.
    pub name_contains: Option<String>,
    /// Case-insensitive prefix match on name.
    pub name_starts_with: Option<String>,
    /// Exact email match.
    pub email: Option<String>,
    /// Case-insensitive substring match on email.
    pub email_contains: Option<String>,
}

impl CustomerFilter {
    pub fn apply(self) -> customers::BoxedQuery<'static, Pg> {
        let mut query = customers::table.into_boxed();
        if let Some(name) = self.name {
            query = query.filter(customers::name.eq(name));
        }
        if let Some(sub) = self.name_contains {
            query = query.filter(customers::name.ilike(format!("%{sub}%")));
        }
        if let Some(prefix) = self.name_starts_with {
            query = query.filter(customers::name.ilike(format!("{prefix}%")));
        }
        if let Some(email) = self.email {
            query = query.filter(customers::email.eq(email));
        }
        if let Some(sub) = self.email_contains {
            query = query.filter(customers::email.ilike(format!("%{sub}%")));
        }
        query
    }
}

#[derive(Debug, Default, InputObject)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
    pub stock: Option<i32>,
}

impl ProductFilter {
    pub fn apply(self) -> products::BoxedQuery<'static, Pg> {
        let mut query = products::table.into_boxed();
        if let Some(name) = self.name {
            query = query.filter(products::name.eq(name));
        }
        if let Some(price) = self.price {
            query = query.filter(products::price.eq(price));
        }
        if let Some(stock) = self.stock {
            query = query.filter(products::stock.eq(stock));
        }
        query
    }
}

#[derive(Debug, Default, InputObject)]
pub struct OrderFilter {
    pub total_amount: Option<BigDecimal>,
    pub order_date: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn apply(self) -> orders::BoxedQuery<'static, Pg> {
        let mut query = orders::table.into_boxed();
        if let Some(total) = self.total_amount {
            query = query.filter(orders::total_amount.eq(total));
        }
        if let Some(date) = self.order_date {
            query = query.filter(orders::order_date.eq(date));
        }
        query
    }
}
