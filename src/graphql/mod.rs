//! GraphQL schema wiring: object types, the query and mutation roots, and
//! the bridge from async resolvers onto diesel's blocking connections.

pub mod mutation;
pub mod objects;
pub mod query;

use async_graphql::{EmptySubscription, Schema};

use crate::db::DbPool;
use async_graphql::ErrorExtensions;

use crate::errors::ServiceError;
use self::mutation::MutationRoot;
use self::query::QueryRoot;

pub type CrmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(pool: DbPool) -> CrmSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .finish()
}

/// Runs a blocking service call on the runtime's blocking pool and lifts its
/// error into a GraphQL error.
pub(crate) async fn blocking<T, F>(f: F) -> async_graphql::Result<T>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()).extend())?
        .map_err(|e| e.extend())
}
