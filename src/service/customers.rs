use async_graphql::InputObject;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::filters::CustomerFilter;
use crate::models::customer::{Customer, NewCustomer};
use crate::schema::customers;
use crate::validation;

/// One customer record as supplied by `createCustomer` or a
/// `bulkCreateCustomers` batch entry.
#[derive(Debug, Clone, InputObject)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug)]
pub struct BulkCreateOutcome {
    pub created: Vec<Customer>,
    pub errors: Vec<String>,
}

fn validate(input: &CustomerInput) -> Result<(), ServiceError> {
    validation::validate_name(&input.name)?;
    if let Some(phone) = input.phone.as_deref() {
        validation::validate_phone(phone)?;
    }
    Ok(())
}

/// Validates one input against the committed rows and inserts it. Runs
/// inside whatever transaction the caller opened.
fn insert_customer(
    conn: &mut PgConnection,
    input: &CustomerInput,
) -> Result<Customer, ServiceError> {
    validate(input)?;

    let exists: bool = diesel::select(diesel::dsl::exists(
        customers::table.filter(customers::email.eq(&input.email)),
    ))
    .get_result(conn)?;
    if exists {
        return Err(ServiceError::Conflict(format!(
            "email already exists: {}",
            input.email
        )));
    }

    let created = diesel::insert_into(customers::table)
        .values(&NewCustomer {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
        })
        .returning(Customer::as_returning())
        .get_result(conn)?;

    log::info!("created customer {} <{}>", created.id, created.email);
    Ok(created)
}

pub fn create_customer(pool: &DbPool, input: CustomerInput) -> Result<Customer, ServiceError> {
    let mut conn = pool.get()?;
    conn.transaction::<_, ServiceError, _>(|conn| insert_customer(conn, &input))
}

/// Processes each record independently: a record that fails validation is
/// reported in `errors` and skipped, while its neighbours commit. There is
/// deliberately no batch-wide rollback.
pub fn bulk_create_customers(
    pool: &DbPool,
    inputs: Vec<CustomerInput>,
) -> Result<BulkCreateOutcome, ServiceError> {
    let mut conn = pool.get()?;
    let mut created = Vec::new();
    let mut errors = Vec::new();

    for input in inputs {
        match conn.transaction::<_, ServiceError, _>(|conn| insert_customer(conn, &input)) {
            Ok(customer) => created.push(customer),
            Err(e) => errors.push(format!("{}: {}", input.email, e)),
        }
    }

    Ok(BulkCreateOutcome { created, errors })
}

pub fn list_customers(
    pool: &DbPool,
    filter: CustomerFilter,
) -> Result<Vec<Customer>, ServiceError> {
    let mut conn = pool.get()?;
    Ok(filter
        .apply()
        .select(Customer::as_select())
        .order(customers::created_at.asc())
        .load(&mut conn)?)
}

pub fn find_customer(pool: &DbPool, id: Uuid) -> Result<Option<Customer>, ServiceError> {
    let mut conn = pool.get()?;
    Ok(customers::table
        .find(id)
        .select(Customer::as_select())
        .first(&mut conn)
        .optional()?)
}
