use async_trait::async_trait;
use thiserror::Error;

use crate::materialize::{materialize, MaterializeError, RawRow, ResultSet};
use crate::report::{MutationId, ProcedureDef, ProductField, ReportId};
use crate::value::{ParamKind, ParamValue};

/// Failure reported by a backend while running a statement. Connection
/// establishment has its own error type; this one covers everything that
/// happens on an already-working channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Runs prepared statements against the database. Implementations bind
/// the supplied parameters positionally; they never interpolate text.
#[async_trait]
pub trait QueryBackend {
    async fn query(&self, sql: &str, params: &[ParamValue]) -> Result<Vec<RawRow>, BackendError>;

    /// Returns the number of affected rows.
    async fn execute(&self, sql: &str, params: &[ParamValue]) -> Result<u64, BackendError>;

    /// Runs a `CALL ...` statement, discarding any result sets it emits.
    async fn call_procedure(&self, sql: &str) -> Result<(), BackendError>;
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("expected {expected} parameter(s), got {actual}")]
    ParameterArity { expected: usize, actual: usize },
    #[error("parameter {index} must be {expected:?}, got {actual:?}")]
    ParameterType {
        index: usize,
        expected: ParamKind,
        actual: ParamKind,
    },
    #[error("statement failed: {0}")]
    Backend(#[source] BackendError),
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

/// Runs catalog statements over a backend. Parameters are checked against
/// the definition before the backend is touched, so a mismatch never
/// reaches the wire. Each mutation is a single statement that applies
/// fully or fails fully; nothing here retries.
#[derive(Debug)]
pub struct Executor<B> {
    backend: B,
}

impl<B: QueryBackend> Executor<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs a catalog report and materializes its rows in the declared
    /// column order. An empty result is not an error; it keeps the
    /// declared header.
    pub async fn run_report(
        &self,
        id: ReportId,
        params: &[ParamValue],
    ) -> Result<ResultSet, QueryError> {
        let def = id.def();
        check_params(def.params, params)?;
        let rows = self
            .backend
            .query(def.sql, params)
            .await
            .map_err(QueryError::Backend)?;
        Ok(materialize(&rows, def.columns)?)
    }

    pub async fn run_mutation(
        &self,
        id: MutationId,
        params: &[ParamValue],
    ) -> Result<u64, QueryError> {
        let def = id.def();
        check_params(def.params, params)?;
        self.backend
            .execute(def.sql, params)
            .await
            .map_err(QueryError::Backend)
    }

    /// Applies one of the fixed product-update statements. Parameters are
    /// the new value followed by the product id.
    pub async fn update_product(
        &self,
        field: ProductField,
        params: &[ParamValue],
    ) -> Result<u64, QueryError> {
        let expected = [field.value_kind(), ParamKind::Int];
        check_params(&expected, params)?;
        self.backend
            .execute(field.update_sql(), params)
            .await
            .map_err(QueryError::Backend)
    }

    pub async fn call_procedure(&self, def: &ProcedureDef) -> Result<(), QueryError> {
        self.backend
            .call_procedure(def.sql)
            .await
            .map_err(QueryError::Backend)
    }
}

fn check_params(expected: &[ParamKind], supplied: &[ParamValue]) -> Result<(), QueryError> {
    if expected.len() != supplied.len() {
        return Err(QueryError::ParameterArity {
            expected: expected.len(),
            actual: supplied.len(),
        });
    }
    for (index, (kind, value)) in expected.iter().zip(supplied).enumerate() {
        if value.kind() != *kind {
            return Err(QueryError::ParameterType {
                index,
                expected: *kind,
                actual: value.kind(),
            });
        }
    }
    Ok(())
}
