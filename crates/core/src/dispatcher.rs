//! Single entry point for everything the UI can trigger. One action runs
//! at a time; each invocation either re-renders the table, posts an
//! informational notice, or posts an error notice. Recoverable failures
//! stop here and never unwind the UI loop.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::activity_log::{
    unix_timestamp_millis, ActivityLog, AuditOutcome, AuditRecord, FileAuditTrail,
};
use crate::connection::{ConnectionProvider, Session, SessionError, SessionStatus};
use crate::executor::{Executor, QueryBackend, QueryError};
use crate::presenter::TableView;
use crate::report::{MutationId, ProductField, ReportId, DISCOUNTED_ORDERS};
use crate::value::{parse_param, ParamKind, ParamValue, ValidationError};

/// Everything a menu entry can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Report(ReportId),
    Mutation(MutationId),
    UpdateProduct(ProductField),
    DiscountedOrders,
    ClearTable,
    RefreshConnection,
}

impl Action {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Report(id) => id.def().title,
            Self::Mutation(id) => id.def().title,
            Self::UpdateProduct(field) => match field {
                ProductField::Name => "Update Product Name",
                ProductField::Category => "Update Product Category",
                ProductField::Price => "Update Product Price",
                ProductField::Stock => "Update Product Stock",
            },
            Self::DiscountedOrders => DISCOUNTED_ORDERS.title,
            Self::ClearTable => "Clear Results",
            Self::RefreshConnection => "Refresh Connection",
        }
    }

    #[must_use]
    pub fn param_labels(self) -> &'static [&'static str] {
        match self {
            Self::Report(id) => id.def().param_labels,
            Self::Mutation(id) => id.def().param_labels,
            Self::UpdateProduct(field) => match field {
                ProductField::Name => &["New name", "Product ID"],
                ProductField::Category => &["New category", "Product ID"],
                ProductField::Price => &["New price", "Product ID"],
                ProductField::Stock => &["New stock", "Product ID"],
            },
            Self::DiscountedOrders | Self::ClearTable | Self::RefreshConnection => &[],
        }
    }

    #[must_use]
    pub fn param_kinds(self) -> Vec<ParamKind> {
        match self {
            Self::Report(id) => id.def().params.to_vec(),
            Self::Mutation(id) => id.def().params.to_vec(),
            Self::UpdateProduct(field) => vec![field.value_kind(), ParamKind::Int],
            Self::DiscountedOrders | Self::ClearTable | Self::RefreshConnection => Vec::new(),
        }
    }
}

/// What an invocation produced, already applied to the table where it
/// applies. Exactly one of these per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The results table was re-rendered with at least one row.
    Table,
    Info(String),
    Error(String),
}

#[derive(Debug, Error)]
enum InputError {
    #[error("expected {expected} value(s), got {actual}")]
    Arity { expected: usize, actual: usize },
    #[error("{label}: {source}")]
    Invalid {
        label: &'static str,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
enum ActionError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

enum Applied {
    Rendered { rows: usize },
    EmptyResult,
    Mutated { affected: u64, reloaded: usize },
    ProcedureDone,
    Cleared,
    Refreshed(Duration),
}

/// Owns the session, the executor and the rendered table. `invoke` is the
/// only mutating entry point and runs one action to completion at a time.
pub struct Dispatcher<P: ConnectionProvider, B: QueryBackend> {
    session: Session<P>,
    executor: Executor<B>,
    table: TableView,
    log: ActivityLog,
    audit: Option<FileAuditTrail>,
    status_message: String,
}

impl<P: ConnectionProvider, B: QueryBackend> Dispatcher<P, B> {
    #[must_use]
    pub fn new(session: Session<P>, executor: Executor<B>) -> Self {
        Self {
            session,
            executor,
            table: TableView::new(),
            log: ActivityLog::default(),
            audit: None,
            status_message: String::new(),
        }
    }

    pub fn set_audit_trail(&mut self, trail: FileAuditTrail) {
        self.audit = Some(trail);
    }

    /// Opens the startup connection. The caller treats a failure here as
    /// fatal; afterwards connection problems are recoverable through the
    /// refresh action.
    pub async fn connect(&mut self) -> Result<Duration, SessionError> {
        let latency = self.session.open().await?;
        self.log
            .push(format!("Connected in {} ms", latency.as_millis()));
        self.status_message = "connected".to_string();
        Ok(latency)
    }

    pub async fn shutdown(&mut self) -> Result<(), SessionError> {
        self.session.close().await
    }

    #[must_use]
    pub fn table(&self) -> &TableView {
        &self.table
    }

    #[must_use]
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    #[must_use]
    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    /// One-line summary for the footer: connection state plus the outcome
    /// of the most recent action.
    #[must_use]
    pub fn status_line(&self) -> String {
        let status = self.session.status();
        let connection = if status.is_connected {
            match status.last_latency {
                Some(latency) => format!("connected ({} ms)", latency.as_millis()),
                None => "connected".to_string(),
            }
        } else {
            "disconnected".to_string()
        };
        if self.status_message.is_empty() {
            connection
        } else {
            format!("{connection} | {}", self.status_message)
        }
    }

    /// Runs one action with the user-supplied parameter texts. Input that
    /// fails validation is rejected before the database is touched; every
    /// other failure is caught, logged and returned as an error notice.
    pub async fn invoke(&mut self, action: Action, raw_params: &[String]) -> Feedback {
        let title = invocation_title(action, raw_params);
        let started_at = Instant::now();

        let params = match parse_action_params(action, raw_params) {
            Ok(params) => params,
            Err(err) => {
                let message = format!("{title}: {err}");
                self.log.push(&message);
                self.status_message = message.clone();
                self.append_audit(&title, AuditOutcome::Rejected, None, None, Some(err.to_string()));
                return Feedback::Error(message);
            }
        };

        let applied = self.perform(action, &params, &title).await;
        let elapsed = started_at.elapsed().as_millis();

        match applied {
            Ok(applied) => {
                let (message, rows) = match &applied {
                    Applied::Rendered { rows } => {
                        (format!("{title}: {rows} row(s)"), Some(*rows as u64))
                    }
                    Applied::EmptyResult => (format!("{title}: no matching records"), Some(0)),
                    Applied::Mutated { affected, reloaded } => (
                        format!("{title}: {affected} row(s) affected, {reloaded} shown"),
                        Some(*affected),
                    ),
                    Applied::ProcedureDone => (format!("{title}: completed"), None),
                    Applied::Cleared => ("Results cleared".to_string(), None),
                    Applied::Refreshed(latency) => (
                        format!("Connection refreshed in {} ms", latency.as_millis()),
                        None,
                    ),
                };
                self.log.push(&message);
                self.status_message = message.clone();
                self.append_audit(&title, AuditOutcome::Succeeded, rows, Some(elapsed), None);
                match applied {
                    Applied::Rendered { .. } => Feedback::Table,
                    _ => Feedback::Info(message),
                }
            }
            Err(err) => {
                let message = format!("{title}: {err}");
                self.log.push(&message);
                self.status_message = message.clone();
                self.append_audit(
                    &title,
                    AuditOutcome::Failed,
                    None,
                    Some(elapsed),
                    Some(err.to_string()),
                );
                Feedback::Error(message)
            }
        }
    }

    async fn perform(
        &mut self,
        action: Action,
        params: &[ParamValue],
        title: &str,
    ) -> Result<Applied, ActionError> {
        match action {
            Action::Report(id) => {
                let results = self.executor.run_report(id, params).await?;
                let rows = results.rows.len();
                self.table.render(&results, title);
                if rows == 0 {
                    Ok(Applied::EmptyResult)
                } else {
                    Ok(Applied::Rendered { rows })
                }
            }
            Action::Mutation(id) => {
                let affected = self.executor.run_mutation(id, params).await?;
                let reload = id.def().reload;
                let results = self.executor.run_report(reload, &[]).await?;
                let reloaded = results.rows.len();
                self.table.render(&results, reload.def().title);
                Ok(Applied::Mutated { affected, reloaded })
            }
            Action::UpdateProduct(field) => {
                let affected = self.executor.update_product(field, params).await?;
                let reload = ReportId::ProductList;
                let results = self.executor.run_report(reload, &[]).await?;
                let reloaded = results.rows.len();
                self.table.render(&results, reload.def().title);
                Ok(Applied::Mutated { affected, reloaded })
            }
            Action::DiscountedOrders => {
                self.executor.call_procedure(&DISCOUNTED_ORDERS).await?;
                Ok(Applied::ProcedureDone)
            }
            Action::ClearTable => {
                self.table.clear();
                Ok(Applied::Cleared)
            }
            Action::RefreshConnection => {
                let latency = self.session.refresh().await?;
                Ok(Applied::Refreshed(latency))
            }
        }
    }

    /// An unwritable audit file must not take the dashboard down; the
    /// failure is surfaced in the activity feed instead.
    fn append_audit(
        &mut self,
        action: &str,
        outcome: AuditOutcome,
        rows: Option<u64>,
        elapsed_ms: Option<u128>,
        error: Option<String>,
    ) {
        let Some(trail) = &self.audit else {
            return;
        };
        let record = AuditRecord {
            timestamp_unix_ms: unix_timestamp_millis(),
            action: action.to_string(),
            outcome,
            rows,
            elapsed_ms,
            error,
        };
        if let Err(err) = trail.append(&record) {
            self.log.push(format!("audit write failed: {err}"));
        }
    }
}

fn invocation_title(action: Action, raw_params: &[String]) -> String {
    if raw_params.is_empty() {
        action.label().to_string()
    } else {
        format!("{} [{}]", action.label(), raw_params.join(", "))
    }
}

fn parse_action_params(action: Action, raw_params: &[String]) -> Result<Vec<ParamValue>, InputError> {
    let kinds = action.param_kinds();
    let labels = action.param_labels();
    if kinds.len() != raw_params.len() {
        return Err(InputError::Arity {
            expected: kinds.len(),
            actual: raw_params.len(),
        });
    }

    kinds
        .iter()
        .zip(raw_params)
        .enumerate()
        .map(|(index, (kind, raw))| {
            parse_param(*kind, raw).map_err(|source| InputError::Invalid {
                label: labels.get(index).copied().unwrap_or("value"),
                source,
            })
        })
        .collect()
}
