use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use gemdash_core::config::{database_password, ConnectionConfig};
use gemdash_core::connection::{ConnectError, ConnectErrorKind, ConnectionProvider};
use gemdash_core::executor::{BackendError, QueryBackend};
use gemdash_core::materialize::RawRow;
use gemdash_core::value::{ParamValue, SqlValue};
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, OptsBuilder, Pool, Row, Value};

/// Opens the durable session handle the dashboard holds for its lifetime.
#[derive(Debug, Clone)]
pub struct MysqlProvider {
    opts: OptsBuilder,
}

impl MysqlProvider {
    #[must_use]
    pub fn new(config: &ConnectionConfig) -> Self {
        Self {
            opts: opts_from_config(config),
        }
    }
}

#[async_trait]
impl ConnectionProvider for MysqlProvider {
    type Handle = Conn;

    async fn connect(&self) -> Result<Conn, ConnectError> {
        Conn::new(self.opts.clone())
            .await
            .map_err(classify_connect_error)
    }

    async fn ping(&self, handle: &mut Conn) -> Result<(), ConnectError> {
        handle.ping().await.map_err(classify_connect_error)
    }

    async fn disconnect(&self, handle: Conn) -> Result<(), ConnectError> {
        handle.disconnect().await.map_err(classify_connect_error)
    }
}

/// Runs catalog statements over a pool-scoped connection per call.
#[derive(Debug, Clone)]
pub struct MysqlQueryBackend {
    pool: Pool,
}

impl MysqlQueryBackend {
    #[must_use]
    pub fn new(config: &ConnectionConfig) -> Self {
        Self {
            pool: Pool::new(opts_from_config(config)),
        }
    }

    pub async fn disconnect(&self) -> Result<(), mysql_async::Error> {
        self.pool.clone().disconnect().await
    }
}

#[async_trait]
impl QueryBackend for MysqlQueryBackend {
    async fn query(&self, sql: &str, params: &[ParamValue]) -> Result<Vec<RawRow>, BackendError> {
        let mut conn = self.pool.get_conn().await.map_err(to_backend_error)?;
        let rows: Vec<Row> = if params.is_empty() {
            conn.query(sql).await
        } else {
            conn.exec(sql, params_to_values(params)).await
        }
        .map_err(to_backend_error)?;
        Ok(rows.into_iter().map(row_to_raw).collect())
    }

    async fn execute(&self, sql: &str, params: &[ParamValue]) -> Result<u64, BackendError> {
        let mut conn = self.pool.get_conn().await.map_err(to_backend_error)?;
        if params.is_empty() {
            conn.query_drop(sql).await
        } else {
            conn.exec_drop(sql, params_to_values(params)).await
        }
        .map_err(to_backend_error)?;
        Ok(conn.affected_rows())
    }

    async fn call_procedure(&self, sql: &str) -> Result<(), BackendError> {
        let mut conn = self.pool.get_conn().await.map_err(to_backend_error)?;
        // query_drop drains every result set the procedure emits.
        conn.query_drop(sql).await.map_err(to_backend_error)
    }
}

fn opts_from_config(config: &ConnectionConfig) -> OptsBuilder {
    let mut builder = OptsBuilder::default()
        .ip_or_hostname(config.host.clone())
        .tcp_port(config.port)
        .user(Some(config.user.clone()))
        .db_name(Some(config.database.clone()));

    if let Some(password) = database_password() {
        builder = builder.pass(Some(password));
    }

    builder
}

/// Folds a driver error into the four categories the dispatch layer
/// recognizes. Server codes 1044/1045 are authorization failures and 1049
/// is a missing schema; transport problems are unreachable; url or driver
/// setup problems mean the client side itself is unusable.
fn classify_connect_error(error: mysql_async::Error) -> ConnectError {
    let kind = match &error {
        mysql_async::Error::Server(server) => match server.code {
            1044 | 1045 => ConnectErrorKind::AccessDenied,
            1049 => ConnectErrorKind::UnknownDatabase,
            _ => ConnectErrorKind::Unreachable,
        },
        mysql_async::Error::Io(_) => ConnectErrorKind::Unreachable,
        mysql_async::Error::Url(_) | mysql_async::Error::Driver(_) => {
            ConnectErrorKind::DriverMissing
        }
        _ => ConnectErrorKind::Unreachable,
    };
    ConnectError::new(kind, error.to_string())
}

fn to_backend_error(error: mysql_async::Error) -> BackendError {
    BackendError::new(error.to_string())
}

fn params_to_values(params: &[ParamValue]) -> Vec<Value> {
    params.iter().map(param_to_value).collect()
}

fn param_to_value(param: &ParamValue) -> Value {
    match param {
        ParamValue::Int(value) => Value::Int(*value),
        ParamValue::Float(value) => Value::Double(*value),
        ParamValue::Text(value) => Value::Bytes(value.clone().into_bytes()),
        ParamValue::Date(date) => Value::Date(
            u16::try_from(date.year()).unwrap_or(0),
            u8::try_from(date.month()).unwrap_or(0),
            u8::try_from(date.day()).unwrap_or(0),
            0,
            0,
            0,
            0,
        ),
    }
}

fn row_to_raw(row: Row) -> RawRow {
    let columns = row
        .columns_ref()
        .iter()
        .map(|column| column.name_str().into_owned())
        .collect();
    let values = row.unwrap().into_iter().map(value_to_sql).collect();
    RawRow::new(columns, values)
}

fn value_to_sql(value: Value) -> SqlValue {
    match value {
        Value::NULL => SqlValue::Null,
        Value::Bytes(bytes) => SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Int(value) => SqlValue::Int(value),
        Value::UInt(value) => i64::try_from(value)
            .map_or_else(|_| SqlValue::Text(value.to_string()), SqlValue::Int),
        Value::Float(value) => SqlValue::Float(f64::from(value)),
        Value::Double(value) => SqlValue::Float(value),
        Value::Date(year, month, day, 0, 0, 0, 0) => {
            NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day)).map_or_else(
                || SqlValue::Text(format!("{year:04}-{month:02}-{day:02}")),
                SqlValue::Date,
            )
        }
        Value::Date(year, month, day, hour, minute, second, micros) => SqlValue::Text(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}"
        )),
        Value::Time(is_negative, days, hours, minutes, seconds, micros) => {
            let sign = if is_negative { "-" } else { "" };
            SqlValue::Text(format!(
                "{sign}{days:03} {hours:02}:{minutes:02}:{seconds:02}.{micros:06}"
            ))
        }
    }
}
