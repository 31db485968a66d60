// PgRow -> QueryRow decoding
//
// Rows arrive in text format (simple-query path). Known types are decoded
// into native JSON values; everything else keeps the server's text form.

use pgstarter_core::domain::QueryRow;
use serde_json::{Number, Value};
use sqlx::postgres::PgRow;
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::{Decimal, Uuid};
use sqlx::{Column, Decode, Postgres, Row, Type, TypeInfo};
use tracing::debug;

/// Convert a row into a column-name keyed map, keeping column order
pub fn row_to_map(row: &PgRow) -> QueryRow {
    let mut map = QueryRow::new();

    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name());
        map.insert(column.name().to_string(), value);
    }

    map
}

fn decode_column(row: &PgRow, idx: usize, type_name: &str) -> Value {
    let decoded: Result<Option<Value>, sqlx::Error> = match type_name {
        "BOOL" => get::<bool>(row, idx).map(|v| v.map(Value::Bool)),
        "INT2" => get::<i16>(row, idx).map(|v| v.map(Value::from)),
        "INT4" => get::<i32>(row, idx).map(|v| v.map(Value::from)),
        "INT8" => get::<i64>(row, idx).map(|v| v.map(Value::from)),
        "OID" => get::<sqlx::postgres::types::Oid>(row, idx).map(|v| v.map(|o| Value::from(o.0))),
        "FLOAT4" => get::<f32>(row, idx).map(|v| v.map(|f| float_value(f.to_string()))),
        "FLOAT8" => get::<f64>(row, idx).map(|v| v.map(|f| float_value(f.to_string()))),
        // Exact decimal text, scale included ("1.50")
        "NUMERIC" => get::<Decimal>(row, idx).map(|v| v.map(|d| Value::String(d.to_string()))),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CITEXT" | "CHAR" => {
            get::<String>(row, idx).map(|v| v.map(Value::String))
        }
        "JSON" | "JSONB" => get::<Value>(row, idx),
        "UUID" => get::<Uuid>(row, idx).map(|v| v.map(|u| Value::String(u.to_string()))),
        "TIMESTAMPTZ" => get::<DateTime<Utc>>(row, idx)
            .map(|v| v.map(|t| Value::String(t.to_rfc3339()))),
        "TIMESTAMP" => get::<NaiveDateTime>(row, idx).map(|v| {
            v.map(|t| Value::String(t.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
        }),
        "DATE" => get::<NaiveDate>(row, idx).map(|v| v.map(|d| Value::String(d.to_string()))),
        "TIME" => get::<NaiveTime>(row, idx).map(|v| v.map(|t| Value::String(t.to_string()))),
        "TEXT[]" | "VARCHAR[]" => get::<Vec<String>>(row, idx).map(|v| v.map(Value::from)),
        "INT4[]" => get::<Vec<i32>>(row, idx).map(|v| v.map(Value::from)),
        "INT8[]" => get::<Vec<i64>>(row, idx).map(|v| v.map(Value::from)),
        "BOOL[]" => get::<Vec<bool>>(row, idx).map(|v| v.map(Value::from)),
        _ => return server_text(row, idx, type_name),
    };

    match decoded {
        Ok(Some(value)) => value,
        Ok(None) => Value::Null,
        Err(e) => {
            debug!(column = idx, pg_type = type_name, error = %e, "Typed decode failed, using server text");
            server_text(row, idx, type_name)
        }
    }
}

fn get<'r, T>(row: &'r PgRow, idx: usize) -> Result<Option<T>, sqlx::Error>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get::<Option<T>, _>(idx)
}

/// The value exactly as the server rendered it (interval, inet, money, bytea, ...)
fn server_text(row: &PgRow, idx: usize, type_name: &str) -> Value {
    match row.try_get_unchecked::<Option<&str>, _>(idx) {
        Ok(Some(text)) => Value::String(text.to_string()),
        Ok(None) => Value::Null,
        Err(e) => {
            debug!(column = idx, pg_type = type_name, error = %e, "Undecodable column, using null");
            Value::Null
        }
    }
}

/// Floats go through their shortest display form so FLOAT4 is not widened
/// (0.1 stays 0.1). NaN and infinities have no JSON number and stay text.
fn float_value(display: String) -> Value {
    match display.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(display),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::connection::PgConnectionPool;
    use pgstarter_core::domain::QueryResult;
    use pgstarter_core::port::ConnectionPool;
    use serde_json::json;

    #[test]
    fn test_float_value_keeps_display_form() {
        assert_eq!(float_value(0.1f32.to_string()), json!(0.1));
        assert_eq!(float_value(1.5f64.to_string()), json!(1.5));
        assert_eq!(float_value(f32::NAN.to_string()), json!("NaN"));
        assert_eq!(float_value(f64::INFINITY.to_string()), json!("inf"));
    }

    // Decoding needs real rows from a server
    // Run with: DB_HOST=... cargo test -p pgstarter-infra-postgres -- --ignored

    async fn fetch(sql: &str) -> QueryResult {
        let pool = PgConnectionPool::from_config(&DbConfig::from_env().expect("DB_* env required"));
        let mut conn = pool.acquire().await.expect("checkout failed");
        conn.fetch_all(sql).await.expect("query failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_common_types_decode() {
        let rows = fetch(
            "SELECT 1::int2 AS a, 2::int4 AS b, 3::int8 AS c, 1.5::float8 AS d, \
             'hi'::text AS e, true AS f, NULL::text AS g, '{\"k\": 1}'::jsonb AS h, \
             DATE '2024-01-02' AS i, ARRAY['x','y'] AS j",
        )
        .await;
        let map = &rows[0];

        assert_eq!(map["a"], json!(1));
        assert_eq!(map["b"], json!(2));
        assert_eq!(map["c"], json!(3));
        assert_eq!(map["d"], json!(1.5));
        assert_eq!(map["e"], json!("hi"));
        assert_eq!(map["f"], json!(true));
        assert_eq!(map["g"], Value::Null);
        assert_eq!(map["h"], json!({"k": 1}));
        assert_eq!(map["i"], json!("2024-01-02"));
        assert_eq!(map["j"], json!(["x", "y"]));

        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_types_without_native_json_keep_server_text() {
        let rows = fetch(
            "SELECT 1.50::numeric AS price, interval '1 day' AS d, '10.0.0.1'::inet AS ip, \
             0.1::float4 AS f, 'hi'::text AS t, NULL::numeric AS missing",
        )
        .await;
        let map = &rows[0];

        assert_eq!(map["price"], json!("1.50"));
        assert_eq!(map["d"], json!("1 day"));
        assert_eq!(map["ip"], json!("10.0.0.1"));
        assert_eq!(map["f"], json!(0.1));
        assert_eq!(map["t"], json!("hi"));
        assert_eq!(map["missing"], Value::Null);
    }
}
