//! sample.list.v1 end to end: RPC -> Session -> PostgreSQL

mod common;

use common::{env_config, RecordingLog};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::HttpClientBuilder;
use jsonrpsee::rpc_params;
use pgstarter_api_rpc::rate_limiter::RateLimiter;
use pgstarter_api_rpc::types::{ResponseEnvelope, METHOD_SAMPLE_LIST};
use pgstarter_api_rpc::{RpcServer, RpcServerConfig};
use pgstarter_core::application::AppState;
use pgstarter_infra_postgres::{build_database, create_pool};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
#[ignore = "requires database"]
async fn test_sample_list_returns_envelope() {
    let config = env_config();

    // Seed the template's sample table
    let admin = create_pool(&config);
    sqlx::raw_sql(
        "CREATE TABLE IF NOT EXISTS mst_tweet (id serial PRIMARY KEY, body text NOT NULL); \
         DELETE FROM mst_tweet; \
         INSERT INTO mst_tweet (body) VALUES ('first'), ('second');",
    )
    .execute(&admin)
    .await
    .expect("seed failed");

    let state = AppState::new(build_database(&config, Arc::new(RecordingLog::default())));
    let rpc_config = RpcServerConfig {
        port: 0,
        ..Default::default()
    };
    let (addr, handle) = RpcServer::new(rpc_config, state, RateLimiter::new(10, 10))
        .start()
        .await
        .expect("server start failed");

    let client = HttpClientBuilder::default()
        .build(format!("http://{}", addr))
        .unwrap();
    let envelope: ResponseEnvelope = client
        .request(METHOD_SAMPLE_LIST, rpc_params![])
        .await
        .unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.message, "success");
    let bodies: Vec<serde_json::Value> = envelope
        .data
        .unwrap()
        .iter()
        .map(|row| row["body"].clone())
        .collect();
    assert_eq!(bodies, vec![json!("first"), json!("second")]);

    handle.stop().unwrap();
    sqlx::raw_sql("DROP TABLE mst_tweet")
        .execute(&admin)
        .await
        .expect("cleanup failed");
}
