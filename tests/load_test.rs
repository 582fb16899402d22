//! Concurrent load against a shared catalog.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_concurrent_estimates_agree() {
    let server = common::start_server(common::lagos_zones(), common::lagos_addresses()).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = reqwest::Client::new();
    let url = server.url("/api/v1/delivery/estimate");
    let start = Instant::now();

    let mut tasks = Vec::new();
    for i in 0..concurrency {
        let client = client.clone();
        let url = url.clone();
        // Alternate exact and fuzzy addresses across tasks.
        let address_id = if i % 2 == 0 { "a1" } else { "a2" };
        tasks.push(tokio::spawn(async move {
            let mut bodies = Vec::with_capacity(requests_per_task);
            for _ in 0..requests_per_task {
                let res = client
                    .post(&url)
                    .header("x-owner-id", "u1")
                    .json(&json!({ "addressId": address_id }))
                    .send()
                    .await
                    .expect("server unreachable");
                assert!(res.status().is_success());
                let body: Value = res.json().await.unwrap();
                bodies.push((address_id, body.to_string()));
            }
            bodies
        }));
    }

    let mut distinct = HashSet::new();
    let mut completed = 0;
    for task in tasks {
        for result in task.await.unwrap() {
            distinct.insert(result);
            completed += 1;
        }
    }

    let elapsed = start.elapsed();
    println!("{total_requests} estimates in {elapsed:?}");

    assert_eq!(completed, total_requests);
    // One distinct response per address: matching is deterministic.
    assert_eq!(distinct.len(), 2);
    assert!(elapsed < Duration::from_secs(30));
}
