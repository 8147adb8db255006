use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bidwin::bids::Bid;
use log::info;
use rand::{seq::SliceRandom, Rng};
use tokio::net::TcpListener;

const PRIMES: [i64; 9] = [2, 3, 5, 7, 11, 13, 17, 19, 23];
const FIBO: [i64; 8] = [1, 1, 2, 3, 5, 8, 13, 21];
const FACT: [i64; 4] = [1, 2, 6, 24];
const RAND: [i64; 13] = [5, 17, 3, 19, 76, 24, 1, 5, 10, 34, 8, 27, 7];

/// Answers after up to a second, fails one call in ten, shuffles the rest.
async fn serve_bids(prices: &'static [i64]) -> Response {
    let (latency, unavailable, bids) = {
        let mut rng = rand::rng();
        let mut bids: Vec<Bid> = prices.iter().copied().map(Bid::new).collect();
        bids.shuffle(&mut rng);
        (rng.random_range(0..1000), rng.random_range(0..100) < 10, bids)
    };
    tokio::time::sleep(Duration::from_millis(latency)).await;
    if unavailable {
        return (StatusCode::SERVICE_UNAVAILABLE, "service unavailable").into_response();
    }
    Json(bids).into_response()
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let addr = env::var("TESTSOURCES_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("TESTSOURCES_ADDR is not a socket address: {addr:?}"))?;

    let app = Router::new()
        .route("/primes", get(|| serve_bids(&PRIMES)))
        .route("/fibo", get(|| serve_bids(&FIBO)))
        .route("/fact", get(|| serve_bids(&FACT)))
        .route("/rand", get(|| serve_bids(&RAND)))
        .route("/empty", get(|| serve_bids(&[])));

    let listener = TcpListener::bind(addr).await?;
    info!("Listen on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
