//! HTTP client utilities for testing.
//!
//! This module provides helper functions for making HTTP requests to the kona server during tests.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a default test client
pub fn create_test_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to build test HTTP client")
}

/// Build a URL for a kona server endpoint
pub fn build_url(addr: &SocketAddr, path: &str) -> Url {
    format!("http://{}{}", addr, path)
        .parse()
        .expect("Failed to parse URL")
}

/// Make a GET request to the kona server
pub async fn get(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    let url = build_url(addr, path);
    println!("Making request to: {}", url);
    Ok(client.get(url).send().await?)
}

/// Make a GET request and parse the JSON response
pub async fn get_json<T: DeserializeOwned>(
    addr: &SocketAddr,
    path: &str,
) -> Result<T, Box<dyn Error>> {
    let response = get(addr, path).await?;

    if response.status() != StatusCode::OK {
        return Err(format!(
            "Unexpected status code: {}, body: {:?}",
            response.status(),
            response.text().await
        )
        .into());
    }

    Ok(response.json::<T>().await?)
}

/// Make a GET request and return the status with the raw body
pub async fn get_text(addr: &SocketAddr, path: &str) -> Result<(StatusCode, String), Box<dyn Error>> {
    let response = get(addr, path).await?;
    let status = response.status();
    Ok((status, response.text().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let addr: SocketAddr = ([127, 0, 0, 1], 8000).into();
        let url = build_url(&addr, "/api/v1.0/tobs");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1.0/tobs");
    }
}
