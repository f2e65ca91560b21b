pub mod error;
pub mod types;

pub use error::{Result, SwpcError};
pub use types::{latest, Alert, BzReading, FluxReading, KpIndex};

use serde::de::DeserializeOwned;

const ALERTS_URL: &str = "https://services.swpc.noaa.gov/json/alerts.json";
const KP_INDEX_URL: &str = "https://services.swpc.noaa.gov/json/planetary_k_index_1m.json";
const SOLAR_WIND_URL: &str = "https://services.swpc.noaa.gov/products/summary/dscovr-solar-wind.json";

/// Feed URLs. Defaults to the public NOAA endpoints.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub alerts: String,
    pub kp_index: String,
    pub solar_wind: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            alerts: ALERTS_URL.to_string(),
            kp_index: KP_INDEX_URL.to_string(),
            solar_wind: SOLAR_WIND_URL.to_string(),
        }
    }
}

pub struct SwpcClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl Default for SwpcClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SwpcClient {
    pub fn new() -> Self {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// All currently published alerts, watches and warnings.
    pub async fn alerts(&self) -> Result<Vec<Alert>> {
        self.get_json(&self.endpoints.alerts).await
    }

    /// One-minute planetary K-index, oldest first.
    pub async fn kp_index(&self) -> Result<Vec<KpIndex>> {
        self.get_json(&self.endpoints.kp_index).await
    }

    /// DSCOVR solar wind magnetic field summary.
    pub async fn solar_wind(&self) -> Result<Vec<BzReading>> {
        self.get_json(&self.endpoints.solar_wind).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SwpcError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        let parsed = serde_json::from_str(&body)?;
        tracing::debug!(url, bytes = body.len(), "Fetched SWPC feed");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port; returns its URL.
    async fn serve_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/feed.json")
    }

    fn client_for_kp(url: String) -> SwpcClient {
        SwpcClient::with_endpoints(Endpoints {
            kp_index: url,
            ..Endpoints::default()
        })
    }

    #[test]
    fn default_endpoints_point_at_noaa() {
        let client = SwpcClient::new();
        let endpoints = client.endpoints();
        assert_eq!(endpoints.alerts, ALERTS_URL);
        assert!(endpoints.kp_index.ends_with("planetary_k_index_1m.json"));
        assert!(endpoints.solar_wind.ends_with("dscovr-solar-wind.json"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let client = SwpcClient::with_endpoints(Endpoints {
            alerts: "http://127.0.0.1:9/alerts.json".to_string(),
            ..Endpoints::default()
        });

        let err = client.alerts().await.unwrap_err();
        assert!(matches!(err, SwpcError::Network(_)));
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let url = serve_once("503 Service Unavailable", "{}").await;
        let err = client_for_kp(url.clone()).kp_index().await.unwrap_err();

        match err {
            SwpcError::Api { status, url: failed } => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let url = serve_once("200 OK", "{bad}").await;
        let err = client_for_kp(url).kp_index().await.unwrap_err();
        assert!(matches!(err, SwpcError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn well_formed_body_parses() {
        let url = serve_once(
            "200 OK",
            r#"[{"time_tag": "2025-06-01T12:00:00", "kp_index": 7.5}]"#,
        )
        .await;
        let readings = client_for_kp(url).kp_index().await.unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].kp, 7.5);
    }
}
