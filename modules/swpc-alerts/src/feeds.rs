// FeedSource abstracts the three SWPC fetches so the monitor can be driven
// by MockFeeds in tests: no network, no sleeping.

use anyhow::Result;
use async_trait::async_trait;

use swpc_client::{Alert, BzReading, KpIndex, SwpcClient};

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Categorical alerts, watches and warnings.
    async fn alerts(&self) -> Result<Vec<Alert>>;

    /// Planetary K-index, oldest first.
    async fn kp_index(&self) -> Result<Vec<KpIndex>>;

    /// Solar wind Bz (GSM), oldest first.
    async fn solar_wind(&self) -> Result<Vec<BzReading>>;
}

#[async_trait]
impl FeedSource for SwpcClient {
    async fn alerts(&self) -> Result<Vec<Alert>> {
        Ok(SwpcClient::alerts(self).await?)
    }

    async fn kp_index(&self) -> Result<Vec<KpIndex>> {
        Ok(SwpcClient::kp_index(self).await?)
    }

    async fn solar_wind(&self) -> Result<Vec<BzReading>> {
        Ok(SwpcClient::solar_wind(self).await?)
    }
}
