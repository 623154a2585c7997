use crate::client::Client;
use crate::errors::Result;
use crate::http::{segment, Params};
use crate::models::Rights;

impl Client {
    /// Get C2PA, IPTC, and licensing information for a media asset.
    pub async fn get_rights(&self, media_id: &str) -> Result<Rights> {
        self.http
            .get(&format!("/api/v1/rights/{}", segment(media_id)), Params::new())
            .await
    }
}
