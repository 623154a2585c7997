use serde_json::{json, Value};

use crate::client::Client;
use crate::errors::Result;
use crate::http::{segment, Params};
use crate::models::{Media, Page, PaginationOptions, RegisterMediaOptions, UpdateMediaOptions};

fn media_path(id: &str) -> String {
    format!("/api/v1/media/{}", segment(id))
}

impl Client {
    /// Register and index media. Optionally applies watermarks on ingest.
    pub async fn register_media(&self, opts: &RegisterMediaOptions) -> Result<Media> {
        self.http.post_one("/api/v1/media", Some(opts)).await
    }

    /// List media assets in your library.
    pub async fn list_media(&self, opts: &PaginationOptions) -> Result<Page<Media>> {
        let params = Params::new()
            .set_opt("cursor", opts.cursor.as_deref())
            .set_opt("limit", opts.limit);
        self.http.get_list("/api/v1/media", params).await
    }

    pub async fn get_media(&self, id: &str) -> Result<Media> {
        self.http.get_one(&media_path(id), Params::new()).await
    }

    pub async fn update_media(&self, id: &str, opts: &UpdateMediaOptions) -> Result<Media> {
        self.http.patch_one(&media_path(id), opts).await
    }

    /// Permanently delete a media asset and all associated data.
    ///
    /// Returns the server's acknowledgement, e.g. `{"deleted": true}`.
    pub async fn delete_media(&self, id: &str) -> Result<Value> {
        self.http.delete_one(&media_path(id)).await
    }

    /// Full provenance chain for a media asset: applied algorithms, the C2PA
    /// manifest, membership inference results and searches it matched in.
    pub async fn media_provenance(&self, id: &str) -> Result<Value> {
        self.http
            .get_one(&format!("{}/provenance", media_path(id)), Params::new())
            .await
    }

    /// Identify a media asset by its embedded fingerprint and extract its C2PA chain.
    ///
    /// The result's `media_id` is null when the asset is not registered in your account.
    pub async fn identify_media(&self, media_url: &str) -> Result<Value> {
        let body = json!({ "media_url": media_url });
        self.http.post_one("/api/v1/media/identify", Some(&body)).await
    }
}
