use crate::client::Client;
use crate::errors::Result;
use crate::http::Params;
use crate::models::{Algorithm, ListAlgorithmsOptions};

impl Client {
    /// List available algorithms, optionally filtered by category or media type.
    pub async fn list_algorithms(&self, opts: &ListAlgorithmsOptions) -> Result<Vec<Algorithm>> {
        let params = Params::new()
            .set_opt("category", opts.category)
            .set_opt("media_type", opts.media_type);
        self.http.get_one("/api/v1/algorithms", params).await
    }
}
