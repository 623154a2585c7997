use serde_json::{json, Map, Value};

use crate::client::Client;
use crate::errors::Result;
use crate::http::{Params, Request};
use crate::models::{Page, PaginationOptions, SearchOptions, SearchResponse};

impl Client {
    /// Run a similarity search. Results come back immediately.
    pub async fn search(&self, opts: &SearchOptions) -> Result<SearchResponse> {
        let mut body = Map::new();
        if let Some(ref url) = opts.media_url {
            body.insert("media_url".into(), json!(url));
        }
        if let Some(ref media) = opts.media {
            body.insert("media".into(), json!(media));
        }
        if let Some(tier) = opts.tier {
            body.insert("type".into(), json!(tier));
        }
        if let Some(ref tags) = opts.tags {
            body.insert("scope".into(), json!({ "tags": tags }));
        }

        let params = Params::new().set_opt("limit", opts.limit.filter(|l| *l > 0));
        let request = Request::post("/api/v1/search")
            .params(params)
            .json(Value::Object(body));

        Ok(serde_json::from_value(self.http.execute(request).await?)?)
    }

    /// List previous searches on your account.
    pub async fn list_searches(&self, opts: &PaginationOptions) -> Result<Page<Value>> {
        let params = Params::new()
            .set_opt("cursor", opts.cursor.as_deref())
            .set_opt("limit", opts.limit);
        self.http.get_list("/api/v1/search", params).await
    }
}
