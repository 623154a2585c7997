use crate::client::Client;
use crate::errors::Result;
use crate::http::{segment, Params};
use crate::models::{BillingResponse, GetBillingOptions};

impl Client {
    /// Get billing events and usage for an account.
    pub async fn get_billing(
        &self,
        account_id: &str,
        opts: &GetBillingOptions,
    ) -> Result<BillingResponse> {
        let params = Params::new()
            .set_opt("start_date", opts.start_date.as_deref())
            .set_opt("end_date", opts.end_date.as_deref())
            .set_opt("type", opts.event_type.as_deref())
            .set_opt("tags", opts.tags.as_deref());
        self.http
            .get(&format!("/api/v1/billing/{}", segment(account_id)), params)
            .await
    }
}
