//! Access zone calls

use crate::{
    Result,
    session::PapiTransport,
    types::{AccessZone, ApiRequest},
    wrapper::conn::ClusterConnection,
};

impl<T: PapiTransport> ClusterConnection<T> {
    /// Lists all access zones on the cluster
    pub async fn get_access_zone_list(&mut self) -> Result<Vec<AccessZone>> {
        let request = ApiRequest::get(self.platform("zones"));
        self.send_field(&request, "zones").await
    }
}
