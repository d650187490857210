//! Service and endpoint API methods for [`KeystoneClient`] (v2 admin API).
//!
//! Services live under the `OS-KSADM` extension with `OS-KSADM:service`
//! envelopes; endpoints carry the public/internal/admin URL triple.

use crate::client::KeystoneClient;
use crate::endpoints::{resource, v2};
use crate::error::Result;
use crate::models::v2::{CreateEndpointParams, CreateServiceParams, Endpoint, Service};

impl KeystoneClient {
    pub async fn list_services(&mut self) -> Result<Vec<Service>> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::list(&self.transport, &__base, &__token, v2::SERVICES, &[]).await
        )
    }

    pub async fn get_service(&mut self, service_id: &str) -> Result<Service> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::get(&self.transport, &__base, &__token, v2::SERVICES, service_id).await
        )
    }

    pub async fn create_service(&mut self, params: &CreateServiceParams) -> Result<Service> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::create(&self.transport, &__base, &__token, v2::SERVICES, params).await
        )
    }

    pub async fn delete_service(&mut self, service_id: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::delete(&self.transport, &__base, &__token, v2::SERVICES, service_id).await
        )
    }

    pub async fn list_endpoints(&mut self) -> Result<Vec<Endpoint>> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::list(&self.transport, &__base, &__token, v2::ENDPOINTS, &[]).await
        )
    }

    pub async fn create_endpoint(&mut self, params: &CreateEndpointParams) -> Result<Endpoint> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::create(&self.transport, &__base, &__token, v2::ENDPOINTS, params).await
        )
    }

    pub async fn delete_endpoint(&mut self, endpoint_id: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::delete(&self.transport, &__base, &__token, v2::ENDPOINTS, endpoint_id).await
        )
    }
}
