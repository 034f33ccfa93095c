use std::sync::Arc;

use crate::core::{AppError, Currency, Result, TenantRepository};
use crate::modules::clients::models::{Client, ClientRequest};

/// Service for client business logic
pub struct ClientService {
    client_repo: Arc<dyn TenantRepository<Client>>,
    default_currency: Currency,
}

impl ClientService {
    pub fn new(client_repo: Arc<dyn TenantRepository<Client>>, default_currency: Currency) -> Self {
        Self {
            client_repo,
            default_currency,
        }
    }

    pub async fn create_client(&self, request: ClientRequest, tenant_id: &str) -> Result<Client> {
        let client = Client::new(request, tenant_id, self.default_currency)?;
        let created = self.client_repo.create(&client).await?;

        tracing::info!(client_id = %created.id, tenant_id, "Client created");
        Ok(created)
    }

    pub async fn get_client(&self, id: &str, tenant_id: &str) -> Result<Client> {
        self.client_repo
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    pub async fn list_clients(&self, tenant_id: &str) -> Result<Vec<Client>> {
        self.client_repo.list(tenant_id).await
    }

    pub async fn update_client(
        &self,
        id: &str,
        request: ClientRequest,
        tenant_id: &str,
    ) -> Result<Client> {
        let mut client = self.get_client(id, tenant_id).await?;
        client.apply(request)?;

        self.client_repo
            .update(&client)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    pub async fn delete_client(&self, id: &str, tenant_id: &str) -> Result<()> {
        if !self.client_repo.delete(id, tenant_id).await? {
            return Err(AppError::not_found("Client not found"));
        }

        tracing::info!(client_id = %id, tenant_id, "Client deleted");
        Ok(())
    }
}
