use async_trait::async_trait;

use crate::core::Result;

/// Tenant-scoped CRUD operations shared by the simple master-data repositories.
///
/// Every read and write is filtered by `tenant_id`; a row owned by another
/// tenant is indistinguishable from a missing one.
#[async_trait]
pub trait TenantRepository<T>: Send + Sync {
    /// Insert a new entity (id and timestamps already assigned)
    async fn create(&self, entity: &T) -> Result<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<T>>;

    /// Overwrite an existing entity, returning `None` if it does not exist
    async fn update(&self, entity: &T) -> Result<Option<T>>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&self, id: &str, tenant_id: &str) -> Result<bool>;

    /// List entities, newest first
    async fn list(&self, tenant_id: &str) -> Result<Vec<T>>;

    /// Count entities owned by the tenant
    async fn count(&self, tenant_id: &str) -> Result<i64>;
}
