//! Tenant scoping over an ambient tenant context.

use crate::criteria::Predicate;
use fedmirror_core::TenantId;
use parking_lot::RwLock;

/// Descriptor for a queryable entity type.
///
/// Implementations declare the collection the type lives in and whether
/// its records belong to a tenant. The defaults describe an unscoped
/// type; tenant-scoped types override `TENANT_SCOPED` (and
/// `TENANT_FIELD` when the owning-tenant field is named differently).
pub trait EntityKind {
    /// Collection name the entity type is stored under.
    const COLLECTION: &'static str;
    /// Whether records of this type belong to a tenant.
    const TENANT_SCOPED: bool = false;
    /// Field holding the owning tenant.
    const TENANT_FIELD: &'static str = "tenant_id";
}

/// Read-only lookup of the ambient current tenant.
///
/// The lookup is an explicit `Option`: a missing context is `None`, not
/// an error. Scoping at this layer is fail-open to unscoped; callers
/// that need fail-closed behavior enforce it with their own context.
pub trait TenantContext {
    /// Returns the current tenant, if one is set.
    fn current_tenant(&self) -> Option<TenantId>;
}

/// A context with no tenant, for single-tenant deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTenant;

impl TenantContext for NoTenant {
    fn current_tenant(&self) -> Option<TenantId> {
        None
    }
}

/// A shared, mutable tenant holder.
///
/// Embedding applications set the tenant at the start of a request or
/// job and clear it afterwards; the query layer only reads it.
#[derive(Debug, Default)]
pub struct SharedTenantContext {
    current: RwLock<Option<TenantId>>,
}

impl SharedTenantContext {
    /// Creates a holder with no tenant set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current tenant.
    pub fn set(&self, tenant: TenantId) {
        *self.current.write() = Some(tenant);
    }

    /// Clears the current tenant.
    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

impl TenantContext for SharedTenantContext {
    fn current_tenant(&self) -> Option<TenantId> {
        self.current.read().clone()
    }
}

/// Returns true when queries for `T` must be restricted to the current
/// tenant: the type is tenant-scoped and an ambient tenant is present.
#[must_use]
pub fn requires_tenant_scope<T: EntityKind>(ctx: &dyn TenantContext) -> bool {
    T::TENANT_SCOPED && ctx.current_tenant().is_some()
}

/// Builds the tenant-equality predicate for `T`, when scoping applies.
#[must_use]
pub fn tenant_criteria<T: EntityKind>(ctx: &dyn TenantContext) -> Option<Predicate> {
    if !T::TENANT_SCOPED {
        return None;
    }
    ctx.current_tenant()
        .map(|tenant| Predicate::eq(T::TENANT_FIELD, tenant))
}
