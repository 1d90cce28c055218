/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
//! Provider-keyed adapter slots.
//!
//! Adapters are built on first use only: dispatching an Izly account never
//! constructs the Pronote adapter, so a provider that is slow or broken to
//! initialise only affects its own accounts.

use crate::application::models::provider::{
    Ard, EcoleDirecte, Izly, Multi, Pronote, Skolengo, Turboself,
};
use crate::application::models::service::AccountService;
use crate::config::Config;
use crate::error::{ReloadError, ReloadResult};
use crate::session::interface::{
    AuthenticationReloader, ClientReloader, InstanceReloader, SessionReloader,
};
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

type Loader<T> = Box<dyn Fn() -> BoxFuture<'static, ReloadResult<Arc<T>>> + Send + Sync>;

fn boxed<T, F, Fut>(factory: F) -> Loader<T>
where
    T: ?Sized + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ReloadResult<Arc<T>>> + Send + 'static,
{
    Box::new(move || -> BoxFuture<'static, ReloadResult<Arc<T>>> { Box::pin(factory()) })
}

/// One provider's adapter, constructed the first time it is resolved.
pub(crate) struct LazyAdapter<T: ?Sized> {
    service: AccountService,
    loader: Option<Loader<T>>,
    cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized + Send + Sync> LazyAdapter<T> {
    fn empty(service: AccountService) -> Self {
        Self {
            service,
            loader: None,
            cell: OnceCell::new(),
        }
    }

    /// Returns the adapter, building it if this is the first resolution.
    ///
    /// A failed build leaves the slot empty; the next call tries again.
    pub(crate) async fn resolve(&self) -> ReloadResult<Arc<T>> {
        let loader = self.loader.as_ref().ok_or(ReloadError::AdapterUnavailable {
            service: self.service,
        })?;

        let adapter = self
            .cell
            .get_or_try_init(|| async {
                debug!(service = %self.service, "loading adapter");
                loader().await
            })
            .await?;

        Ok(Arc::clone(adapter))
    }

    fn is_registered(&self) -> bool {
        self.loader.is_some()
    }

    fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    fn disable(&mut self) {
        if self.loader.take().is_some() {
            debug!(service = %self.service, "adapter disabled by configuration");
        }
    }
}

/// Adapter slots for every provider that needs one.
pub struct AdapterRegistry {
    pub(crate) pronote: LazyAdapter<dyn InstanceReloader<Pronote>>,
    pub(crate) turboself: LazyAdapter<dyn AuthenticationReloader<Turboself>>,
    pub(crate) ard: LazyAdapter<dyn ClientReloader<Ard>>,
    pub(crate) izly: LazyAdapter<dyn ClientReloader<Izly>>,
    pub(crate) skolengo: LazyAdapter<dyn SessionReloader<Skolengo>>,
    pub(crate) ecole_directe: LazyAdapter<dyn SessionReloader<EcoleDirecte>>,
    pub(crate) multi: LazyAdapter<dyn InstanceReloader<Multi>>,
}

impl AdapterRegistry {
    pub fn builder() -> AdapterRegistryBuilder {
        AdapterRegistryBuilder {
            registry: Self::empty(),
            enabled: None,
        }
    }

    /// Registry without any adapter. Only local and unrecognized accounts
    /// can be reloaded through it.
    pub fn empty() -> Self {
        Self {
            pronote: LazyAdapter::empty(AccountService::Pronote),
            turboself: LazyAdapter::empty(AccountService::Turboself),
            ard: LazyAdapter::empty(AccountService::Ard),
            izly: LazyAdapter::empty(AccountService::Izly),
            skolengo: LazyAdapter::empty(AccountService::Skolengo),
            ecole_directe: LazyAdapter::empty(AccountService::EcoleDirecte),
            multi: LazyAdapter::empty(AccountService::Multi),
        }
    }

    /// Whether an adapter factory is registered for `service`.
    pub fn is_registered(&self, service: AccountService) -> bool {
        match service {
            AccountService::Pronote => self.pronote.is_registered(),
            AccountService::Turboself => self.turboself.is_registered(),
            AccountService::Ard => self.ard.is_registered(),
            AccountService::Izly => self.izly.is_registered(),
            AccountService::Skolengo => self.skolengo.is_registered(),
            AccountService::EcoleDirecte => self.ecole_directe.is_registered(),
            AccountService::Multi => self.multi.is_registered(),
            AccountService::Local | AccountService::Unrecognized => false,
        }
    }

    /// Whether the adapter for `service` has been constructed yet.
    pub fn is_loaded(&self, service: AccountService) -> bool {
        match service {
            AccountService::Pronote => self.pronote.is_loaded(),
            AccountService::Turboself => self.turboself.is_loaded(),
            AccountService::Ard => self.ard.is_loaded(),
            AccountService::Izly => self.izly.is_loaded(),
            AccountService::Skolengo => self.skolengo.is_loaded(),
            AccountService::EcoleDirecte => self.ecole_directe.is_loaded(),
            AccountService::Multi => self.multi.is_loaded(),
            AccountService::Local | AccountService::Unrecognized => false,
        }
    }

    fn retain(&mut self, enabled: &[AccountService]) {
        let keep = |service: AccountService| enabled.contains(&service);
        if !keep(AccountService::Pronote) {
            self.pronote.disable();
        }
        if !keep(AccountService::Turboself) {
            self.turboself.disable();
        }
        if !keep(AccountService::Ard) {
            self.ard.disable();
        }
        if !keep(AccountService::Izly) {
            self.izly.disable();
        }
        if !keep(AccountService::Skolengo) {
            self.skolengo.disable();
        }
        if !keep(AccountService::EcoleDirecte) {
            self.ecole_directe.disable();
        }
        if !keep(AccountService::Multi) {
            self.multi.disable();
        }
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<AccountService> = AccountService::ALL
            .into_iter()
            .filter(|service| self.is_registered(*service))
            .collect();
        f.debug_struct("AdapterRegistry")
            .field("registered", &registered)
            .finish()
    }
}

/// Collects adapter factories. A factory runs at most once successfully, the
/// first time an account of its service is reloaded.
pub struct AdapterRegistryBuilder {
    registry: AdapterRegistry,
    enabled: Option<Vec<AccountService>>,
}

impl AdapterRegistryBuilder {
    /// Restricts the registry to the services enabled in `config`.
    pub fn config(mut self, config: &Config) -> Self {
        self.enabled = Some(config.enabled_services.clone());
        self
    }

    pub fn pronote<A, F, Fut>(mut self, factory: F) -> Self
    where
        A: InstanceReloader<Pronote> + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ReloadResult<A>> + Send + 'static,
    {
        self.registry.pronote.loader = Some(boxed(move || {
            let pending = factory();
            async move {
                let adapter: Arc<dyn InstanceReloader<Pronote>> = Arc::new(pending.await?);
                Ok::<_, ReloadError>(adapter)
            }
        }));
        self
    }

    pub fn turboself<A, F, Fut>(mut self, factory: F) -> Self
    where
        A: AuthenticationReloader<Turboself> + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ReloadResult<A>> + Send + 'static,
    {
        self.registry.turboself.loader = Some(boxed(move || {
            let pending = factory();
            async move {
                let adapter: Arc<dyn AuthenticationReloader<Turboself>> =
                    Arc::new(pending.await?);
                Ok::<_, ReloadError>(adapter)
            }
        }));
        self
    }

    pub fn ard<A, F, Fut>(mut self, factory: F) -> Self
    where
        A: ClientReloader<Ard> + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ReloadResult<A>> + Send + 'static,
    {
        self.registry.ard.loader = Some(boxed(move || {
            let pending = factory();
            async move {
                let adapter: Arc<dyn ClientReloader<Ard>> = Arc::new(pending.await?);
                Ok::<_, ReloadError>(adapter)
            }
        }));
        self
    }

    pub fn izly<A, F, Fut>(mut self, factory: F) -> Self
    where
        A: ClientReloader<Izly> + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ReloadResult<A>> + Send + 'static,
    {
        self.registry.izly.loader = Some(boxed(move || {
            let pending = factory();
            async move {
                let adapter: Arc<dyn ClientReloader<Izly>> = Arc::new(pending.await?);
                Ok::<_, ReloadError>(adapter)
            }
        }));
        self
    }

    pub fn skolengo<A, F, Fut>(mut self, factory: F) -> Self
    where
        A: SessionReloader<Skolengo> + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ReloadResult<A>> + Send + 'static,
    {
        self.registry.skolengo.loader = Some(boxed(move || {
            let pending = factory();
            async move {
                let adapter: Arc<dyn SessionReloader<Skolengo>> = Arc::new(pending.await?);
                Ok::<_, ReloadError>(adapter)
            }
        }));
        self
    }

    pub fn ecole_directe<A, F, Fut>(mut self, factory: F) -> Self
    where
        A: SessionReloader<EcoleDirecte> + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ReloadResult<A>> + Send + 'static,
    {
        self.registry.ecole_directe.loader = Some(boxed(move || {
            let pending = factory();
            async move {
                let adapter: Arc<dyn SessionReloader<EcoleDirecte>> = Arc::new(pending.await?);
                Ok::<_, ReloadError>(adapter)
            }
        }));
        self
    }

    pub fn multi<A, F, Fut>(mut self, factory: F) -> Self
    where
        A: InstanceReloader<Multi> + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ReloadResult<A>> + Send + 'static,
    {
        self.registry.multi.loader = Some(boxed(move || {
            let pending = factory();
            async move {
                let adapter: Arc<dyn InstanceReloader<Multi>> = Arc::new(pending.await?);
                Ok::<_, ReloadError>(adapter)
            }
        }));
        self
    }

    pub fn build(self) -> AdapterRegistry {
        let mut registry = self.registry;
        if let Some(enabled) = self.enabled {
            registry.retain(&enabled);
        }
        registry
    }
}
