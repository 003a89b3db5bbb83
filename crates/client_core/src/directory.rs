//! Representative candidates used for name-assisted lookup while editing rows.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{domain::ApoderadoId, protocol::Apoderado};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::{api::RegistroApi, lifecycle::Liveness};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryState {
    pub loading: bool,
    pub apoderados: Vec<Apoderado>,
}

#[derive(Clone)]
pub struct ApoderadoDirectory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    api: Arc<dyn RegistroApi>,
    liveness: Liveness,
    load_started: AtomicBool,
    state: watch::Sender<DirectoryState>,
}

impl ApoderadoDirectory {
    pub fn new(api: Arc<dyn RegistroApi>, liveness: Liveness) -> Self {
        let (state, _) = watch::channel(DirectoryState::default());
        Self {
            inner: Arc::new(DirectoryInner {
                api,
                liveness,
                load_started: AtomicBool::new(false),
                state,
            }),
        }
    }

    /// Loads the candidate list on first call; later calls return at once.
    /// A failed load is logged and leaves the list empty.
    pub async fn activate(&self) {
        if self.inner.load_started.swap(true, Ordering::AcqRel) {
            debug!("apoderado directory already loaded");
            return;
        }

        self.inner.state.send_modify(|state| state.loading = true);
        let result = self.inner.api.list_apoderados().await;
        if !self.inner.liveness.is_active() {
            debug!("page detached; dropping apoderado list");
            return;
        }

        match result {
            Ok(apoderados) => {
                info!(count = apoderados.len(), "loaded apoderados");
                self.inner.state.send_modify(|state| {
                    state.apoderados = apoderados;
                    state.loading = false;
                });
            }
            Err(err) => {
                error!(error = %err, "failed to load apoderados");
                self.inner.state.send_modify(|state| {
                    state.apoderados.clear();
                    state.loading = false;
                });
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn apoderados(&self) -> Vec<Apoderado> {
        self.inner.state.borrow().apoderados.clone()
    }

    /// Exact-name match, first candidate wins.
    pub fn resolve_by_name(&self, nombre: &str) -> Option<ApoderadoId> {
        resolve_apoderado(&self.inner.state.borrow().apoderados, nombre)
    }

    /// Candidate names containing `query`, case-insensitive, in load order.
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        self.inner
            .state
            .borrow()
            .apoderados
            .iter()
            .filter(|apoderado| needle.is_empty() || apoderado.nombre.to_lowercase().contains(&needle))
            .map(|apoderado| apoderado.nombre.clone())
            .collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<DirectoryState> {
        self.inner.state.subscribe()
    }
}

pub(crate) fn resolve_apoderado(apoderados: &[Apoderado], nombre: &str) -> Option<ApoderadoId> {
    if nombre.is_empty() {
        return None;
    }
    apoderados
        .iter()
        .find(|apoderado| apoderado.nombre == nombre)
        .map(|apoderado| apoderado.id.clone())
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
