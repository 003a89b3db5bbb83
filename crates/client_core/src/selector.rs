//! The active proceso every registration is attached to.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{domain::ProcesoId, protocol::Proceso};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::{api::RegistroApi, lifecycle::Liveness};

pub const PROCESOS_LOAD_ERROR: &str = "No se pudieron cargar los procesos.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorState {
    pub loading: bool,
    pub error: Option<String>,
    pub procesos: Vec<Proceso>,
    pub selected_id: Option<ProcesoId>,
}

impl SelectorState {
    pub fn selected(&self) -> Option<&Proceso> {
        let selected_id = self.selected_id.as_ref()?;
        self.procesos.iter().find(|proceso| &proceso.id == selected_id)
    }
}

#[derive(Clone)]
pub struct ProcesoSelector {
    inner: Arc<SelectorInner>,
}

struct SelectorInner {
    api: Arc<dyn RegistroApi>,
    liveness: Liveness,
    load_started: AtomicBool,
    state: watch::Sender<SelectorState>,
}

impl ProcesoSelector {
    pub fn new(api: Arc<dyn RegistroApi>, liveness: Liveness) -> Self {
        let (state, _) = watch::channel(SelectorState::default());
        Self {
            inner: Arc::new(SelectorInner {
                api,
                liveness,
                load_started: AtomicBool::new(false),
                state,
            }),
        }
    }

    /// Fetches the proceso list exactly once per selector. Selects the first
    /// proceso when the user has not picked one yet.
    pub async fn activate(&self) {
        if self.inner.load_started.swap(true, Ordering::AcqRel) {
            debug!("proceso list already loaded");
            return;
        }

        self.inner.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        let result = self.inner.api.list_procesos().await;
        if !self.inner.liveness.is_active() {
            debug!("page detached; dropping proceso list");
            return;
        }

        match result {
            Ok(procesos) => {
                info!(count = procesos.len(), "loaded procesos");
                self.inner.state.send_modify(|state| {
                    if state.selected_id.is_none() {
                        state.selected_id = procesos.first().map(|proceso| proceso.id.clone());
                    }
                    state.procesos = procesos;
                    state.loading = false;
                });
            }
            Err(err) => {
                error!(error = %err, "failed to load procesos");
                self.inner.state.send_modify(|state| {
                    state.procesos.clear();
                    state.error = Some(PROCESOS_LOAD_ERROR.to_string());
                    state.loading = false;
                });
            }
        }
    }

    /// Sets the selection; a blank id clears it. Never triggers a reload.
    pub fn select(&self, id: Option<ProcesoId>) {
        let id = id.filter(|id| !id.is_blank());
        self.inner.state.send_if_modified(|state| {
            if state.selected_id == id {
                return false;
            }
            state.selected_id = id;
            true
        });
    }

    pub fn selected_id(&self) -> Option<ProcesoId> {
        self.inner.state.borrow().selected_id.clone()
    }

    pub fn selected(&self) -> Option<Proceso> {
        self.inner.state.borrow().selected().cloned()
    }

    pub fn procesos(&self) -> Vec<Proceso> {
        self.inner.state.borrow().procesos.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    pub fn snapshot(&self) -> SelectorState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectorState> {
        self.inner.state.subscribe()
    }
}

/// Option text for a proceso: its number, then its type when known.
pub fn display_label(proceso: &Proceso) -> String {
    match proceso.tipo_proceso.as_deref().map(str::trim) {
        Some(tipo) if !tipo.is_empty() => format!("{} · {}", proceso.numero_proceso, tipo),
        _ => proceso.numero_proceso.clone(),
    }
}

#[cfg(test)]
#[path = "tests/selector_tests.rs"]
mod tests;
