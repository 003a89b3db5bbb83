//! The registration page: one proceso selector, one apoderado directory and
//! two independent forms.

use std::sync::Arc;

use tracing::info;

use crate::{
    api::RegistroApi,
    directory::ApoderadoDirectory,
    lifecycle::Liveness,
    selector::ProcesoSelector,
    submission::{AcreedorForm, DeudorForm, SubmissionController, SubmitError, SubmitReport},
};

pub struct PageController {
    selector: ProcesoSelector,
    directory: ApoderadoDirectory,
    deudores: SubmissionController<DeudorForm>,
    acreedores: SubmissionController<AcreedorForm>,
    liveness: Liveness,
}

impl PageController {
    pub fn new(api: Arc<dyn RegistroApi>) -> Self {
        let liveness = Liveness::new();
        let selector = ProcesoSelector::new(Arc::clone(&api), liveness.clone());
        let directory = ApoderadoDirectory::new(Arc::clone(&api), liveness.clone());
        let deudores =
            SubmissionController::new(Arc::clone(&api), directory.clone(), liveness.clone());
        let acreedores = SubmissionController::new(api, directory.clone(), liveness.clone());
        Self {
            selector,
            directory,
            deudores,
            acreedores,
            liveness,
        }
    }

    /// Loads both reference lists concurrently. Safe to call repeatedly.
    pub async fn activate(&self) {
        tokio::join!(self.selector.activate(), self.directory.activate());
    }

    pub fn selector(&self) -> &ProcesoSelector {
        &self.selector
    }

    pub fn directory(&self) -> &ApoderadoDirectory {
        &self.directory
    }

    pub fn deudores(&self) -> &SubmissionController<DeudorForm> {
        &self.deudores
    }

    pub fn acreedores(&self) -> &SubmissionController<AcreedorForm> {
        &self.acreedores
    }

    pub async fn submit_deudores(&self) -> Result<SubmitReport, SubmitError> {
        let proceso_id = self.selector.selected_id();
        self.deudores.submit(proceso_id.as_ref()).await
    }

    pub async fn submit_acreedores(&self) -> Result<SubmitReport, SubmitError> {
        let proceso_id = self.selector.selected_id();
        self.acreedores.submit(proceso_id.as_ref()).await
    }

    pub fn is_active(&self) -> bool {
        self.liveness.is_active()
    }

    /// Stops every component from applying results that arrive later.
    pub fn teardown(&self) {
        info!("registration page torn down");
        self.liveness.detach();
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
