//! Batched registration of one form's rows against the selected proceso.

use std::{marker::PhantomData, sync::Arc};

use futures::{future::BoxFuture, stream::FuturesUnordered, StreamExt};
use shared::{
    domain::{ApoderadoId, EntityKind, ProcesoId},
    protocol::{AcreedorInsert, Apoderado, DeudorInsert},
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    api::RegistroApi,
    directory::{resolve_apoderado, ApoderadoDirectory},
    feedback::FeedbackState,
    lifecycle::Liveness,
    rows::{AcreedorRow, DeudorRow, DraftRow, PartyDraft, PartyPatch, RowCollection, RowKey},
};

pub const NO_PROCESO_MESSAGE: &str = "Selecciona un proceso primero.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission for this form is already in progress")]
    Busy,
    #[error("no proceso selected")]
    NoProceso,
    #[error("no rows with a name to register")]
    NoValidRows,
    #[error("remote creation failed: {message}")]
    Remote { message: String },
    #[error("page was torn down before the batch settled")]
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReport {
    pub kind: EntityKind,
    pub registered: usize,
}

/// Everything a form renders from. Rows and feedback live together so the
/// success path publishes the reset and the message in one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<R> {
    pub rows: RowCollection<R>,
    pub feedback: FeedbackState,
}

impl<R: DraftRow> Default for FormState<R> {
    fn default() -> Self {
        Self {
            rows: RowCollection::default(),
            feedback: FeedbackState::idle(),
        }
    }
}

/// Entity-specific half of a form: how a draft becomes a payload and which
/// remote call creates it.
pub trait EntityForm: Send + Sync + 'static {
    type Row: DraftRow;
    type Payload: Send + 'static;

    const KIND: EntityKind;

    fn payload(row: &Self::Row, proceso_id: &ProcesoId, apoderados: &[Apoderado]) -> Self::Payload;

    fn create(api: Arc<dyn RegistroApi>, payload: Self::Payload) -> BoxFuture<'static, anyhow::Result<()>>;
}

pub struct DeudorForm;

impl EntityForm for DeudorForm {
    type Row = DeudorRow;
    type Payload = DeudorInsert;

    const KIND: EntityKind = EntityKind::Deudor;

    fn payload(row: &DeudorRow, proceso_id: &ProcesoId, apoderados: &[Apoderado]) -> DeudorInsert {
        let party = &row.party;
        DeudorInsert {
            proceso_id: proceso_id.clone(),
            nombre: party.nombre.trim().to_string(),
            identificacion: party.identificacion.trim().to_string(),
            tipo_identificacion: optional_text(&party.tipo_identificacion),
            direccion: optional_text(&party.direccion),
            telefono: optional_text(&party.telefono),
            email: optional_text(&party.email),
            apoderado_id: apoderado_reference(party, apoderados),
        }
    }

    fn create(api: Arc<dyn RegistroApi>, payload: DeudorInsert) -> BoxFuture<'static, anyhow::Result<()>> {
        Box::pin(async move { api.create_deudor(payload).await.map(|_| ()) })
    }
}

pub struct AcreedorForm;

impl EntityForm for AcreedorForm {
    type Row = AcreedorRow;
    type Payload = AcreedorInsert;

    const KIND: EntityKind = EntityKind::Acreedor;

    fn payload(row: &AcreedorRow, proceso_id: &ProcesoId, apoderados: &[Apoderado]) -> AcreedorInsert {
        let party = &row.party;
        AcreedorInsert {
            proceso_id: proceso_id.clone(),
            nombre: party.nombre.trim().to_string(),
            identificacion: party.identificacion.trim().to_string(),
            tipo_identificacion: optional_text(&party.tipo_identificacion),
            direccion: optional_text(&party.direccion),
            telefono: optional_text(&party.telefono),
            email: optional_text(&party.email),
            apoderado_id: apoderado_reference(party, apoderados),
            monto_acreencia: parse_monto(&row.monto),
            tipo_acreencia: optional_text(&row.tipo_acreencia),
        }
    }

    fn create(api: Arc<dyn RegistroApi>, payload: AcreedorInsert) -> BoxFuture<'static, anyhow::Result<()>> {
        Box::pin(async move { api.create_acreedor(payload).await.map(|_| ()) })
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A blank or non-finite amount is sent as absent, never as zero.
pub fn parse_monto(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// The linked id, unless the typed name has since moved away from the linked
/// candidate; then the name is resolved again.
fn apoderado_reference(party: &PartyDraft, apoderados: &[Apoderado]) -> Option<ApoderadoId> {
    let nombre = party.apoderado_nombre.trim();
    let Some(id) = party.apoderado_id.as_ref().filter(|id| !id.is_blank()) else {
        return resolve_apoderado(apoderados, nombre);
    };
    let id = ApoderadoId::new(id.as_str().trim());
    match apoderados.iter().find(|candidate| candidate.id == id) {
        Some(linked) if !nombre.is_empty() && linked.nombre != nombre => {
            resolve_apoderado(apoderados, nombre)
        }
        _ => Some(id),
    }
}

pub fn no_rows_message(kind: EntityKind) -> String {
    format!("Agrega al menos un {} con nombre.", kind.noun())
}

pub fn success_message(kind: EntityKind, registered: usize) -> String {
    if registered == 1 {
        format!("1 {} registrado.", kind.noun())
    } else {
        format!("{registered} {}es registrados.", kind.noun())
    }
}

pub struct SubmissionController<F: EntityForm> {
    api: Arc<dyn RegistroApi>,
    directory: ApoderadoDirectory,
    liveness: Liveness,
    state: watch::Sender<FormState<F::Row>>,
    _form: PhantomData<F>,
}

impl<F: EntityForm> SubmissionController<F> {
    pub fn new(api: Arc<dyn RegistroApi>, directory: ApoderadoDirectory, liveness: Liveness) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            api,
            directory,
            liveness,
            state,
            _form: PhantomData,
        }
    }

    pub fn add_row(&self) -> RowKey {
        let row = F::Row::blank();
        let key = row.key();
        self.state.send_modify(|state| {
            state.rows.add(|| row);
        });
        key
    }

    pub fn update_row(&self, key: RowKey, patch: <F::Row as DraftRow>::Patch) -> bool {
        self.state.send_if_modified(|state| state.rows.update(key, patch))
    }

    pub fn remove_row(&self, key: RowKey) -> bool {
        self.state.send_if_modified(|state| state.rows.remove(key))
    }

    /// Records the typed representative name on a row and links the
    /// candidate whose name matches exactly, clearing any previous link.
    pub fn set_row_apoderado(&self, key: RowKey, nombre: &str) -> bool {
        let id = self.directory.resolve_by_name(nombre);
        self.update_row(key, PartyPatch::default().apoderado(nombre, id).into())
    }

    pub fn rows(&self) -> RowCollection<F::Row> {
        self.state.borrow().rows.clone()
    }

    pub fn feedback(&self) -> FeedbackState {
        self.state.borrow().feedback.clone()
    }

    pub fn snapshot(&self) -> FormState<F::Row> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<F::Row>> {
        self.state.subscribe()
    }

    /// Registers every row with a name against `proceso_id`.
    ///
    /// All creates are dispatched together and awaited as one batch. Any
    /// failure fails the whole batch and keeps the rows on screen; creates
    /// that did succeed are not rolled back. Only a fully successful batch
    /// resets the rows.
    pub async fn submit(&self, proceso_id: Option<&ProcesoId>) -> Result<SubmitReport, SubmitError> {
        if !self.liveness.is_active() {
            return Err(SubmitError::Detached);
        }

        let mut started: Result<(ProcesoId, Vec<F::Row>), SubmitError> = Err(SubmitError::Busy);
        self.state.send_if_modified(|state| {
            if state.feedback.is_loading() {
                return false;
            }
            let Some(proceso_id) = proceso_id.filter(|id| !id.is_blank()) else {
                state.feedback = FeedbackState::failed(NO_PROCESO_MESSAGE);
                started = Err(SubmitError::NoProceso);
                return true;
            };
            let valid_rows = state.rows.valid_rows();
            if valid_rows.is_empty() {
                state.feedback = FeedbackState::failed(no_rows_message(F::KIND));
                started = Err(SubmitError::NoValidRows);
                return true;
            }
            state.feedback = FeedbackState::loading();
            started = Ok((proceso_id.clone(), valid_rows));
            true
        });

        let (proceso_id, valid_rows) = match started {
            Ok(batch) => batch,
            Err(err) => {
                debug!(kind = F::KIND.noun(), error = %err, "submission rejected");
                return Err(err);
            }
        };

        let loading = LoadingGuard::new(&self.state);
        let apoderados = self.directory.apoderados();
        let total = valid_rows.len();
        info!(kind = F::KIND.noun(), proceso_id = %proceso_id, rows = total, "dispatching batch");

        let mut pending: FuturesUnordered<_> = valid_rows
            .iter()
            .map(|row| F::create(Arc::clone(&self.api), F::payload(row, &proceso_id, &apoderados)))
            .collect();

        let mut first_failure: Option<String> = None;
        let mut failed = 0usize;
        while let Some(result) = pending.next().await {
            if let Err(err) = result {
                failed += 1;
                warn!(kind = F::KIND.noun(), error = %err, "create call failed");
                if first_failure.is_none() {
                    first_failure = Some(failure_message(&err));
                }
            }
        }

        if !self.liveness.is_active() {
            debug!(kind = F::KIND.noun(), "page detached; dropping batch outcome");
            return Err(SubmitError::Detached);
        }

        loading.disarm();
        if let Some(message) = first_failure {
            warn!(kind = F::KIND.noun(), failed, total, "batch failed");
            let feedback = FeedbackState::failed(message.clone());
            self.state.send_modify(|state| state.feedback = feedback);
            return Err(SubmitError::Remote { message });
        }

        info!(kind = F::KIND.noun(), registered = total, "batch registered");
        let feedback = FeedbackState::succeeded(success_message(F::KIND, total));
        self.state.send_modify(|state| {
            state.rows.reset(F::Row::blank);
            state.feedback = feedback;
        });
        Ok(SubmitReport {
            kind: F::KIND,
            registered: total,
        })
    }
}

/// Returns a form to idle when a batch stops before settling, e.g. when the
/// `submit` future is dropped mid-flight. Rows are left as they are.
struct LoadingGuard<'a, R> {
    state: &'a watch::Sender<FormState<R>>,
    armed: bool,
}

impl<'a, R> LoadingGuard<'a, R> {
    fn new(state: &'a watch::Sender<FormState<R>>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<R> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let released = self.state.send_if_modified(|state| {
            if !state.feedback.is_loading() {
                return false;
            }
            state.feedback = FeedbackState::idle();
            true
        });
        if released {
            debug!("batch abandoned before settling; form back to idle");
        }
    }
}

fn failure_message(err: &anyhow::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        format!("{err:?}")
    } else {
        message
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
