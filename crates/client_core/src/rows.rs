//! Editable row drafts and the ordered collection each form keeps them in.

use std::fmt;

use shared::domain::ApoderadoId;
use uuid::Uuid;

/// Client-side identity of a draft row. Generated fresh for every row and
/// never reused within a page session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowKey(Uuid);

impl RowKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Fields shared by deudor and acreedor drafts, kept exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyDraft {
    pub nombre: String,
    pub identificacion: String,
    pub tipo_identificacion: String,
    pub direccion: String,
    pub telefono: String,
    pub email: String,
    pub apoderado_id: Option<ApoderadoId>,
    /// Display cache of the chosen representative's name.
    pub apoderado_nombre: String,
}

impl PartyDraft {
    pub fn has_nombre(&self) -> bool {
        !self.nombre.trim().is_empty()
    }

    fn apply(&mut self, patch: PartyPatch) {
        let PartyPatch {
            nombre,
            identificacion,
            tipo_identificacion,
            direccion,
            telefono,
            email,
            apoderado_id,
            apoderado_nombre,
        } = patch;

        if let Some(v) = nombre {
            self.nombre = v;
        }
        if let Some(v) = identificacion {
            self.identificacion = v;
        }
        if let Some(v) = tipo_identificacion {
            self.tipo_identificacion = v;
        }
        if let Some(v) = direccion {
            self.direccion = v;
        }
        if let Some(v) = telefono {
            self.telefono = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = apoderado_id {
            self.apoderado_id = v;
        }
        if let Some(v) = apoderado_nombre {
            self.apoderado_nombre = v;
        }
    }
}

/// Partial update of a [`PartyDraft`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyPatch {
    pub nombre: Option<String>,
    pub identificacion: Option<String>,
    pub tipo_identificacion: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub apoderado_id: Option<Option<ApoderadoId>>,
    pub apoderado_nombre: Option<String>,
}

impl PartyPatch {
    pub fn nombre(mut self, value: impl Into<String>) -> Self {
        self.nombre = Some(value.into());
        self
    }

    pub fn identificacion(mut self, value: impl Into<String>) -> Self {
        self.identificacion = Some(value.into());
        self
    }

    pub fn tipo_identificacion(mut self, value: impl Into<String>) -> Self {
        self.tipo_identificacion = Some(value.into());
        self
    }

    pub fn direccion(mut self, value: impl Into<String>) -> Self {
        self.direccion = Some(value.into());
        self
    }

    pub fn telefono(mut self, value: impl Into<String>) -> Self {
        self.telefono = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn apoderado(mut self, nombre: impl Into<String>, id: Option<ApoderadoId>) -> Self {
        self.apoderado_nombre = Some(nombre.into());
        self.apoderado_id = Some(id);
        self
    }
}

/// A draft the row collection can hold.
pub trait DraftRow: Clone + Send + Sync + 'static {
    type Patch: From<PartyPatch> + Send;

    /// A fully blank draft carrying a fresh key.
    fn blank() -> Self;
    fn key(&self) -> RowKey;
    fn party(&self) -> &PartyDraft;
    fn apply(&mut self, patch: Self::Patch);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeudorRow {
    key: RowKey,
    pub party: PartyDraft,
}

impl DraftRow for DeudorRow {
    type Patch = PartyPatch;

    fn blank() -> Self {
        Self {
            key: RowKey::generate(),
            party: PartyDraft::default(),
        }
    }

    fn key(&self) -> RowKey {
        self.key
    }

    fn party(&self) -> &PartyDraft {
        &self.party
    }

    fn apply(&mut self, patch: PartyPatch) {
        self.party.apply(patch);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcreedorRow {
    key: RowKey,
    pub party: PartyDraft,
    /// Free text; parsed only when the payload is built.
    pub monto: String,
    pub tipo_acreencia: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcreedorPatch {
    pub party: PartyPatch,
    pub monto: Option<String>,
    pub tipo_acreencia: Option<String>,
}

impl AcreedorPatch {
    pub fn monto(mut self, value: impl Into<String>) -> Self {
        self.monto = Some(value.into());
        self
    }

    pub fn tipo_acreencia(mut self, value: impl Into<String>) -> Self {
        self.tipo_acreencia = Some(value.into());
        self
    }
}

impl From<PartyPatch> for AcreedorPatch {
    fn from(party: PartyPatch) -> Self {
        Self {
            party,
            ..Self::default()
        }
    }
}

impl DraftRow for AcreedorRow {
    type Patch = AcreedorPatch;

    fn blank() -> Self {
        Self {
            key: RowKey::generate(),
            party: PartyDraft::default(),
            monto: String::new(),
            tipo_acreencia: String::new(),
        }
    }

    fn key(&self) -> RowKey {
        self.key
    }

    fn party(&self) -> &PartyDraft {
        &self.party
    }

    fn apply(&mut self, patch: AcreedorPatch) {
        self.party.apply(patch.party);
        if let Some(v) = patch.monto {
            self.monto = v;
        }
        if let Some(v) = patch.tipo_acreencia {
            self.tipo_acreencia = v;
        }
    }
}

/// Ordered drafts for one entity type. Never holds fewer than one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCollection<T> {
    rows: Vec<T>,
}

impl<T: DraftRow> Default for RowCollection<T> {
    fn default() -> Self {
        Self::new(T::blank)
    }
}

impl<T: DraftRow> RowCollection<T> {
    pub fn new(factory: impl FnOnce() -> T) -> Self {
        Self {
            rows: vec![factory()],
        }
    }

    /// Appends the factory's row. A row whose key is already present is
    /// replaced by a fresh blank one, so keys stay unique.
    pub fn add(&mut self, factory: impl FnOnce() -> T) -> RowKey {
        let mut row = factory();
        if self.get(row.key()).is_some() {
            row = T::blank();
        }
        let key = row.key();
        self.rows.push(row);
        key
    }

    /// Merges `patch` into the row with `key`. Returns false when no row matches.
    pub fn update(&mut self, key: RowKey, patch: T::Patch) -> bool {
        match self.rows.iter_mut().find(|row| row.key() == key) {
            Some(row) => {
                row.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Removes the row with `key` unless it is the only one left.
    pub fn remove(&mut self, key: RowKey) -> bool {
        if self.rows.len() == 1 {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|row| row.key() != key);
        self.rows.len() != before
    }

    /// Rows that will be submitted: a non-blank nombre, in display order.
    pub fn valid_rows(&self) -> Vec<T> {
        self.rows
            .iter()
            .filter(|row| row.party().has_nombre())
            .cloned()
            .collect()
    }

    pub fn reset(&mut self, factory: impl FnOnce() -> T) {
        self.rows = vec![factory()];
    }

    pub fn get(&self, key: RowKey) -> Option<&T> {
        self.rows.iter().find(|row| row.key() == key)
    }

    pub fn first_key(&self) -> RowKey {
        self.rows[0].key()
    }

    pub fn keys(&self) -> Vec<RowKey> {
        self.rows.iter().map(DraftRow::key).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }
}

#[cfg(test)]
#[path = "tests/rows_tests.rs"]
mod tests;
