use std::{fs, path::Path};

use anyhow::Context;
use client_core::{AcreedorPatch, DraftRow, EntityForm, PartyPatch, SubmissionController};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

/// One deudor row as read from a JSON input file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartyInput {
    pub nombre: String,
    pub identificacion: String,
    #[serde(alias = "tipoIdentificacion")]
    pub tipo_identificacion: String,
    pub direccion: String,
    pub telefono: String,
    pub email: String,
    pub apoderado: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AcreedorInput {
    #[serde(flatten)]
    pub party: PartyInput,
    #[serde(deserialize_with = "text_or_number")]
    pub monto: String,
    #[serde(alias = "tipoAcreencia")]
    pub tipo_acreencia: String,
}

pub trait RowInput {
    type Patch;

    fn to_patch(&self) -> Self::Patch;
    fn apoderado(&self) -> &str;
}

impl RowInput for PartyInput {
    type Patch = PartyPatch;

    fn to_patch(&self) -> PartyPatch {
        PartyPatch::default()
            .nombre(&self.nombre)
            .identificacion(&self.identificacion)
            .tipo_identificacion(&self.tipo_identificacion)
            .direccion(&self.direccion)
            .telefono(&self.telefono)
            .email(&self.email)
    }

    fn apoderado(&self) -> &str {
        &self.apoderado
    }
}

impl RowInput for AcreedorInput {
    type Patch = AcreedorPatch;

    fn to_patch(&self) -> AcreedorPatch {
        AcreedorPatch::from(self.party.to_patch())
            .monto(&self.monto)
            .tipo_acreencia(&self.tipo_acreencia)
    }

    fn apoderado(&self) -> &str {
        &self.party.apoderado
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Null(()) => String::new(),
    })
}

pub fn read_rows<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Writes `inputs` into the form's rows, reusing the initial blank row for the
/// first entry. Apoderado names are resolved against the loaded directory.
pub fn fill_form<F, I>(form: &SubmissionController<F>, inputs: &[I]) -> usize
where
    F: EntityForm,
    I: RowInput<Patch = <F::Row as DraftRow>::Patch>,
{
    let mut filled = 0;
    for (index, input) in inputs.iter().enumerate() {
        let key = if index == 0 {
            form.rows().first_key()
        } else {
            form.add_row()
        };
        form.update_row(key, input.to_patch());
        if !input.apoderado().trim().is_empty() {
            form.set_row_apoderado(key, input.apoderado());
        }
        filled += 1;
    }
    filled
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
