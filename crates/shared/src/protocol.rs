use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AcreedorId, ApoderadoId, DeudorId, ProcesoId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proceso {
    pub id: ProcesoId,
    pub numero_proceso: String,
    #[serde(default, alias = "fecha_inicio")]
    pub fecha_procesos: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub tipo_proceso: Option<String>,
    #[serde(default)]
    pub juzgado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apoderado {
    pub id: ApoderadoId,
    pub nombre: String,
    #[serde(default)]
    pub identificacion: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deudor {
    pub id: DeudorId,
    pub proceso_id: ProcesoId,
    pub nombre: String,
    #[serde(default)]
    pub identificacion: String,
    #[serde(default)]
    pub tipo_identificacion: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub apoderado_id: Option<ApoderadoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acreedor {
    pub id: AcreedorId,
    pub proceso_id: ProcesoId,
    pub nombre: String,
    #[serde(default)]
    pub identificacion: String,
    #[serde(default)]
    pub tipo_identificacion: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub apoderado_id: Option<ApoderadoId>,
    #[serde(default)]
    pub monto_acreencia: Option<f64>,
    #[serde(default)]
    pub tipo_acreencia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeudorInsert {
    pub proceso_id: ProcesoId,
    pub nombre: String,
    pub identificacion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_identificacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apoderado_id: Option<ApoderadoId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcreedorInsert {
    pub proceso_id: ProcesoId,
    pub nombre: String,
    pub identificacion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_identificacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apoderado_id: Option<ApoderadoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monto_acreencia: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_acreencia: Option<String>,
}
