use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{AcreedorId, ApoderadoId, DeudorId, ProcesoId},
    protocol::{Acreedor, AcreedorInsert, Apoderado, Deudor, DeudorInsert, Proceso},
};
use tokio::sync::{Barrier, Mutex, Notify};

use crate::api::RegistroApi;

pub(crate) fn proceso(id: &str, numero: &str) -> Proceso {
    Proceso {
        id: ProcesoId::from(id),
        numero_proceso: numero.to_string(),
        fecha_procesos: Some("2024-03-01".to_string()),
        estado: None,
        descripcion: None,
        tipo_proceso: None,
        juzgado: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn apoderado(id: &str, nombre: &str) -> Apoderado {
    Apoderado {
        id: ApoderadoId::from(id),
        nombre: nombre.to_string(),
        identificacion: None,
        email: None,
        telefono: None,
        created_at: None,
    }
}

/// In-memory stand-in for the remote store. Records every create call at
/// dispatch time, before any configured delay or failure.
pub(crate) struct FakeRegistroApi {
    procesos: Result<Vec<Proceso>, String>,
    apoderados: Result<Vec<Apoderado>, String>,
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    gate: Option<Arc<Barrier>>,
    procesos_release: Option<Arc<Notify>>,
    pub deudores: Mutex<Vec<DeudorInsert>>,
    pub acreedores: Mutex<Vec<AcreedorInsert>>,
    pub list_procesos_calls: AtomicUsize,
    pub list_apoderados_calls: AtomicUsize,
    pub completed_creates: AtomicUsize,
}

impl FakeRegistroApi {
    pub(crate) fn new() -> Self {
        Self {
            procesos: Ok(vec![proceso("p-1", "2024-001"), proceso("p-2", "2024-002")]),
            apoderados: Ok(vec![
                apoderado("ap-1", "Dra. Marta Ruiz"),
                apoderado("ap-2", "Dr. Julio Pérez"),
            ]),
            failures: HashMap::new(),
            delays: HashMap::new(),
            gate: None,
            procesos_release: None,
            deudores: Mutex::new(Vec::new()),
            acreedores: Mutex::new(Vec::new()),
            list_procesos_calls: AtomicUsize::new(0),
            list_apoderados_calls: AtomicUsize::new(0),
            completed_creates: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_procesos(mut self, procesos: Vec<Proceso>) -> Self {
        self.procesos = Ok(procesos);
        self
    }

    pub(crate) fn failing_procesos(mut self, message: &str) -> Self {
        self.procesos = Err(message.to_string());
        self
    }

    pub(crate) fn failing_apoderados(mut self, message: &str) -> Self {
        self.apoderados = Err(message.to_string());
        self
    }

    pub(crate) fn fail_on(mut self, nombre: &str, message: &str) -> Self {
        self.failures.insert(nombre.to_string(), message.to_string());
        self
    }

    pub(crate) fn delay_on(mut self, nombre: &str, delay: Duration) -> Self {
        self.delays.insert(nombre.to_string(), delay);
        self
    }

    /// Every create waits until `parties` creates are in flight at once.
    pub(crate) fn with_gate(mut self, parties: usize) -> Self {
        self.gate = Some(Arc::new(Barrier::new(parties)));
        self
    }

    /// `list_procesos` blocks until the returned handle is notified.
    pub(crate) fn hold_procesos(&mut self) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        self.procesos_release = Some(Arc::clone(&release));
        release
    }

    pub(crate) fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    async fn settle(&self, nombre: &str) -> Result<()> {
        if let Some(gate) = &self.gate {
            gate.wait().await;
        }
        if let Some(delay) = self.delays.get(nombre) {
            tokio::time::sleep(*delay).await;
        }
        self.completed_creates.fetch_add(1, Ordering::SeqCst);
        match self.failures.get(nombre) {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RegistroApi for FakeRegistroApi {
    async fn list_procesos(&self) -> Result<Vec<Proceso>> {
        self.list_procesos_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(release) = &self.procesos_release {
            release.notified().await;
        }
        self.procesos.clone().map_err(|message| anyhow!(message))
    }

    async fn list_apoderados(&self) -> Result<Vec<Apoderado>> {
        self.list_apoderados_calls.fetch_add(1, Ordering::SeqCst);
        self.apoderados.clone().map_err(|message| anyhow!(message))
    }

    async fn create_deudor(&self, payload: DeudorInsert) -> Result<Deudor> {
        let index = {
            let mut recorded = self.deudores.lock().await;
            recorded.push(payload.clone());
            recorded.len()
        };
        self.settle(&payload.nombre).await?;
        Ok(Deudor {
            id: DeudorId::new(format!("d-{index}")),
            proceso_id: payload.proceso_id,
            nombre: payload.nombre,
            identificacion: payload.identificacion,
            tipo_identificacion: payload.tipo_identificacion,
            direccion: payload.direccion,
            telefono: payload.telefono,
            email: payload.email,
            apoderado_id: payload.apoderado_id,
            created_at: None,
        })
    }

    async fn create_acreedor(&self, payload: AcreedorInsert) -> Result<Acreedor> {
        let index = {
            let mut recorded = self.acreedores.lock().await;
            recorded.push(payload.clone());
            recorded.len()
        };
        self.settle(&payload.nombre).await?;
        Ok(Acreedor {
            id: AcreedorId::new(format!("a-{index}")),
            proceso_id: payload.proceso_id,
            nombre: payload.nombre,
            identificacion: payload.identificacion,
            tipo_identificacion: payload.tipo_identificacion,
            direccion: payload.direccion,
            telefono: payload.telefono,
            email: payload.email,
            apoderado_id: payload.apoderado_id,
            monto_acreencia: payload.monto_acreencia,
            tipo_acreencia: payload.tipo_acreencia,
            created_at: None,
        })
    }
}
