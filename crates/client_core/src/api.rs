use anyhow::Result;
use async_trait::async_trait;
use shared::protocol::{Acreedor, AcreedorInsert, Apoderado, Deudor, DeudorInsert, Proceso};

/// Remote collaborators of the registration page.
#[async_trait]
pub trait RegistroApi: Send + Sync {
    async fn list_procesos(&self) -> Result<Vec<Proceso>>;
    async fn list_apoderados(&self) -> Result<Vec<Apoderado>>;
    async fn create_deudor(&self, payload: DeudorInsert) -> Result<Deudor>;
    async fn create_acreedor(&self, payload: AcreedorInsert) -> Result<Acreedor>;
}
