use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Blank identifiers never reach the remote store.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ProcesoId);
id_newtype!(ApoderadoId);
id_newtype!(DeudorId);
id_newtype!(AcreedorId);

/// The two entity kinds registered against a proceso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Deudor,
    Acreedor,
}

impl EntityKind {
    pub fn noun(self) -> &'static str {
        match self {
            Self::Deudor => "deudor",
            Self::Acreedor => "acreedor",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Self::Deudor => "deudores",
            Self::Acreedor => "acreedores",
        }
    }
}
