pub mod api;
pub mod directory;
pub mod feedback;
pub mod lifecycle;
pub mod page;
pub mod postgrest;
pub mod rows;
pub mod selector;
pub mod submission;

pub use api::RegistroApi;
pub use directory::{ApoderadoDirectory, DirectoryState};
pub use feedback::{FeedbackState, FeedbackStatus};
pub use lifecycle::Liveness;
pub use page::PageController;
pub use postgrest::{PostgrestClient, PostgrestError};
pub use rows::{
    AcreedorPatch, AcreedorRow, DeudorRow, DraftRow, PartyDraft, PartyPatch, RowCollection, RowKey,
};
pub use selector::{display_label, ProcesoSelector, SelectorState};
pub use submission::{
    AcreedorForm, DeudorForm, EntityForm, FormState, SubmissionController, SubmitError,
    SubmitReport,
};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
