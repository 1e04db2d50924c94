// Reference data: the job competency table and the behavior catalogue,
// loaded once from the reference workbook and shared read-only.

pub mod handlers;
pub mod loader;
pub mod models;
pub mod selection;
