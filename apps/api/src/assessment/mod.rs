// Self-assessment form: competency points, behavior ratings and the
// submission gate in front of both export paths.

pub mod behaviors;
pub mod competencies;
pub mod handlers;
pub mod validation;
