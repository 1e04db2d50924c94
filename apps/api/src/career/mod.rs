// Career plan: ranks every known job by similarity to the respondent's
// competency profile.

pub mod handlers;
pub mod scoring;
