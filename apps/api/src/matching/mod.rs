// Candidate matching: factor scoring, employer-side ranking, candidate-side
// job recommendations. Everything except `handlers` is pure and synchronous.

pub mod experience;
pub mod handlers;
pub mod policy;
pub mod ranking;
pub mod recommend;
pub mod scoring;
