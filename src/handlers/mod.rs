// Two-tier handler layout: public (no auth) and protected (bearer session)
pub mod protected;
pub mod public;
