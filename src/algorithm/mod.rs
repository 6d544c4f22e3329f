/// Stage-by-stage characterization driver
pub mod executor;
/// Descriptor record and stage bookkeeping
pub mod record;
/// Matrix-free preconditioned conjugate gradients
pub mod solver;
