//! Jacobi-preconditioned conjugate gradients for symmetric positive definite systems
//!
//! The operator is supplied matrix-free through [`LinearOperator`], so a voxel
//! Laplacian never needs an assembled sparse matrix.

use tracing::trace;

/// Symmetric positive definite operator `y = A x`
pub trait LinearOperator {
    /// Number of unknowns
    fn dimension(&self) -> usize;

    /// Write `A x` into `y`
    fn apply(&self, x: &[f64], y: &mut [f64]);

    /// Diagonal entries of `A`
    fn diagonal(&self) -> Vec<f64>;
}

/// Stopping criteria for the iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Relative residual tolerance
    pub rtol: f64,
    /// Absolute residual tolerance
    pub atol: f64,
    /// Iteration cap
    pub max_iter: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-8,
            atol: 1e-14,
            max_iter: 1000,
        }
    }
}

impl SolverConfig {
    /// Relative tolerance and iteration cap with the default absolute tolerance
    pub fn new(rtol: f64, max_iter: usize) -> Self {
        Self {
            rtol,
            max_iter,
            ..Default::default()
        }
    }
}

/// Outcome of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Residual fell below tolerance
    Converged,
    /// Iteration cap reached first
    MaxIterationsReached,
    /// Search direction lost curvature
    Stagnated,
}

/// Convergence report of a solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// Final status
    pub status: SolverStatus,
    /// Iterations performed
    pub iterations: usize,
    /// Final residual norm
    pub residual_norm: f64,
    /// Residual norm of the initial guess
    pub initial_residual_norm: f64,
    /// Final over initial residual norm
    pub relative_residual: f64,
}

impl SolverResult {
    /// Whether the residual reached tolerance
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

/// Preconditioned conjugate gradient solver with a diagonal preconditioner
#[derive(Debug, Clone)]
pub struct JacobiPcg {
    config: SolverConfig,
}

impl JacobiPcg {
    /// Create a solver with the given stopping criteria
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solve `A x = b`, starting from the contents of `x`
    // Vectors all have the operator's dimension
    #[allow(clippy::indexing_slicing)]
    pub fn solve<A: LinearOperator>(&self, operator: &A, b: &[f64], x: &mut [f64]) -> SolverResult {
        let n = operator.dimension();
        let inverse_diagonal: Vec<f64> = operator
            .diagonal()
            .into_iter()
            .map(|d| if d.abs() > f64::MIN_POSITIVE { d.recip() } else { 1.0 })
            .collect();

        let mut r = vec![0.0; n];
        let mut z = vec![0.0; n];
        let mut p = vec![0.0; n];
        let mut ap = vec![0.0; n];

        // r = b - A x
        operator.apply(x, &mut r);
        for i in 0..n {
            r[i] = b[i] - r[i];
        }

        let initial_norm = norm2(&r);
        if initial_norm < self.config.atol {
            return SolverResult {
                status: SolverStatus::Converged,
                iterations: 0,
                residual_norm: initial_norm,
                initial_residual_norm: initial_norm,
                relative_residual: 0.0,
            };
        }

        for i in 0..n {
            z[i] = inverse_diagonal[i] * r[i];
        }
        p.copy_from_slice(&z);
        let mut rz = dot(&r, &z);

        for iteration in 0..self.config.max_iter {
            operator.apply(&p, &mut ap);
            let pap = dot(&p, &ap);
            if pap.abs() < 1e-300 {
                let residual = norm2(&r);
                return SolverResult {
                    status: SolverStatus::Stagnated,
                    iterations: iteration,
                    residual_norm: residual,
                    initial_residual_norm: initial_norm,
                    relative_residual: residual / initial_norm,
                };
            }

            let alpha = rz / pap;
            axpy(alpha, &p, x);
            axpy(-alpha, &ap, &mut r);

            let residual = norm2(&r);
            let relative = residual / initial_norm;
            trace!(iteration = iteration + 1, relative, "pcg iteration");

            if residual < self.config.atol || relative < self.config.rtol {
                return SolverResult {
                    status: SolverStatus::Converged,
                    iterations: iteration + 1,
                    residual_norm: residual,
                    initial_residual_norm: initial_norm,
                    relative_residual: relative,
                };
            }

            for i in 0..n {
                z[i] = inverse_diagonal[i] * r[i];
            }
            let rz_new = dot(&r, &z);
            let beta = rz_new / rz;
            rz = rz_new;
            for i in 0..n {
                p[i] = beta.mul_add(p[i], z[i]);
            }
        }

        let residual = norm2(&r);
        SolverResult {
            status: SolverStatus::MaxIterationsReached,
            iterations: self.config.max_iter,
            residual_norm: residual,
            initial_residual_norm: initial_norm,
            relative_residual: residual / initial_norm,
        }
    }
}

/// Inner product
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm
pub fn norm2(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// `y += alpha * x`
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (target, &value) in y.iter_mut().zip(x) {
        *target = alpha.mul_add(value, *target);
    }
}
