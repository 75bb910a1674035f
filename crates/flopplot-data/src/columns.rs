//! Column offsets for each routine's result table
//!
//! Layouts match the tables produced by the library's `testing_*` drivers,
//! one module per routine family. `COLUMNS` is the layout width.

/// LU factorization (`?getrf`, `?getrf_gpu`)
pub mod getrf {
    pub const M: usize = 0;
    pub const N: usize = 1;
    pub const CPU_FLOPS: usize = 2;
    pub const CPU_TIME: usize = 3;
    pub const GPU_FLOPS: usize = 4;
    pub const GPU_TIME: usize = 5;
    pub const ERROR: usize = 6;
    pub const COLUMNS: usize = 7;
}

/// Cholesky factorization (`?potrf`, `?potrf_gpu`)
pub mod potrf {
    pub const N: usize = 0;
    pub const CPU_FLOPS: usize = 1;
    pub const CPU_TIME: usize = 2;
    pub const GPU_FLOPS: usize = 3;
    pub const GPU_TIME: usize = 4;
    pub const ERROR: usize = 5;
    pub const COLUMNS: usize = 6;
}

/// QR factorization (`?geqrf`, `?geqrf_gpu`)
pub mod geqrf {
    pub const M: usize = 0;
    pub const N: usize = 1;
    pub const CPU_FLOPS: usize = 2;
    pub const CPU_TIME: usize = 3;
    pub const GPU_FLOPS: usize = 4;
    pub const GPU_TIME: usize = 5;
    pub const ERROR: usize = 6;
    pub const COLUMNS: usize = 7;
}

/// Non-symmetric eigenvalue problem (`?geev`)
pub mod geev {
    pub const N: usize = 0;
    pub const CPU_TIME: usize = 1;
    pub const GPU_TIME: usize = 2;
    pub const ERROR: usize = 3;
    pub const COLUMNS: usize = 4;
}

/// Symmetric / Hermitian eigenvalue problem (`?syevd`, `?heevd`, 2-stage variants)
pub mod syev {
    pub const N: usize = 0;
    pub const CPU_TIME: usize = 1;
    pub const GPU_TIME: usize = 2;
    pub const ERROR: usize = 3;
    pub const COLUMNS: usize = 4;
}

/// Singular value decomposition (`?gesvd`, `?gesdd`)
///
/// `gesvd` reports both jobu and jobv; jobv is dropped so both algorithms
/// share this layout.
pub mod svd {
    pub const JOB: usize = 0;
    pub const M: usize = 1;
    pub const N: usize = 2;
    pub const CPU_TIME: usize = 3;
    pub const GPU_TIME: usize = 4;
    pub const ERROR: usize = 5;
    pub const COLUMNS: usize = 6;
}

/// Symmetric / Hermitian matrix-vector product (`?symv`, `?hemv`)
pub mod symv {
    pub const N: usize = 0;
    pub const GPU_FLOPS: usize = 1;
    pub const GPU_TIME: usize = 2;
    pub const ATOMICS_FLOPS: usize = 3;
    pub const ATOMICS_TIME: usize = 4;
    pub const CUBLAS_FLOPS: usize = 5;
    pub const CUBLAS_TIME: usize = 6;
    pub const CPU_FLOPS: usize = 7;
    pub const CPU_TIME: usize = 8;
    pub const GPU_ERROR: usize = 9;
    pub const ATOMICS_ERROR: usize = 10;
    pub const CUBLAS_ERROR: usize = 11;
    pub const COLUMNS: usize = 12;
}
