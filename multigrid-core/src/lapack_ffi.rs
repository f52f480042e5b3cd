//! Raw FFI declarations for the Fortran LAPACK least-squares drivers.
//!
//! These map 1:1 to the reference LAPACK `sgelss` / `dgelss` symbols. Every
//! argument is passed by pointer, matrices are column-major, and `B` is
//! overwritten in place. All functions are unsafe; the safe wrapper lives in
//! `multigrid_lapack::backend`.

#![allow(non_snake_case)]

use std::os::raw::{c_double, c_float, c_int};

// ═══════════════════════════════════════════════════════════════
// xGELSS: minimum-norm least squares via SVD
// ═══════════════════════════════════════════════════════════════

#[link(name = "lapack")]
extern "C" {
    pub fn sgelss_(
        M: *const c_int,
        N: *const c_int,
        NRHS: *const c_int,
        A: *mut c_float,
        LDA: *const c_int,
        B: *mut c_float,
        LDB: *const c_int,
        S: *mut c_float,
        RCOND: *const c_float,
        RANK: *mut c_int,
        WORK: *mut c_float,
        LWORK: *const c_int,
        INFO: *mut c_int,
    );

    pub fn dgelss_(
        M: *const c_int,
        N: *const c_int,
        NRHS: *const c_int,
        A: *mut c_double,
        LDA: *const c_int,
        B: *mut c_double,
        LDB: *const c_int,
        S: *mut c_double,
        RCOND: *const c_double,
        RANK: *mut c_int,
        WORK: *mut c_double,
        LWORK: *const c_int,
        INFO: *mut c_int,
    );
}
