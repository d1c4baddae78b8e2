// lightcone - Rust library for converting quantum circuits into
//             tensor-network einsum contractions
// Copyright (C) 2026 - the lightcone developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::circuit::Qubit;
use ndarray::{array, Array2};
use num::complex::Complex64;
use num::{Rational64, ToPrimitive, Zero};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GateType {
    H,
    X,
    Y,
    Z,
    S,
    Sdg,
    T,
    Tdg,
    ZPhase,
    XPhase,
    CNOT,
    CZ,
    CPhase,
    SWAP,
    CCX,
    CCZ,
    Measure,
}

pub use GateType::*;

impl GateType {
    pub fn from_qasm_name(s: &str) -> Option<GateType> {
        match s {
            "h" => Some(H),
            "x" => Some(X),
            "y" => Some(Y),
            "z" => Some(Z),
            "s" => Some(S),
            "sdg" => Some(Sdg),
            "t" => Some(T),
            "tdg" => Some(Tdg),
            "rz" => Some(ZPhase),
            "rx" => Some(XPhase),
            "cx" => Some(CNOT),
            "CX" => Some(CNOT),
            "cz" => Some(CZ),
            "cp" => Some(CPhase),
            "cu1" => Some(CPhase),
            "swap" => Some(SWAP),
            "ccx" => Some(CCX),
            "ccz" => Some(CCZ),
            "measure" => Some(Measure),
            _ => None,
        }
    }

    pub fn qasm_name(&self) -> &'static str {
        match self {
            H => "h",
            X => "x",
            Y => "y",
            Z => "z",
            S => "s",
            Sdg => "sdg",
            T => "t",
            Tdg => "tdg",
            ZPhase => "rz",
            XPhase => "rx",
            CNOT => "cx",
            CZ => "cz",
            CPhase => "cp",
            SWAP => "swap",
            CCX => "ccx",
            CCZ => "ccz",
            Measure => "measure",
        }
    }

    /// number of qubits the gate acts on
    pub fn num_qubits(&self) -> usize {
        match self {
            CNOT | CZ | CPhase | SWAP => 2,
            CCX | CCZ => 3,
            _ => 1,
        }
    }

    pub fn is_measurement(&self) -> bool {
        *self == Measure
    }

    /// whether the gate is parametrized by a phase
    pub fn takes_phase(&self) -> bool {
        matches!(self, ZPhase | XPhase | CPhase)
    }
}

/// A gate application: a gate type, a phase parameter (in half-turns), and
/// the ordered tuple of qubits it acts on.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Operation {
    pub t: GateType,
    pub qs: Vec<Qubit>,
    pub phase: Rational64,
}

impl Operation {
    pub fn new(t: GateType, qs: Vec<Qubit>) -> Operation {
        Operation::with_phase(t, qs, Rational64::zero())
    }

    pub fn with_phase(t: GateType, qs: Vec<Qubit>, phase: impl Into<Rational64>) -> Operation {
        debug_assert_eq!(t.num_qubits(), qs.len(), "wrong qubit count for {t:?}");
        Operation {
            t,
            qs,
            phase: phase.into(),
        }
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qs
    }

    pub fn num_qubits(&self) -> usize {
        self.qs.len()
    }

    pub fn to_qasm(&self) -> String {
        let mut s = String::from(self.t.qasm_name());
        if self.t.takes_phase() {
            s += &format!("({}*pi)", self.phase.to_f64().unwrap());
        }
        s += " ";
        let qs: Vec<String> = self.qs.iter().map(|q| format!("q[{}]", q.index())).collect();
        s += &qs.join(", ");
        s
    }

    /// The dense unitary matrix of the gate, with the row index ranging over
    /// outputs. Basis states are ordered with `qs[0]` most significant.
    ///
    /// Panics for [`Measure`], which has no unitary action; callers are
    /// expected to strip measurements first.
    pub fn unitary(&self) -> Array2<Complex64> {
        let o = Complex64::new(1.0, 0.0);
        let n = Complex64::new(0.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self.t {
            H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![[h, h], [h, -h]]
            }
            X => array![[n, o], [o, n]],
            Y => array![[n, -i], [i, n]],
            Z => array![[o, n], [n, -o]],
            S => array![[o, n], [n, i]],
            Sdg => array![[o, n], [n, -i]],
            T => array![[o, n], [n, Complex64::from_polar(1.0, PI / 4.0)]],
            Tdg => array![[o, n], [n, Complex64::from_polar(1.0, -PI / 4.0)]],
            ZPhase => array![[o, n], [n, self.phase_factor()]],
            XPhase => {
                // H · ZPhase · H
                let e = self.phase_factor();
                let a = (o + e) * 0.5;
                let b = (o - e) * 0.5;
                array![[a, b], [b, a]]
            }
            CNOT => permutation(&[0, 1, 3, 2]),
            CZ => diagonal(&[o, o, o, -o]),
            CPhase => diagonal(&[o, o, o, self.phase_factor()]),
            SWAP => permutation(&[0, 2, 1, 3]),
            CCX => permutation(&[0, 1, 2, 3, 4, 5, 7, 6]),
            CCZ => diagonal(&[o, o, o, o, o, o, o, -o]),
            Measure => panic!("measurement operations have no unitary action"),
        }
    }

    /// The inverse operation: dagger pairs swap and phase parameters
    /// negate; the self-inverse gates are returned unchanged.
    ///
    /// Panics for [`Measure`], which has no inverse.
    pub fn adjoint(&self) -> Operation {
        let t = match self.t {
            S => Sdg,
            Sdg => S,
            T => Tdg,
            Tdg => T,
            Measure => panic!("measurement operations have no adjoint"),
            t => t,
        };
        Operation {
            t,
            qs: self.qs.clone(),
            phase: -self.phase,
        }
    }

    fn phase_factor(&self) -> Complex64 {
        Complex64::from_polar(1.0, PI * self.phase.to_f64().unwrap())
    }
}

/// Diagonal matrix from its entries.
fn diagonal(d: &[Complex64]) -> Array2<Complex64> {
    let mut m = Array2::zeros((d.len(), d.len()));
    for (j, &v) in d.iter().enumerate() {
        m[(j, j)] = v;
    }
    m
}

/// Permutation matrix sending basis state `j` to `perm[j]`.
fn permutation(perm: &[usize]) -> Array2<Complex64> {
    let mut m = Array2::zeros((perm.len(), perm.len()));
    for (j, &p) in perm.iter().enumerate() {
        m[(p, j)] = Complex64::new(1.0, 0.0);
    }
    m
}
