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

//! Circuit generators for benchmarks and the cross-validation harness.

use crate::circuit::{Circuit, Moment, Qubit};
use crate::gate::*;
use num::Rational64;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Quantum Fourier transform on `n` qubits, without the final swaps:
/// a Hadamard plus a controlled-phase ladder per qubit, working from the
/// highest wire down.
pub fn qft_circuit(n: usize) -> Circuit {
    let mut qreg: Vec<Qubit> = (0..n as u32).rev().map(Qubit).collect();
    let mut ops = Vec::new();
    while !qreg.is_empty() {
        let head = qreg.remove(0);
        ops.push(Operation::new(H, vec![head]));
        for (i, &qubit) in qreg.iter().enumerate() {
            let phase = Rational64::new(1, 1 << (i + 1));
            ops.push(Operation::with_phase(CPhase, vec![qubit, head], phase));
        }
    }
    Circuit::from_operations(ops)
}

pub struct RandomCircuitBuilder {
    pub rng: StdRng,
    pub qubits: usize,
    pub depth: usize,
    pub op_density: f64,
    pub p_twoq: f64,
}

impl Circuit {
    pub fn random() -> RandomCircuitBuilder {
        RandomCircuitBuilder {
            rng: StdRng::seed_from_u64(0),
            qubits: 0,
            depth: 0,
            op_density: 0.9,
            p_twoq: 0.5,
        }
    }
}

const ONEQ_GATES: [GateType; 7] = [H, X, Y, Z, S, T, Tdg];
const TWOQ_GATES: [GateType; 3] = [CNOT, CZ, SWAP];

impl RandomCircuitBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn qubits(mut self, qubits: usize) -> Self {
        self.qubits = qubits;
        self
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn op_density(mut self, op_density: f64) -> Self {
        self.op_density = op_density;
        self
    }

    pub fn p_twoq(mut self, p_twoq: f64) -> Self {
        self.p_twoq = p_twoq;
        self
    }

    /// Builds a moment-structured random circuit: per moment, qubits are
    /// visited in random order and, with probability `op_density`, consumed
    /// by a random gate on one or two of the still-free wires. Identical
    /// seeds give identical circuits.
    pub fn build(mut self) -> Circuit {
        let mut moments = Vec::with_capacity(self.depth);
        for _ in 0..self.depth {
            let mut free: Vec<Qubit> = Qubit::range(self.qubits);
            free.shuffle(&mut self.rng);
            let mut ops = Vec::new();
            while let Some(q0) = free.pop() {
                if !self.rng.random_bool(self.op_density) {
                    continue;
                }
                if free.len() >= 1 && self.rng.random_bool(self.p_twoq) {
                    let q1 = free.pop().unwrap();
                    let t = TWOQ_GATES[self.rng.random_range(0..TWOQ_GATES.len())];
                    ops.push(Operation::new(t, vec![q0, q1]));
                } else if self.rng.random_bool(0.25) {
                    // occasional non-Clifford rotation with a dyadic phase
                    let num = self.rng.random_range(1..8) as i64;
                    let t = if self.rng.random_bool(0.5) { ZPhase } else { XPhase };
                    ops.push(Operation::with_phase(t, vec![q0], Rational64::new(num, 8)));
                } else {
                    let t = ONEQ_GATES[self.rng.random_range(0..ONEQ_GATES.len())];
                    ops.push(Operation::new(t, vec![q0]));
                }
            }
            moments.push(Moment::new(ops));
        }
        Circuit::from_moments(moments)
    }
}
