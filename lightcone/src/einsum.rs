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

//! Builds einsum expressions and tensor operands from a circuit, for the
//! three query shapes a contraction engine is asked for: full statevector,
//! single amplitude, and reduced density matrix.

use crate::circuit::{Circuit, Qubit};
use crate::reduce::UnsupportedCircuitError;
use crate::tensor::{Tensor, TensorElem};
use itertools::Itertools;
use ndarray::IxDyn;
use rustc_hash::{FxHashMap, FxHashSet};
use std::marker::PhantomData;

const BASE_SYMBOLS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The symbol used for mode `i` in an expression string: latin letters for
/// the first 52 modes, then consecutive Unicode codepoints starting at
/// `'\u{c0}'` (the opt_einsum convention).
pub fn symbol(i: usize) -> char {
    if i < BASE_SYMBOLS.len() {
        BASE_SYMBOLS[i] as char
    } else {
        char::from_u32(140 + i as u32).expect("mode index out of symbol range")
    }
}

/// Converter from a circuit to einsum contraction inputs.
///
/// Construction strips terminal measurements and fails on mid-circuit ones.
/// Each query method returns an `(expression, operands)` pair ready to hand
/// to a contraction engine such as [`crate::contract::contract`].
pub struct CircuitToEinsum<A: TensorElem> {
    circuit: Circuit,
    qubits: Vec<Qubit>,
    _elem: PhantomData<A>,
}

impl<A: TensorElem> CircuitToEinsum<A> {
    pub fn new(circuit: &Circuit) -> Result<Self, UnsupportedCircuitError> {
        let circuit = circuit.without_measurements()?;
        let qubits = circuit.all_qubits();
        Ok(CircuitToEinsum {
            circuit,
            qubits,
            _elem: PhantomData,
        })
    }

    /// Qubits of the circuit in natural order; output axes of the
    /// statevector queries follow this order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn n_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Expression and operands contracting to the full statevector, one
    /// binary axis per qubit. Qubits listed in `fixed` are pinned to the
    /// given classical value and dropped from the output.
    pub fn state_vector(&self, fixed: &FxHashMap<Qubit, bool>) -> (String, Vec<Tensor<A>>) {
        let mut net = Network::new();
        let frontier = net.add_circuit(&self.qubits, &self.circuit, false);
        for (&q, &bit) in fixed.iter().sorted_by_key(|&(&q, _)| q) {
            net.add_projector(frontier[&q], bit);
        }
        let output: Vec<usize> = self
            .qubits
            .iter()
            .filter(|q| !fixed.contains_key(q))
            .map(|q| frontier[q])
            .collect();
        net.finish(&output)
    }

    /// Expression and operands contracting to the amplitude of a single
    /// computational basis state. The output is a scalar (rank 0).
    ///
    /// Panics if the bitstring length does not match the qubit count or
    /// contains characters other than '0' and '1'.
    pub fn amplitude(&self, bitstring: &str) -> (String, Vec<Tensor<A>>) {
        assert_eq!(
            bitstring.chars().count(),
            self.n_qubits(),
            "bitstring length must match the qubit count"
        );
        let fixed: FxHashMap<Qubit, bool> = self
            .qubits
            .iter()
            .zip(bitstring.chars())
            .map(|(&q, c)| match c {
                '0' => (q, false),
                '1' => (q, true),
                _ => panic!("bitstring may only contain '0' and '1'"),
            })
            .collect();
        self.state_vector(&fixed)
    }

    /// Expression and operands contracting to the reduced density matrix
    /// over `where_`, with axes ordered as `where_` kets then `where_` bras.
    /// Qubits in `fixed` are pinned on both the ket and bra side; all other
    /// qubits outside `where_` are traced out.
    ///
    /// With `lightcone` set, the circuit is first reduced to the backward
    /// lightcone of `where_` and the fixed qubits. This can only shrink the
    /// operand list; the contracted value is unchanged.
    pub fn reduced_density_matrix(
        &self,
        where_: &[Qubit],
        fixed: &FxHashMap<Qubit, bool>,
        lightcone: bool,
    ) -> (String, Vec<Tensor<A>>) {
        let circuit = if lightcone {
            let targets = where_.iter().copied().chain(fixed.keys().copied());
            self.circuit.lightcone(targets)
        } else {
            self.circuit.clone()
        };

        let mut net = Network::new();
        let ket = net.add_circuit(&self.qubits, &circuit, false);
        let bra = net.add_circuit(&self.qubits, &circuit, true);
        for (&q, &bit) in fixed.iter().sorted_by_key(|&(&q, _)| q) {
            net.add_projector(ket[&q], bit);
            net.add_projector(bra[&q], bit);
        }

        // traced qubits: identify the ket and bra open modes so the
        // contraction sums over them
        let where_set: FxHashSet<Qubit> = where_.iter().copied().collect();
        let rename: FxHashMap<usize, usize> = self
            .qubits
            .iter()
            .filter(|q| !where_set.contains(q) && !fixed.contains_key(q))
            .map(|q| (bra[q], ket[q]))
            .collect();
        net.rename_modes(&rename);

        let output: Vec<usize> = where_
            .iter()
            .map(|q| ket[q])
            .chain(where_.iter().map(|q| bra[q]))
            .collect();
        net.finish(&output)
    }
}

/// A tensor network under construction: one mode list per operand, plus a
/// running mode counter.
struct Network<A: TensorElem> {
    modes: Vec<Vec<usize>>,
    operands: Vec<Tensor<A>>,
    next_mode: usize,
}

impl<A: TensorElem> Network<A> {
    fn new() -> Self {
        Network {
            modes: Vec::new(),
            operands: Vec::new(),
            next_mode: 0,
        }
    }

    fn fresh(&mut self) -> usize {
        let m = self.next_mode;
        self.next_mode += 1;
        m
    }

    /// Appends |0> initial states for every qubit and one gate tensor per
    /// operation; returns the map from qubit to its final open mode.
    /// With `conjugate` set the gate tensors are conjugated elementwise
    /// (the bra side of a density-matrix network).
    fn add_circuit(
        &mut self,
        qubits: &[Qubit],
        circuit: &Circuit,
        conjugate: bool,
    ) -> FxHashMap<Qubit, usize> {
        let mut frontier = FxHashMap::default();
        for &q in qubits {
            let m = self.fresh();
            frontier.insert(q, m);
            self.modes.push(vec![m]);
            self.operands.push(basis_vector(false));
        }
        for op in circuit.operations() {
            let tensor: Tensor<A> = if conjugate {
                op.to_tensor::<A>().mapv(TensorElem::conj)
            } else {
                op.to_tensor()
            };
            let ins: Vec<usize> = op.qubits().iter().map(|q| frontier[q]).collect();
            let outs: Vec<usize> = op
                .qubits()
                .iter()
                .map(|&q| {
                    let m = self.fresh();
                    frontier.insert(q, m);
                    m
                })
                .collect();
            self.modes.push(outs.into_iter().chain(ins).collect());
            self.operands.push(tensor);
        }
        frontier
    }

    /// Pins `mode` to a classical bit by contracting it with a basis vector.
    fn add_projector(&mut self, mode: usize, bit: bool) {
        self.modes.push(vec![mode]);
        self.operands.push(basis_vector(bit));
    }

    fn rename_modes(&mut self, rename: &FxHashMap<usize, usize>) {
        for ms in &mut self.modes {
            for m in ms.iter_mut() {
                if let Some(&r) = rename.get(m) {
                    *m = r;
                }
            }
        }
    }

    fn finish(self, output: &[usize]) -> (String, Vec<Tensor<A>>) {
        let inputs = self
            .modes
            .iter()
            .map(|ms| ms.iter().map(|&m| symbol(m)).collect::<String>())
            .join(",");
        let out: String = output.iter().map(|&m| symbol(m)).collect();
        (format!("{inputs}->{out}"), self.operands)
    }
}

/// |0> or |1> as a rank-1 tensor. Basis vectors are real, so the same
/// operand serves on both the ket and bra side.
fn basis_vector<A: TensorElem>(bit: bool) -> Tensor<A> {
    let (zero, one) = (A::zero(), A::one());
    let data = if bit { vec![zero, one] } else { vec![one, zero] };
    Tensor::from_shape_vec(IxDyn(&[2]), data).expect("basis vector shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Qubit;
    use crate::gate::*;
    use num::complex::Complex64;

    fn q(i: u32) -> Qubit {
        Qubit(i)
    }

    fn bell() -> Circuit {
        Circuit::from_operations([
            Operation::new(H, vec![q(0)]),
            Operation::new(CNOT, vec![q(0), q(1)]),
        ])
    }

    #[test]
    fn symbols_follow_opt_einsum() {
        assert_eq!(symbol(0), 'a');
        assert_eq!(symbol(25), 'z');
        assert_eq!(symbol(26), 'A');
        assert_eq!(symbol(51), 'Z');
        assert_eq!(symbol(52), '\u{c0}');
        assert_eq!(symbol(53), '\u{c1}');
    }

    #[test]
    fn state_vector_expression_structure() {
        let conv = CircuitToEinsum::<Complex64>::new(&bell()).unwrap();
        let (expr, operands) = conv.state_vector(&FxHashMap::default());
        // modes: a,b inits; H allocates c; CNOT allocates d,e
        assert_eq!(expr, "a,b,ca,decb->de");
        assert_eq!(operands.len(), 4);
        assert_eq!(operands[2].shape(), &[2, 2]);
        assert_eq!(operands[3].shape(), &[2, 2, 2, 2]);
    }

    #[test]
    fn amplitude_expression_is_scalar() {
        let conv = CircuitToEinsum::<Complex64>::new(&bell()).unwrap();
        let (expr, operands) = conv.amplitude("01");
        assert_eq!(expr, "a,b,ca,decb,d,e->");
        assert_eq!(operands.len(), 6);
        // q0 pinned to 0, q1 pinned to 1
        assert_eq!(operands[4][[0]], Complex64::new(1.0, 0.0));
        assert_eq!(operands[5][[1]], Complex64::new(1.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn amplitude_rejects_wrong_length() {
        let conv = CircuitToEinsum::<Complex64>::new(&bell()).unwrap();
        conv.amplitude("011");
    }

    #[test]
    fn rdm_output_rank_is_twice_where() {
        let conv = CircuitToEinsum::<Complex64>::new(&bell()).unwrap();
        let (expr, _) = conv.reduced_density_matrix(&[q(0)], &FxHashMap::default(), false);
        let out = expr.split("->").nth(1).unwrap();
        assert_eq!(out.chars().count(), 2);
    }

    #[test]
    fn lightcone_never_adds_operands() {
        let c = Circuit::from_operations([
            Operation::new(H, vec![q(0)]),
            Operation::new(H, vec![q(1)]),
            Operation::new(H, vec![q(2)]),
            Operation::new(CNOT, vec![q(0), q(1)]),
        ]);
        let conv = CircuitToEinsum::<Complex64>::new(&c).unwrap();
        let fixed = FxHashMap::default();
        let (_, full) = conv.reduced_density_matrix(&[q(2)], &fixed, false);
        let (_, coned) = conv.reduced_density_matrix(&[q(2)], &fixed, true);
        assert!(coned.len() < full.len());
    }

    #[test]
    fn construction_strips_measurements() {
        let c = Circuit::from_operations([
            Operation::new(H, vec![q(0)]),
            Operation::new(Measure, vec![q(0)]),
        ]);
        let conv = CircuitToEinsum::<Complex64>::new(&c).unwrap();
        let (_, operands) = conv.state_vector(&FxHashMap::default());
        // one init and the H; the measurement is gone
        assert_eq!(operands.len(), 2);
    }

    #[test]
    fn construction_rejects_mid_circuit_measurement() {
        let c = Circuit::from_operations([
            Operation::new(Measure, vec![q(0)]),
            Operation::new(X, vec![q(0)]),
        ]);
        assert!(CircuitToEinsum::<Complex64>::new(&c).is_err());
    }
}
