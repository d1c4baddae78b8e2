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

//! Dense reference simulator used to cross-validate contraction results.
//!
//! This applies gate tensors to the state one by one and makes no attempt
//! at being fast; it is the ground truth the einsum pipeline is checked
//! against.

use crate::circuit::Circuit;
use crate::tensor::{tensordot, Tensor, TensorElem};
use ndarray::IxDyn;

/// Computes the statevector of a measurement-free circuit, starting from
/// |0...0>, as a tensor with one binary axis per qubit in sorted-qubit
/// order.
///
/// Panics if the circuit contains measurements; strip them first with
/// [`Circuit::without_measurements`].
pub fn statevector<A: TensorElem>(circuit: &Circuit) -> Tensor<A> {
    let qubits = circuit.all_qubits();
    let n = qubits.len();
    let mut state: Tensor<A> = Tensor::zeros(IxDyn(&vec![2; n]));
    state[IxDyn(&vec![0; n])] = A::one();

    for op in circuit.operations() {
        let k = op.num_qubits();
        let axes: Vec<usize> = op
            .qubits()
            .iter()
            .map(|q| qubits.binary_search(q).expect("qubit not in circuit"))
            .collect();
        let gate = op.to_tensor::<A>();
        let gate_in: Vec<usize> = (k..2 * k).collect();
        let applied = tensordot(&gate, &state, &gate_in, &axes);

        // tensordot leaves the gate's output axes first; permute them back
        // to the positions of the qubits they act on
        let rest = (0..n).filter(|i| !axes.contains(i));
        let mut perm = vec![0usize; n];
        for (j, d) in axes.iter().copied().chain(rest).enumerate() {
            perm[d] = j;
        }
        state = applied.permuted_axes(perm);
    }
    state
}

/// Looks up a single basis-state amplitude; `bits` are ordered like the
/// statevector's axes.
pub fn amplitude<A: TensorElem>(sv: &Tensor<A>, bits: &[bool]) -> A {
    assert_eq!(sv.ndim(), bits.len(), "bit count must match qubit count");
    let idx: Vec<usize> = bits.iter().map(|&b| b as usize).collect();
    sv[IxDyn(&idx)]
}

/// Reverses the axis order of a statevector.
///
/// Registers read in little-endian convention (as QASM-style simulators
/// report them) index their amplitudes with the last qubit most
/// significant; transposing with this puts such a statevector into the
/// sorted-qubit axis order used here.
pub fn reverse_axis_order<A: TensorElem>(sv: Tensor<A>) -> Tensor<A> {
    let perm: Vec<usize> = (0..sv.ndim()).rev().collect();
    sv.permuted_axes(perm)
}
