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

use crate::circuit::{Circuit, Qubit};
use crate::gate::Operation;
use ndarray::prelude::*;
use ndarray::LinalgScalar;
use num::complex::{Complex, Complex64};

/// Generic tensor type used throughout the crate.
pub type Tensor<A> = Array<A, IxDyn>;

/// Element types tensor operands can be built over.
///
/// The two implementations, [`Complex<f32>`] and [`Complex<f64>`], play the
/// role of a caller-selected precision: gate unitaries are computed in
/// double precision and converted on the way into each operand.
pub trait TensorElem: LinalgScalar + Send + Sync + PartialEq + std::fmt::Debug {
    fn from_c64(z: Complex64) -> Self;
    fn conj(self) -> Self;
    fn norm(self) -> f64;
}

impl TensorElem for Complex<f32> {
    fn from_c64(z: Complex64) -> Self {
        Complex::new(z.re as f32, z.im as f32)
    }

    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    fn norm(self) -> f64 {
        Complex::norm(self) as f64
    }
}

impl TensorElem for Complex64 {
    fn from_c64(z: Complex64) -> Self {
        z
    }

    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    fn norm(self) -> f64 {
        Complex::norm(self)
    }
}

impl Operation {
    /// The gate unitary reshaped into a rank-2k tensor over qubit axes:
    /// the first k axes range over outputs, the last k over inputs, both in
    /// the order of the operation's qubit tuple.
    pub fn to_tensor<A: TensorElem>(&self) -> Tensor<A> {
        let k = self.num_qubits();
        let data: Vec<A> = self.unitary().iter().map(|&z| A::from_c64(z)).collect();
        Array::from_shape_vec(IxDyn(&vec![2; 2 * k]), data)
            .expect("unitary dimension inconsistent with qubit count")
    }
}

impl Circuit {
    /// Flattens the circuit for consumption by a contraction engine: the
    /// sorted qubit list, and one `(tensor, qubits)` pair per operation in
    /// moment-then-within-moment order.
    ///
    /// No unitarity check is performed; a measurement reaching this path is
    /// a caller contract violation and panics.
    pub fn unfold<A: TensorElem>(&self) -> (Vec<Qubit>, Vec<(Tensor<A>, Vec<Qubit>)>) {
        let qubits = self.all_qubits();
        let gates = self
            .operations()
            .map(|op| (op.to_tensor(), op.qs.clone()))
            .collect();
        (qubits, gates)
    }
}

/// Contracts `axes_a` of `a` against `axes_b` of `b`.
///
/// The result carries the free axes of `a` (in their original order)
/// followed by the free axes of `b`. Implemented the usual way: permute the
/// contracted axes together, flatten both sides to matrices, multiply, and
/// reshape back.
pub fn tensordot<A: TensorElem>(
    a: &Tensor<A>,
    b: &Tensor<A>,
    axes_a: &[usize],
    axes_b: &[usize],
) -> Tensor<A> {
    assert_eq!(axes_a.len(), axes_b.len(), "axis lists must pair up");
    let free_a: Vec<usize> = (0..a.ndim()).filter(|i| !axes_a.contains(i)).collect();
    let free_b: Vec<usize> = (0..b.ndim()).filter(|i| !axes_b.contains(i)).collect();

    let m: usize = free_a.iter().map(|&i| a.shape()[i]).product();
    let k: usize = axes_a.iter().map(|&i| a.shape()[i]).product();
    let n: usize = free_b.iter().map(|&i| b.shape()[i]).product();

    let mut out_shape: Vec<usize> = free_a.iter().map(|&i| a.shape()[i]).collect();
    out_shape.extend(free_b.iter().map(|&i| b.shape()[i]));

    let perm_a: Vec<usize> = free_a.iter().chain(axes_a).copied().collect();
    let perm_b: Vec<usize> = axes_b.iter().chain(&free_b).copied().collect();

    let a2 = a
        .view()
        .permuted_axes(perm_a)
        .as_standard_layout()
        .to_owned()
        .into_shape_with_order((m, k))
        .expect("tensordot lhs reshape");
    let b2 = b
        .view()
        .permuted_axes(perm_b)
        .as_standard_layout()
        .to_owned()
        .into_shape_with_order((k, n))
        .expect("tensordot rhs reshape");

    a2.dot(&b2)
        .into_shape_with_order(IxDyn(&out_shape))
        .expect("tensordot output reshape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Qubit;
    use crate::gate::*;
    use crate::generate::qft_circuit;

    fn q(i: u32) -> Qubit {
        Qubit(i)
    }

    #[test]
    fn unfold_shape_contract() {
        let c = qft_circuit(4);
        let (qubits, gates) = c.unfold::<Complex64>();
        assert_eq!(qubits, Qubit::range(4));
        assert_eq!(gates.len(), c.num_operations());
        for ((tensor, qs), op) in gates.iter().zip(c.operations()) {
            assert_eq!(qs, &op.qs);
            assert_eq!(tensor.shape(), vec![2; 2 * qs.len()].as_slice());
        }
    }

    #[test]
    fn unfold_preserves_operation_order() {
        let c = Circuit::from_moments(vec![
            crate::circuit::Moment::new(vec![
                Operation::new(H, vec![q(1)]),
                Operation::new(X, vec![q(0)]),
            ]),
            crate::circuit::Moment::new(vec![Operation::new(CZ, vec![q(0), q(1)])]),
        ]);
        let (_, gates) = c.unfold::<Complex64>();
        let arities: Vec<usize> = gates.iter().map(|(_, qs)| qs.len()).collect();
        assert_eq!(arities, vec![1, 1, 2]);
        assert_eq!(gates[0].1, vec![q(1)]);
        assert_eq!(gates[1].1, vec![q(0)]);
    }

    #[test]
    fn tensordot_is_matmul_on_matrices() {
        let a = Operation::new(H, vec![q(0)]).to_tensor::<Complex64>();
        let b = Operation::new(S, vec![q(0)]).to_tensor::<Complex64>();
        let prod = tensordot(&a, &b, &[1], &[0]);
        let expect = Operation::new(H, vec![q(0)])
            .unitary()
            .dot(&Operation::new(S, vec![q(0)]).unitary());
        for (x, y) in prod.iter().zip(expect.iter()) {
            assert!((x - y).norm() < 1e-12);
        }
    }

    #[test]
    fn hadamard_squares_to_identity() {
        let h = Operation::new(H, vec![q(0)]).to_tensor::<Complex64>();
        let hh = tensordot(&h, &h, &[1], &[0]);
        assert!((hh[[0, 0]] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!(hh[[0, 1]].norm() < 1e-12);
        assert!(hh[[1, 0]].norm() < 1e-12);
        assert!((hh[[1, 1]] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn tensordot_outer_product() {
        let v = Tensor::from_shape_vec(
            IxDyn(&[2]),
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        )
        .unwrap();
        let outer = tensordot(&v, &v, &[], &[]);
        assert_eq!(outer.shape(), &[2, 2]);
        assert_eq!(outer[[0, 0]], Complex64::new(1.0, 0.0));
        assert_eq!(outer[[1, 1]], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn elem_norm_and_conj() {
        let z = Complex64::new(3.0, -4.0);
        assert_eq!(TensorElem::norm(z), 5.0);
        assert_eq!(TensorElem::conj(z), Complex64::new(3.0, 4.0));

        let w = Complex::<f32>::new(0.0, 2.0);
        assert!((TensorElem::norm(w) - 2.0).abs() < 1e-6);
        assert_eq!(TensorElem::conj(w), Complex::new(0.0, -2.0));
    }

    #[test]
    fn single_precision_conversion() {
        let t = Operation::new(T, vec![q(0)]).to_tensor::<Complex<f32>>();
        let expect = (std::f32::consts::FRAC_PI_4).cos();
        assert!((t[[1, 1]].re - expect).abs() < 1e-6);
    }
}
