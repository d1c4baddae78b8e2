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

//! A small sequential einsum evaluator.
//!
//! This is deliberately not a contraction-path optimizer: operands are
//! folded in left to right, which is fine for the network sizes the test
//! harness produces. The supported expression class is that of tensor
//! networks: every index appears either exactly twice across the operand
//! lists, or exactly once in an operand and once in the output. Traces
//! within a single operand are not supported.

use crate::tensor::{tensordot, Tensor, TensorElem};

/// Contracts `operands` according to an einsum-style `expression` such as
/// `"ab,bc->ac"`. Panics on malformed expressions or mismatched operands;
/// this is harness plumbing, not a validated public boundary.
pub fn contract<A: TensorElem>(expression: &str, operands: &[Tensor<A>]) -> Tensor<A> {
    let (inputs, output) = parse(expression);
    assert_eq!(
        inputs.len(),
        operands.len(),
        "expression names {} operands, got {}",
        inputs.len(),
        operands.len()
    );
    for (modes, operand) in inputs.iter().zip(operands) {
        assert_eq!(
            modes.len(),
            operand.ndim(),
            "operand rank does not match its index list"
        );
    }

    let mut acc = operands[0].clone();
    let mut acc_modes = inputs[0].clone();
    for (modes, operand) in inputs.iter().zip(operands).skip(1) {
        let common: Vec<char> = acc_modes.iter().filter(|m| modes.contains(m)).copied().collect();
        let axes_a: Vec<usize> = common
            .iter()
            .map(|m| acc_modes.iter().position(|x| x == m).unwrap())
            .collect();
        let axes_b: Vec<usize> = common
            .iter()
            .map(|m| modes.iter().position(|x| x == m).unwrap())
            .collect();
        acc = tensordot(&acc, operand, &axes_a, &axes_b);
        acc_modes = acc_modes
            .iter()
            .chain(modes.iter())
            .filter(|m| !common.contains(m))
            .copied()
            .collect();
    }

    assert_eq!(
        acc_modes.len(),
        output.len(),
        "expression leaves dangling indices"
    );
    let perm: Vec<usize> = output
        .iter()
        .map(|m| {
            acc_modes
                .iter()
                .position(|x| x == m)
                .expect("output index missing from the contraction")
        })
        .collect();
    acc.permuted_axes(perm)
}

fn parse(expression: &str) -> (Vec<Vec<char>>, Vec<char>) {
    let (lhs, rhs) = expression
        .split_once("->")
        .expect("expression must contain '->'");
    let inputs = lhs.split(',').map(|s| s.chars().collect()).collect();
    (inputs, rhs.chars().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;
    use num::complex::Complex64;

    fn t(shape: &[usize], data: Vec<f64>) -> Tensor<Complex64> {
        Tensor::from_shape_vec(
            IxDyn(shape),
            data.into_iter().map(|x| Complex64::new(x, 0.0)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn matrix_product() {
        let a = t(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let b = t(&[2, 2], vec![5.0, 6.0, 7.0, 8.0]);
        let c = contract("ab,bc->ac", &[a, b]);
        assert_eq!(c[[0, 0]].re, 19.0);
        assert_eq!(c[[0, 1]].re, 22.0);
        assert_eq!(c[[1, 0]].re, 43.0);
        assert_eq!(c[[1, 1]].re, 50.0);
    }

    #[test]
    fn inner_product_is_scalar() {
        let v = t(&[3], vec![1.0, 2.0, 3.0]);
        let w = t(&[3], vec![4.0, 5.0, 6.0]);
        let s = contract("i,i->", &[v, w]);
        assert_eq!(s.ndim(), 0);
        assert_eq!(s[IxDyn(&[])].re, 32.0);
    }

    #[test]
    fn outer_product() {
        let v = t(&[2], vec![1.0, 2.0]);
        let w = t(&[3], vec![3.0, 4.0, 5.0]);
        let o = contract("i,j->ij", &[v, w]);
        assert_eq!(o.shape(), &[2, 3]);
        assert_eq!(o[[1, 2]].re, 10.0);
    }

    #[test]
    fn output_permutation() {
        let a = t(&[2, 3], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let at = contract("ij->ji", &[a.clone()]);
        assert_eq!(at.shape(), &[3, 2]);
        assert_eq!(at[[2, 1]], a[[1, 2]]);
    }

    #[test]
    fn deferred_shared_index() {
        // 'i' links the first and third operands; it must survive the
        // intermediate outer product
        let v = t(&[2], vec![1.0, 2.0]);
        let w = t(&[2], vec![3.0, 4.0]);
        let u = t(&[2], vec![5.0, 6.0]);
        let s = contract("i,j,i,j->", &[v, w, u, t(&[2], vec![1.0, 1.0])]);
        // (1*5 + 2*6) * (3*1 + 4*1)
        assert_eq!(s[IxDyn(&[])].re, 119.0);
    }

    #[test]
    #[should_panic]
    fn rejects_missing_arrow() {
        let v = t(&[2], vec![1.0, 2.0]);
        contract("i,i", &[v.clone(), v]);
    }
}
