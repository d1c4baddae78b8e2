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

//! Circuit reductions: terminal-measurement stripping and backward
//! lightcone filtering.

use crate::circuit::{Circuit, Moment, Qubit};
use crate::gate::Operation;
use log::debug;
use rustc_hash::FxHashSet;
use std::fmt;

/// The circuit falls outside the tensor-network simulation model.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct UnsupportedCircuitError(pub String);

impl fmt::Display for UnsupportedCircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported circuit: {}", self.0)
    }
}

impl std::error::Error for UnsupportedCircuitError {}

impl Circuit {
    /// Returns a copy of the circuit with all measurement operations
    /// removed.
    ///
    /// Fails if any measurement is non-terminal, i.e. a non-measurement
    /// operation acts on a measured qubit later in circuit order. The moment
    /// structure is preserved; moments emptied by the removal stay as empty
    /// moments.
    pub fn without_measurements(&self) -> Result<Circuit, UnsupportedCircuitError> {
        if !self.has_measurements() {
            return Ok(self.clone());
        }

        let mut measured: FxHashSet<Qubit> = FxHashSet::default();
        for op in self.operations() {
            if op.t.is_measurement() {
                measured.extend(op.qubits().iter().copied());
            } else if op.qubits().iter().any(|q| measured.contains(q)) {
                return Err(UnsupportedCircuitError(
                    "mid-circuit measurement not supported in tensor network simulation".into(),
                ));
            }
        }

        let moments = self
            .moments
            .iter()
            .map(|m| {
                Moment::new(
                    m.ops
                        .iter()
                        .filter(|op| !op.t.is_measurement())
                        .cloned()
                        .collect(),
                )
            })
            .collect();
        Ok(Circuit::from_moments(moments))
    }

    /// Reduces the circuit to the operations causally connected to
    /// `targets`, scanning backward from the end of the circuit.
    ///
    /// An operation is retained as soon as any of its qubits is active; its
    /// remaining qubits then become active too, so multi-qubit gates act as
    /// bridges into the cone. Once every qubit in the circuit is active no
    /// operation can be pruned any more and the rest of the scan is copied
    /// verbatim. Moment order and within-moment relative order of retained
    /// operations match the input; moments filtered down to nothing are kept
    /// as empty moments.
    pub fn lightcone(&self, targets: impl IntoIterator<Item = Qubit>) -> Circuit {
        let qubit_set = self.qubit_set();
        let n_qubits = qubit_set.len();
        // qubits outside the circuit cannot grow the cone, and counting them
        // would break the full-coverage check below
        let mut active: FxHashSet<Qubit> = targets
            .into_iter()
            .filter(|q| qubit_set.contains(q))
            .collect();

        let reversed: Vec<&Moment> = self.moments.iter().rev().collect();
        let mut moments: Vec<Moment> = Vec::with_capacity(reversed.len());
        for (ix, moment) in reversed.iter().enumerate() {
            if active.len() == n_qubits {
                moments.extend(reversed[ix..].iter().map(|m| (*m).clone()));
                break;
            }
            let rev_ops: Vec<&Operation> = moment.ops.iter().rev().collect();
            let mut reduced: Vec<Operation> = Vec::new();
            for (iy, op) in rev_ops.iter().enumerate() {
                if active.len() == n_qubits {
                    reduced.extend(rev_ops[iy..].iter().map(|op| (*op).clone()));
                    break;
                }
                if op.qubits().iter().any(|q| active.contains(q)) {
                    reduced.push((*op).clone());
                    active.extend(op.qubits().iter().copied());
                }
            }
            reduced.reverse();
            moments.push(Moment::new(reduced));
        }
        moments.reverse();
        let reduced = Circuit::from_moments(moments);

        debug!(
            "lightcone kept {}/{} operations",
            reduced.num_operations(),
            self.num_operations()
        );
        reduced
    }
}
