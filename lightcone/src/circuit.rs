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

use crate::gate::{GateType, Operation};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// A wire identifier: opaque, totally ordered and hashable.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Qubit(pub u32);

impl Qubit {
    pub fn index(&self) -> u32 {
        self.0
    }

    /// The first `n` qubits, in order.
    pub fn range(n: usize) -> Vec<Qubit> {
        (0..n as u32).map(Qubit).collect()
    }
}

impl From<u32> for Qubit {
    fn from(i: u32) -> Qubit {
        Qubit(i)
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A time-step holding operations on disjoint qubits.
///
/// Insertion order is preserved so that iteration is deterministic, but no
/// meaning is attached to the order of operations within a moment.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Moment {
    pub ops: Vec<Operation>,
}

impl Moment {
    pub fn new(ops: Vec<Operation>) -> Moment {
        debug_assert!(
            {
                let mut seen = FxHashSet::default();
                ops.iter().flat_map(|op| op.qubits()).all(|q| seen.insert(*q))
            },
            "operations within a moment must act on disjoint qubits"
        );
        Moment { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.ops.iter()
    }

    pub fn qubits(&self) -> FxHashSet<Qubit> {
        self.ops.iter().flat_map(|op| op.qubits()).copied().collect()
    }
}

/// An ordered sequence of moments. Transformations never mutate in place;
/// they return new circuits.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Circuit {
    pub moments: Vec<Moment>,
}

impl Circuit {
    pub fn new() -> Circuit {
        Circuit::default()
    }

    pub fn from_moments(moments: Vec<Moment>) -> Circuit {
        Circuit { moments }
    }

    /// Packs a stream of operations into moments, placing each operation in
    /// the earliest moment whose qubits it does not collide with.
    pub fn from_operations(ops: impl IntoIterator<Item = Operation>) -> Circuit {
        let mut moments: Vec<Moment> = Vec::new();
        let mut frontier: FxHashMap<Qubit, usize> = FxHashMap::default();
        for op in ops {
            let at = op
                .qubits()
                .iter()
                .map(|q| frontier.get(q).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            if at == moments.len() {
                moments.push(Moment::default());
            }
            for &q in op.qubits() {
                frontier.insert(q, at + 1);
            }
            moments[at].ops.push(op);
        }
        Circuit { moments }
    }

    pub fn num_moments(&self) -> usize {
        self.moments.len()
    }

    /// All operations in moment order, then within-moment order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.moments.iter().flat_map(|m| m.ops.iter())
    }

    pub fn num_operations(&self) -> usize {
        self.moments.iter().map(|m| m.len()).sum()
    }

    /// Every qubit referenced anywhere in the circuit.
    pub fn qubit_set(&self) -> FxHashSet<Qubit> {
        self.operations().flat_map(|op| op.qubits()).copied().collect()
    }

    /// Every qubit referenced anywhere in the circuit, sorted.
    pub fn all_qubits(&self) -> Vec<Qubit> {
        let mut qs: Vec<Qubit> = self.qubit_set().into_iter().collect();
        qs.sort();
        qs
    }

    pub fn num_qubits(&self) -> usize {
        self.qubit_set().len()
    }

    pub fn has_measurements(&self) -> bool {
        self.operations().any(|op| op.t.is_measurement())
    }

    /// The inverse circuit: moments in reverse order, each operation
    /// replaced by its adjoint.
    ///
    /// Panics if the circuit contains measurements; strip them first with
    /// [`Circuit::without_measurements`].
    pub fn adjoint(&self) -> Circuit {
        let moments = self
            .moments
            .iter()
            .rev()
            .map(|m| Moment::new(m.ops.iter().map(|op| op.adjoint()).collect()))
            .collect();
        Circuit::from_moments(moments)
    }

    pub fn to_qasm(&self) -> String {
        String::from("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n") + &self.to_string()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self
            .all_qubits()
            .last()
            .map(|q| q.index() as usize + 1)
            .unwrap_or(0);
        writeln!(f, "qreg q[{n}];")?;
        if self.has_measurements() {
            writeln!(f, "creg c[{n}];")?;
        }
        for op in self.operations() {
            if op.t == GateType::Measure {
                let q = op.qubits()[0].index();
                writeln!(f, "measure q[{q}] -> c[{q}];")?;
            } else {
                writeln!(f, "{};", op.to_qasm())?;
            }
        }
        Ok(())
    }
}
