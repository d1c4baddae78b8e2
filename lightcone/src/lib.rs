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

//! Convert quantum circuits into tensor-network einsum contractions.
//!
//! Circuits are sequences of moments over a neutral gate set, built either
//! directly ([`circuit::Circuit::from_operations`]) or from OpenQASM 2
//! source ([`circuit::Circuit::from_qasm`]). [`einsum::CircuitToEinsum`]
//! turns a circuit into `(expression, operands)` pairs for statevector,
//! amplitude, and reduced-density-matrix queries, shrinking the network
//! with backward lightcone reduction where it can. [`contract::contract`]
//! and [`simulate::statevector`] exist to cross-validate those outputs.

pub mod circuit;
pub mod gate;
pub mod tensor;
pub mod reduce;
pub mod einsum;
pub mod contract;
pub mod simulate;
pub mod generate;
pub mod qasm;
