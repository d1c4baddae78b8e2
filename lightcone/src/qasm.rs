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

//! OpenQASM 2 adapter: maps register-based gate programs onto the neutral
//! moment/operation representation.

use crate::circuit::{Circuit, Qubit};
use crate::gate::{GateType, Operation};
use num::{Rational64, Zero};
use openqasm::{ast::Symbol, translate::Value, GenericError, ProgramVisitor};

struct OperationWriter {
    ops: Vec<Operation>,
}

#[derive(Debug)]
enum QasmWriterError {
    UnsupportedGate(String),
    UnitaryNotSupported,
    BarrierNotSupported,
    ResetNotSupported,
    ConditionalNotSupported,
}

impl std::fmt::Display for QasmWriterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            QasmWriterError::UnsupportedGate(name) => {
                write!(f, "gate '{name}' is not in the supported gate set")
            }
            QasmWriterError::UnitaryNotSupported => {
                write!(f, "arbitrary unitaries are not supported")
            }
            QasmWriterError::BarrierNotSupported => write!(f, "barriers are not supported"),
            QasmWriterError::ResetNotSupported => write!(f, "resets are not supported"),
            QasmWriterError::ConditionalNotSupported => {
                write!(f, "conditionals are not supported")
            }
        }
    }
}

impl std::error::Error for QasmWriterError {}

impl openqasm::GateWriter for &mut OperationWriter {
    type Error = QasmWriterError;

    fn initialize(&mut self, _: &[Symbol], _: &[Symbol]) -> Result<(), Self::Error> {
        self.ops.clear();
        Ok(())
    }

    fn write_cx(&mut self, a: usize, b: usize) -> Result<(), Self::Error> {
        self.ops.push(Operation::new(
            GateType::CNOT,
            vec![Qubit(a as u32), Qubit(b as u32)],
        ));
        Ok(())
    }

    fn write_opaque(
        &mut self,
        name: &Symbol,
        params: &[Value],
        regs: &[usize],
    ) -> Result<(), Self::Error> {
        fn param_to_phase(value: Value) -> Rational64 {
            // Values carry a rational multiple of pi plus a float remainder;
            // approximate the remainder in half-turns
            let pi_part = Rational64::new(*value.b.numer(), *value.b.denom());
            if value.a.is_zero() {
                pi_part
            } else {
                let a = *value.a.numer() as f32 / *value.a.denom() as f32;
                let r = Rational64::approximate_float(a / std::f32::consts::PI).unwrap_or(0.into());
                r + pi_part
            }
        }

        let t = GateType::from_qasm_name(name.as_str())
            .ok_or_else(|| QasmWriterError::UnsupportedGate(name.as_str().to_string()))?;
        let qs: Vec<Qubit> = regs.iter().map(|&r| Qubit(r as u32)).collect();
        let phase = params.first().map(|&p| param_to_phase(p)).unwrap_or_else(Rational64::zero);
        self.ops.push(Operation::with_phase(t, qs, phase));
        Ok(())
    }

    fn write_u(&mut self, _: Value, _: Value, _: Value, _: usize) -> Result<(), Self::Error> {
        Err(QasmWriterError::UnitaryNotSupported)
    }

    fn write_barrier(&mut self, _: &[usize]) -> Result<(), Self::Error> {
        Err(QasmWriterError::BarrierNotSupported)
    }

    fn write_reset(&mut self, _: usize) -> Result<(), Self::Error> {
        Err(QasmWriterError::ResetNotSupported)
    }

    fn write_measure(&mut self, from: usize, _: usize) -> Result<(), Self::Error> {
        self.ops
            .push(Operation::new(GateType::Measure, vec![Qubit(from as u32)]));
        Ok(())
    }

    fn start_conditional(&mut self, _: usize, _: usize, _: u64) -> Result<(), Self::Error> {
        Err(QasmWriterError::ConditionalNotSupported)
    }

    fn end_conditional(&mut self) -> Result<(), Self::Error> {
        Err(QasmWriterError::ConditionalNotSupported)
    }
}

impl Circuit {
    fn from_qasm_parser(read: impl FnOnce(&mut openqasm::Parser)) -> Result<Circuit, String> {
        let mut cache = openqasm::SourceCache::new();
        let mut parser = openqasm::Parser::new(&mut cache)
            .with_file_policy(openqasm::parser::FilePolicy::Ignore);
        read(&mut parser);
        parser.parse_source::<String>(
            "
            opaque h q;
            opaque x q;
            opaque y q;
            opaque z q;
            opaque s q;
            opaque sdg q;
            opaque t q;
            opaque tdg q;
            opaque rz(phase) q;
            opaque rx(phase) q;
            opaque cx a, b;
            opaque cz a, b;
            opaque cp(phase) a, b;
            opaque cu1(phase) a, b;
            opaque swap a, b;
            opaque ccx a, b, c;
            opaque ccz a, b, c;
        "
            .to_string(),
            None,
        );

        let program = parser.done().to_errors().map_err(|e| e.to_string())?;
        program
            .type_check()
            .to_errors()
            .map_err(|e| e.to_string())?;

        let mut writer = OperationWriter { ops: Vec::new() };
        let mut linearize = openqasm::Linearize::new(&mut writer, usize::MAX);
        linearize
            .visit_program(&program)
            .to_errors()
            .map_err(|e| e.to_string())?;

        Ok(Circuit::from_operations(writer.ops))
    }

    /// Parses an OpenQASM 2 program into a circuit, packing the gate stream
    /// into moments.
    pub fn from_qasm(source: &str) -> Result<Circuit, String> {
        Circuit::from_qasm_parser(|parser| parser.parse_source::<String>(source.to_string(), None))
    }

    pub fn from_file(name: &str) -> Result<Circuit, String> {
        Circuit::from_qasm_parser(|parser| parser.parse_file(name))
    }
}
