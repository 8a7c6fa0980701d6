//! University domain facade.
//!
//! A closed table of named operations, each mapping onto exactly one
//! read call or one write submission against a fixed contract binding.
//! Dispatch is a static table lookup resolved at startup; there is no
//! per-request branching beyond read-versus-write.

use serde::Serialize;
use serde_json::Value;

use crate::contract::{Reader, TxOutcome, Writer};
use crate::error::{GatewayError, GatewayResult};
use crate::registry::{ArtifactError, ContractRegistry};

/// Whether an operation reads chain state or submits a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Read,
    Write,
}

/// One row of the operation table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OperationSpec {
    pub name: &'static str,
    pub contract: &'static str,
    pub function: &'static str,
    pub kind: OpKind,
}

/// The complete domain surface. Adding an operation means adding a row.
pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec { name: "assign-role", contract: "UniversityAccessControl", function: "assignRole", kind: OpKind::Write },
    OperationSpec { name: "get-role", contract: "UniversityAccessControl", function: "getRole", kind: OpKind::Read },
    OperationSpec { name: "create-course", contract: "CourseManagement", function: "createCourse", kind: OpKind::Write },
    OperationSpec { name: "enroll-student", contract: "CourseManagement", function: "enrollStudent", kind: OpKind::Write },
    OperationSpec { name: "confirm-enrollment", contract: "CourseManagement", function: "confirmEnrollment", kind: OpKind::Write },
    OperationSpec { name: "get-course", contract: "CourseManagement", function: "getCourse", kind: OpKind::Read },
    OperationSpec { name: "record-grade", contract: "GradeManagement", function: "recordGrade", kind: OpKind::Write },
    OperationSpec { name: "update-grade", contract: "GradeManagement", function: "updateGrade", kind: OpKind::Write },
    OperationSpec { name: "get-grades", contract: "GradeManagement", function: "getGrades", kind: OpKind::Read },
    OperationSpec { name: "mark-attendance", contract: "GradeManagement", function: "markAttendance", kind: OpKind::Write },
    OperationSpec { name: "get-attendance", contract: "GradeManagement", function: "getAttendance", kind: OpKind::Read },
    OperationSpec { name: "create-schedule", contract: "ScheduleManagement", function: "createSchedule", kind: OpKind::Write },
    OperationSpec { name: "edit-schedule", contract: "ScheduleManagement", function: "editSchedule", kind: OpKind::Write },
    OperationSpec { name: "delete-schedule", contract: "ScheduleManagement", function: "deleteSchedule", kind: OpKind::Write },
    OperationSpec { name: "get-schedule", contract: "ScheduleManagement", function: "getSchedule", kind: OpKind::Read },
    OperationSpec { name: "schedules-for-teacher", contract: "ScheduleManagement", function: "getAllSchedulesForTeacher", kind: OpKind::Read },
    OperationSpec { name: "average-grade", contract: "StatisticsTracker", function: "getAverageGrade", kind: OpKind::Read },
    OperationSpec { name: "average-grade-by-student", contract: "StatisticsTracker", function: "getAverageGradeByStudent", kind: OpKind::Read },
    OperationSpec { name: "attendance-rate", contract: "StatisticsTracker", function: "getAttendanceRate", kind: OpKind::Read },
];

/// Result of a facade invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum OpResult {
    Read {
        result: Vec<Value>,
    },
    Write {
        transaction_hash: alloy::primitives::TxHash,
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<TxOutcome>,
    },
}

/// Facade over the fixed set of deployed university contracts.
#[derive(Debug, Clone)]
pub struct UniversityFacade {
    registry: ContractRegistry,
    reader: Reader,
    writer: Writer,
}

impl UniversityFacade {
    /// Build the facade, verifying at startup that every operation's
    /// contract is loaded and its function exists in the deployed ABI.
    pub fn new(
        registry: ContractRegistry,
        reader: Reader,
        writer: Writer,
    ) -> Result<Self, ArtifactError> {
        for op in OPERATIONS {
            let binding = registry.get(op.contract)?;
            if !binding.has_function(op.function) {
                return Err(ArtifactError::Binding {
                    contract: op.contract.to_string(),
                    source: GatewayError::FunctionNotFound(op.function.to_string()),
                });
            }
        }

        Ok(Self {
            registry,
            reader,
            writer,
        })
    }

    /// The full operation table.
    pub fn operations() -> &'static [OperationSpec] {
        OPERATIONS
    }

    /// Look up an operation by name.
    pub fn operation(name: &str) -> GatewayResult<&'static OperationSpec> {
        OPERATIONS
            .iter()
            .find(|op| op.name == name)
            .ok_or_else(|| GatewayError::FunctionNotFound(name.to_string()))
    }

    /// Dispatch one operation. Write operations return the transaction
    /// hash immediately; with `wait` set they also poll for the receipt.
    pub async fn invoke(&self, name: &str, args: &[Value], wait: bool) -> GatewayResult<OpResult> {
        let op = Self::operation(name)?;
        // Validated in new(); a miss here would be a construction bug.
        let binding = self
            .registry
            .get(op.contract)
            .map_err(|e| GatewayError::Binding(e.to_string()))?;

        match op.kind {
            OpKind::Read => {
                let result = self.reader.read(binding, op.function, args).await?;
                Ok(OpResult::Read { result })
            }
            OpKind::Write => {
                let transaction_hash = self.writer.execute(binding, op.function, args).await?;
                let outcome = if wait {
                    Some(self.writer.wait_for_receipt(transaction_hash).await?)
                } else {
                    None
                };
                Ok(OpResult::Write {
                    transaction_hash,
                    outcome,
                })
            }
        }
    }
}
