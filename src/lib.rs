//! Restructuring Plan - monthly projection and creditor-distribution engine
//!
//! This library provides:
//! - Income statement, balance sheet, cash flow and treasury projections
//!   reconciled through a convergence loop
//! - Financing and tax-debt amortization with auxiliary schedules
//!   (rent, business sale, procedure costs, VAT)
//! - Liquidation waterfall over asset masses
//! - Settlement distribution by creditor class
//! - Feasibility, sustainability and liquidation-vs-settlement checks
//! - Parallel batch runs over independent (case, scenario) scopes

pub mod money;
pub mod error;
pub mod timeline;
pub mod statement;
pub mod balances;
pub mod amortization;
pub mod auxiliary;
pub mod assumptions;
pub mod projection;
pub mod liquidation;
pub mod settlement;
pub mod feasibility;
pub mod store;
pub mod inputs;
pub mod pipeline;
pub mod scenario;

// Re-export commonly used types
pub use error::{PlanError, PlanResult};
pub use timeline::Timeline;
pub use assumptions::{Assumptions, PlanInputs};
pub use projection::{converge, ConvergenceConfig, ConvergenceResult, Projections};
pub use liquidation::{liquidate, LiquidationParams, LiquidationResult};
pub use settlement::{distribute, SettlementLine, SettlementParams};
pub use store::{MemoryStore, ProjectionStore, Scope, Statement};
pub use inputs::{InputSource, MemoryInputs};
pub use pipeline::{EngineConfig, PipelineReport, PlanEngine};
pub use scenario::ScenarioRunner;
