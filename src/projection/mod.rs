//! Statement projectors: CE → SP → CFlow → Banca, and the loop tying SP cash to Banca

pub mod banca;
pub mod ce;
pub mod cflow;
pub mod convergence;
pub mod lines;
pub mod opening;
pub mod sp;

pub use banca::{project_banca, BancaTable};
pub use ce::{monthly_amount, project_ce, CeTable, InterestOverride};
pub use cflow::{project_cflow, CflowTable};
pub use convergence::{converge, ConvergenceConfig, ConvergenceResult, Projections};
pub use lines::{BancaLine, CeLine, CflowLine, SpLine};
pub use opening::OpeningPosition;
pub use sp::{net_financial_position, project_sp, SpTable};
