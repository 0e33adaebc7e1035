//! Growth projections: future value, retirement savings and income, and
//! year-by-year net worth

mod growth;
mod retirement;
mod timeline;

pub use growth::{expected_return, future_value, total_contributions, ReturnAssumptions};
pub use retirement::{
    estimate_retirement_income, project_retirement, retirement_income, RetirementAssumptions,
    RetirementIncome, RetirementProjection,
};
pub use timeline::{generate_projection, net_worth, ProjectionYear, DEFAULT_PROJECTION_YEARS};
