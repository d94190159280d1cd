//! Problem instances used by the demos.

pub mod programs;
pub mod reduct;

pub use programs::{
    CHOICE_PROGRAM, NAVIGATION_ROUTE, choice_models, choice_variables, navigation_scale,
    navigation_weights,
};
pub use reduct::{REDUCT_PROGRAM, reduct_algorithm, reduct_oracle};
