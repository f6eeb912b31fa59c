pub mod interpolation;
pub mod mean;
pub mod poisson_binomial;
pub mod precision;
pub mod root_finding;
pub mod special_functions;

pub(crate) mod map_or_attrs;
