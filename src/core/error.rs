use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidInputError {
    #[error("principal must be greater than 0, got {0}")]
    Principal(f64),

    #[error("annual percentage rate must be 0 or greater, got {0}")]
    Apr(f64),

    #[error("term must be a whole number of months of at least 1, got {0}")]
    Term(f64),
}
