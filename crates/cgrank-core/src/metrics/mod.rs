pub mod degree;
pub mod dependents;
pub mod eigenvector;
pub mod normalize;
