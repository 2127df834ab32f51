pub mod cpmm_pool;
pub mod pool;
pub mod pool_id;

pub use cpmm_pool::{CpmmPool, DEFAULT_FEE_DENOMINATOR, DEFAULT_FEE_NUMERATOR};
pub use pool::{CalculationError, Pool, PoolWrapper};
pub use pool_id::PoolId;
