//! Domain layer - Core business entities and logic
//!
//! Account rules (email, password, registration) and the budget
//! calculator. Nothing here touches storage or HTTP.

pub mod budget;
pub mod email;
pub mod error;
pub mod password;
pub mod user;

pub use budget::{BudgetEstimate, BudgetRequest};
pub use email::Email;
pub use error::{CalculationError, ValidationError};
pub use password::Password;
pub use user::{Registration, User, UserResponse};
