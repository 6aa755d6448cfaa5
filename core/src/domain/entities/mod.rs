//! Domain entities representing core business objects.

pub mod principal;
pub mod task;
pub mod token;


// Re-export commonly used types
pub use principal::{Credential, Principal};
pub use task::{NewTask, Task, TaskUpdate};
pub use token::{Claims, IssuedToken, TOKEN_TYPE};
