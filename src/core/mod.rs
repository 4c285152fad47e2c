pub mod controller;
pub mod debounce;
pub mod query;
pub mod suggest;
pub mod url_state;

pub use crate::domain::model::{Doctor, FilterSpec, PageResult};
pub use crate::domain::ports::DoctorSource;
pub use crate::utils::error::Result;
