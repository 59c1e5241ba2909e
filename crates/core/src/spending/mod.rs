//! Spending module - personal and household expenses grouped by month.

mod spending_model;
mod spending_service;
mod spending_traits;

pub use spending_model::*;
pub use spending_service::SpendingService;
pub use spending_traits::{MonthUpdate, SpendingRepositoryTrait, SpendingServiceTrait};
