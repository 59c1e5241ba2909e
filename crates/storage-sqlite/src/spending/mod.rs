mod repository;

pub use repository::SpendingRepository;
