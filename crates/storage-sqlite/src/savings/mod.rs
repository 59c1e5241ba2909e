mod repository;

pub use repository::SavingsRepository;
