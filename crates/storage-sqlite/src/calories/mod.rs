mod repository;

pub use repository::CalorieRepository;
