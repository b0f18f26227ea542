mod repository;

pub use repository::JsonRateCacheRepository;
