pub mod in_memory_user;
pub mod user;

pub use in_memory_user::InMemoryUserRepository;
pub use user::PostgresUserRepository;
