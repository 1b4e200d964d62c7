//! One repository per table. Each method issues a single parameterized
//! statement against the pool.

pub mod actor_repo;
pub mod movie_repo;
pub mod token_repo;
pub mod trailer_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use movie_repo::MovieRepo;
pub use token_repo::TokenRepo;
pub use trailer_repo::TrailerRepo;
pub use user_repo::UserRepo;
