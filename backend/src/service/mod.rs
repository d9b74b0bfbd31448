pub mod greeting;
pub mod pokemon;

pub use greeting::Greeter;
pub use pokemon::PokemonService;
