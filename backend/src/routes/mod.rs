pub mod greeting;
pub mod pokemon;
