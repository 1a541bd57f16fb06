pub mod score;
pub mod terms;
