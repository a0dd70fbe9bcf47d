pub mod assign;
pub mod contrast;
pub mod detect;
pub mod extract;
