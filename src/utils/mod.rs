pub mod plural;
pub mod stringify;
pub mod text_input;
