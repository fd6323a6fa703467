pub mod feature_card;
pub mod search_input;
pub mod spinner;
