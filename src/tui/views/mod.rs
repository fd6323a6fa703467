pub mod book_card;
pub mod book_list;
pub mod books;
pub mod home;
pub mod insights;
