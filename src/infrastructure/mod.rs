pub mod card;
pub mod http_poster;
pub mod in_memory;
pub mod wallet;
