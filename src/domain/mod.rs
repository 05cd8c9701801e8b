pub mod article;
pub mod wire;

pub use article::Article;
pub use wire::{FeedPage, RawArticle};
