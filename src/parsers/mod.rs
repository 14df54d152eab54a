//! Article body parsers
//!
//! Turns raw body markup into the normalized text and structural outline
//! that every criterion reads. Parsing happens once per article, when the
//! [`Article`](crate::models::Article) is constructed.

pub mod markup;
pub mod text;

pub use markup::{
    collapse_whitespace, element_text, html_to_text, parse_body, Block, BlockKind, ListInfo,
    Outline, ParsedBody, TableInfo,
};
pub use text::{count_words, prefix_chars, split_sentences, words};
