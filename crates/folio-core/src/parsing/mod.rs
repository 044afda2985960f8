pub mod sections;
pub mod slug;
pub mod split;
pub mod toc;
